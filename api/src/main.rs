use clap::Parser;

use tv_api::cli::Cli;
use tv_api::telemetry;
use tv_shared::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    cli.apply(&mut config);

    telemetry::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        workers = config.server.workers,
        "Starting token validator"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(cli.run(config))
}
