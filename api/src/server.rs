//! Process bootstrap: wire the store, cache and validator, then serve

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Server;

use tv_core::services::{InMemoryTokenCache, TokenCache, TokenValidator, TokenValidatorConfig};
use tv_infra::cache::{RedisClient, RedisTokenCache};
use tv_infra::database::{DatabasePool, MySqlAccessTokenRepository};
use tv_shared::config::{AppConfig, CacheBackend, CacheConfig};

use crate::service::ValidationService;

const MEMORY_CACHE_SWEEP: Duration = Duration::from_secs(60);

/// Open the token store and build a validator over it
///
/// The store is required: failing to connect is fatal. The cache is
/// optional and only attached when it comes up.
pub async fn build_validator(config: &AppConfig) -> anyhow::Result<(TokenValidator, DatabasePool)> {
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the token store")?;

    if !pool.health_check().await.context("token store health check failed")? {
        anyhow::bail!("token store health check returned an unexpected result");
    }

    let repository = Arc::new(MySqlAccessTokenRepository::from_pool(&pool));
    let mut validator = TokenValidator::new(
        repository,
        TokenValidatorConfig::from_settings(&config.database, &config.cache),
    );

    if let Some(cache) = connect_cache(&config.cache).await {
        validator = validator.with_cache(cache);
    }

    Ok((validator, pool))
}

/// Build the configured validity cache, or `None` when disabled or unreachable
pub async fn connect_cache(config: &CacheConfig) -> Option<Arc<dyn TokenCache>> {
    if !config.enabled {
        tracing::info!("Validity cache disabled");
        return None;
    }

    match config.backend {
        CacheBackend::Memory => {
            let cache = InMemoryTokenCache::new();
            spawn_sweeper(cache.clone());
            tracing::info!(default_ttl = config.default_ttl, "Using in-memory validity cache");
            Some(Arc::new(cache))
        }
        CacheBackend::Redis => match RedisClient::new(config.clone()).await {
            Ok(client) => {
                tracing::info!(default_ttl = config.default_ttl, "Using Redis validity cache");
                Some(Arc::new(RedisTokenCache::new(client)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, running without validity cache");
                None
            }
        },
    }
}

fn spawn_sweeper(cache: InMemoryTokenCache) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MEMORY_CACHE_SWEEP);
        loop {
            interval.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired cache entries");
            }
        }
    });
}

/// Serve `verification.Auth` until ctrl-c, then close the store
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid server configuration")?;

    let (validator, pool) = build_validator(&config).await?;
    let addr = resolve(&config.server.bind_address()).await?;

    tracing::info!(
        %addr,
        concurrency_limit = config.server.concurrency_limit,
        request_timeout_secs = config.server.request_timeout,
        "Token validator listening"
    );

    let served = Server::builder()
        .concurrency_limit_per_connection(config.server.concurrency_limit)
        .timeout(config.server.request_timeout())
        .add_service(ValidationService::new(validator).into_server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server failed");

    pool.close().await;
    tracing::info!("Token validator stopped");
    served
}

/// Revoke a single token against the configured store and cache
pub async fn revoke(config: AppConfig, token: &str) -> anyhow::Result<()> {
    let (validator, pool) = build_validator(&config).await?;

    let revoked = validator
        .revoke(token)
        .await
        .context("failed to revoke access token");

    pool.close().await;
    revoked
}

async fn resolve(bind_address: &str) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host(bind_address)
        .await
        .with_context(|| format!("invalid bind address {}", bind_address))?
        .next()
        .with_context(|| format!("bind address {} did not resolve", bind_address))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight calls");
}
