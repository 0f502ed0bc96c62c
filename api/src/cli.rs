//! Command line interface

use clap::{Parser, Subcommand};

use tv_shared::config::AppConfig;

use crate::server;

/// Bearer access-token validation service
#[derive(Debug, Parser)]
#[command(name = "token-validator", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the verification.Auth gRPC service (default)
    Serve {
        /// Override SERVER_HOST
        #[arg(long)]
        host: Option<String>,

        /// Override SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Revoke an access token and exit
    Revoke {
        /// The bearer token to delete
        token: String,
    },
}

impl Cli {
    /// Apply command line overrides on top of the environment configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(Command::Serve { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }

    /// Run the selected command to completion
    pub async fn run(self, config: AppConfig) -> anyhow::Result<()> {
        match self.command {
            None | Some(Command::Serve { .. }) => server::serve(config).await,
            Some(Command::Revoke { token }) => server::revoke(config, &token).await,
        }
    }
}
