//! Serve JSON views of a provider schema registry.
//!
//! ```text
//! schemata-serve --registry schemas.json --listen 127.0.0.1:8081
//! ```
//!
//! The registry document is either `{"providers": [...]}` or the output of
//! `terraform providers schema -json`. Without `--registry` only the fixed
//! routes are served.

use anyhow::Context;
use clap::Parser;
use schemata::{
    Registry,
    server::{self, ServerConfig},
};
use std::{net::SocketAddr, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "schemata-serve", version, about = "Serve read-only JSON views of a provider schema registry")]
struct Cli {
    /// Registry document to load
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value_t = server::DEFAULT_LISTEN)]
    listen: SocketAddr,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    server::init_logging(&cli.log_level);

    let registry = match &cli.registry {
        Some(path) => Registry::from_path(path)
            .with_context(|| format!("failed to load registry from {}", path.display()))?,
        None => {
            tracing::warn!("no registry given, serving fixed routes only");
            Registry::default()
        }
    };
    tracing::info!(providers = registry.len(), "registry loaded");

    server::serve(ServerConfig::default().listen(cli.listen), &registry)
        .await
        .context("server failed")?;
    Ok(())
}
