//! HTTP serving over axum.
//!
//! [`app`] binds a synthesized route table to an [`axum::Router`] through
//! [`AxumTransport`]; [`serve`] runs it until Ctrl-C.

mod logging;
mod transport;

pub use logging::init_logging;
pub use transport::AxumTransport;

use schemata_core::{SchemaRegistry, SchemataError};
use schemata_std::{ApiRouter, bind_routes, synthesize};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

/// Default listen address.
pub const DEFAULT_LISTEN: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8081);

/// Server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: DEFAULT_LISTEN }
    }
}

impl ServerConfig {
    /// Set the address to listen on.
    pub fn listen(mut self, addr: SocketAddr) -> Self {
        self.listen = addr;
        self
    }

    /// The address to listen on.
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen
    }
}

/// Build the axum application for `registry`.
pub fn app<R: SchemaRegistry + ?Sized>(registry: &R) -> Result<axum::Router, SchemataError> {
    let table = Arc::new(synthesize(registry));
    let fallback = ApiRouter::from_table(Arc::clone(&table))?;

    let mut transport = AxumTransport::new();
    bind_routes(&table, &mut transport)?;
    tracing::info!(routes = table.len(), "routes bound");

    Ok(transport.into_router(fallback))
}

/// Serve `registry` until Ctrl-C.
pub async fn serve<R: SchemaRegistry + ?Sized>(config: ServerConfig, registry: &R) -> Result<(), SchemataError> {
    let app = app(registry)?;
    let listener = TcpListener::bind(config.listen).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server runs until killed.
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        assert_eq!(ServerConfig::default().listen_addr().to_string(), "0.0.0.0:8081");

        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        assert_eq!(ServerConfig::default().listen(addr).listen_addr(), addr);
    }
}
