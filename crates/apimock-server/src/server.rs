use std::net::SocketAddr;
use std::sync::Arc;

use apimock_store::InMemoryResourceStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// The mock server: one store, one listener.
pub struct ApimockServer {
    config: ServerConfig,
    store: Arc<InMemoryResourceStore>,
}

impl ApimockServer {
    pub fn new(config: ServerConfig) -> Self {
        let store = InMemoryResourceStore::new()
            .with_default_content_type(config.default_content_type.clone())
            .with_override_content_type(config.override_content_type().unwrap_or_default());
        Self {
            config,
            store: Arc::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<InMemoryResourceStore> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.store.clone(), self.config.max_body_size)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            default_content_type = %self.config.default_content_type,
            override_content_type = ?self.config.override_content_type(),
            "apimock listening"
        );
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("apimock stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use apimock_store::ResourceStore;

    use super::*;

    #[test]
    fn server_construction() {
        let server = ApimockServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "0.0.0.0:80".parse().unwrap());
        assert!(server.store().is_empty());
    }

    #[test]
    fn store_follows_config() {
        let server = ApimockServer::new(ServerConfig {
            default_content_type: "text/plain".into(),
            override_content_type: Some("text/csv".into()),
            ..Default::default()
        });
        assert_eq!(server.store().default_content_type(), "text/plain");
        assert_eq!(server.store().override_content_type(), Some("text/csv"));

        server.store().set("/x", &mut &b"a,b"[..], "application/json").unwrap();
        assert_eq!(server.store().get("/x").unwrap().content_type(), "text/csv");
    }

    #[test]
    fn router_builds() {
        let server = ApimockServer::new(ServerConfig::default());
        let _router = server.router();
    }
}
