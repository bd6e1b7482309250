//! # HTTP Server
//!
//! Combines the record and observability routers behind the origin guard,
//! CORS and access logging.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::RecordHandler;
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::store::SharedStore;

use super::config::{ConfigError, ServerConfig};
use super::middleware::{access_log, origin_guard, OriginGuard};
use super::observability_routes::observability_routes;
use super::record_routes::record_routes;

/// HTTP server for the record API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Build a server around an already-opened store
    pub fn new(config: ServerConfig, store: SharedStore) -> Result<Self, ConfigError> {
        let router = Self::build_router(&config, store)?;
        Ok(Self { config, router })
    }

    fn build_router(config: &ServerConfig, store: SharedStore) -> Result<Router, ConfigError> {
        let metrics = Arc::new(MetricsRegistry::new());
        let handler = RecordHandler::new(store, Arc::clone(&metrics), config.list_order);
        let origins = config.allowed_origins()?;

        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.clone()))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);

        let guard = OriginGuard::new(origins, Arc::clone(&metrics));

        // outermost layer last: access log, then origin guard, then CORS
        Ok(Router::new()
            .merge(observability_routes(Arc::clone(&metrics)))
            .merge(record_routes(handler))
            .layer(cors)
            .layer(from_fn_with_state(guard, origin_guard))
            .layer(from_fn_with_state(metrics, access_log)))
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let local = listener.local_addr()?.to_string();
        let order = self.config.list_order.to_string();
        log_event_with_fields(
            Event::Serving,
            &[
                ("addr", local.as_str()),
                ("list_order", order.as_str()),
                ("database_path", self.config.database_path.as_str()),
            ],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event_with_fields(Event::ShutdownComplete, &[("addr", local.as_str())]);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        Logger::warn(
            "SHUTDOWN_SIGNAL_UNAVAILABLE",
            &[("error", e.to_string().as_str())],
        );
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;

    fn memory_store() -> SharedStore {
        Arc::new(MemoryRecordStore::new())
    }

    #[test]
    fn test_invalid_origin_fails_construction() {
        let mut config = ServerConfig::default();
        config.cors_origins = vec!["not-an-origin".to_string()];
        assert!(HttpServer::new(config, memory_store()).is_err());
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(ServerConfig::default(), memory_store()).unwrap();
        let _router = server.router();
    }
}
