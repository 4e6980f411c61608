//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the health subsystem from configuration
//! - Create Axum Router with all handlers
//! - Wire up middleware (timeout, request ID, tracing)
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::health::{Aggregator, HttpProbe, SnapshotCache};
use crate::http::handlers::{get_status, not_found, whoami};
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::nodes::NodePool;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
}

/// HTTP server for the status gateway.
pub struct HttpServer {
    router: Router,
    nodes: Arc<NodePool>,
    cache: Arc<SnapshotCache>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let nodes = Arc::new(NodePool::new(&config.nodes));

        let status = &config.status;
        let probe = HttpProbe::new(
            Duration::from_millis(status.probe_timeout_ms),
            expected_status(status.expected_status),
        );

        let aggregator = Aggregator::new(
            nodes.clone(),
            Arc::new(probe),
            status.media_servers.clone(),
            status.node_group.clone(),
            status.media_group.clone(),
        );
        let cache = Arc::new(SnapshotCache::new(
            aggregator,
            Duration::from_secs(status.cache_validity_secs),
        ));

        tracing::info!(
            nodes = nodes.len(),
            media_servers = status.media_servers.len(),
            cache_validity_secs = status.cache_validity_secs,
            "Health subsystem initialized"
        );

        let state = AppState {
            cache: cache.clone(),
        };
        let router = Self::build_router(&config, state);

        Self {
            router,
            nodes,
            cache,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(get_status))
            .route("/whoami", get(whoami))
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| request_span(req)))
            .layer(set_request_id_layer())
    }

    /// The router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Backend node membership read by the aggregator.
    pub fn nodes(&self) -> Arc<NodePool> {
        self.nodes.clone()
    }

    pub fn cache(&self) -> Arc<SnapshotCache> {
        self.cache.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The probe sentinel, falling back to `404` for codes `validate_config`
/// would have rejected.
fn expected_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or_else(|_| {
        tracing::warn!(code, "Invalid expected status, probing for 404 instead");
        StatusCode::NOT_FOUND
    })
}
