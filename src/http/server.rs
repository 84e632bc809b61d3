//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::observability::metrics;
use crate::registry::ProductRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProductRegistry>,
}

/// HTTP server for the product service.
pub struct HttpServer {
    router: Router,
    registry: Arc<ProductRegistry>,
}

impl HttpServer {
    /// Create a server whose registry is built from `config.registry`.
    pub fn new(config: ServiceConfig) -> Self {
        let strategy = config.registry.id_strategy;
        let registry = if config.registry.seed {
            ProductRegistry::seeded(strategy)
        } else {
            ProductRegistry::new(strategy)
        };
        Self::with_registry(config, Arc::new(registry))
    }

    /// Create a server around an existing registry handle.
    pub fn with_registry(config: ServiceConfig, registry: Arc<ProductRegistry>) -> Self {
        let state = AppState {
            registry: registry.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, registry }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let layers = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(propagate_request_id_layer())
            .layer(middleware::from_fn(record_response))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/", get(handlers::hello))
            .route(
                "/products",
                get(handlers::list_products).post(handlers::create_product),
            )
            .route(
                "/products/{id}",
                get(handlers::get_product)
                    .put(handlers::update_product)
                    .delete(handlers::delete_product),
            )
            .fallback(handlers::fallback)
            .with_state(state)
            .layer(layers)
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    ///
    /// Pass [`Shutdown::notified`](crate::lifecycle::Shutdown::notified) so
    /// the subscription exists before the server starts.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            products = self.registry.len(),
            id_strategy = ?self.registry.strategy(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn registry(&self) -> &Arc<ProductRegistry> {
        &self.registry
    }
}

async fn record_response(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let response = next.run(request).await;
    metrics::record_response(method.as_str(), response.status().as_u16());
    response
}
