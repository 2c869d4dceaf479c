//! HTTP API server for namespace registration.
//!
//! Exposes a liveness probe and a namespace registration endpoint, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get, post};
use domain::{NamespaceStore, NoopNamespaceStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use config::Config;
use routes::namespace::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// Handlers extract the caller address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_app<S: NamespaceStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", any(routes::health::check))
        .route(
            "/namespace",
            post(routes::namespace::create::<S>).fallback(routes::namespace::method_not_allowed),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state backed by the no-op store.
pub fn create_default_state(config: &Config) -> Arc<AppState<NoopNamespaceStore>> {
    Arc::new(AppState::new(NoopNamespaceStore::new(), config.max_body_bytes))
}
