//! Liveness endpoint.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::ConnectInfo;
use axum::http::{Method, StatusCode};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub code: u16,
}

/// ANY /health — reports that the process is accepting connections.
pub async fn check(
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    method: Method,
) -> (StatusCode, Json<HealthResponse>) {
    let status = StatusCode::OK;

    tracing::info!(
        %remote_addr,
        %method,
        status = status.as_u16(),
        "health check"
    );
    metrics::counter!("health_checks_total").increment(1);

    (
        status,
        Json(HealthResponse {
            status: "ok",
            code: status.as_u16(),
        }),
    )
}
