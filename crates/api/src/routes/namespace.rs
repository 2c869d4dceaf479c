//! Namespace registration endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use domain::{Namespace, NamespaceStore};
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: NamespaceStore> {
    pub store: S,
    pub max_body_bytes: usize,
}

impl<S: NamespaceStore> AppState<S> {
    /// Creates state around a store with the given body size limit.
    pub fn new(store: S, max_body_bytes: usize) -> Self {
        Self {
            store,
            max_body_bytes,
        }
    }
}

pub const CREATED_MESSAGE: &str = "namespace created successfully";

#[derive(Debug, Serialize)]
pub struct NamespaceCreatedResponse {
    pub status: &'static str,
    pub code: u16,
    pub message: &'static str,
    pub namespace: Namespace,
}

/// POST /namespace — validate and register a namespace.
pub async fn create<S: NamespaceStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    method: Method,
    body: Body,
) -> Response {
    match accept(&state, body).await {
        Ok(namespace) => {
            let status = StatusCode::CREATED;

            tracing::info!(
                %remote_addr,
                %method,
                status = status.as_u16(),
                namespace = %namespace.name,
                "namespace created"
            );
            metrics::counter!("namespace_requests_total", "outcome" => "created").increment(1);

            let response = NamespaceCreatedResponse {
                status: "success",
                code: status.as_u16(),
                message: CREATED_MESSAGE,
                namespace,
            };
            (status, Json(response)).into_response()
        }
        Err(err) => reject(remote_addr, &method, err),
    }
}

/// Any non-POST method on /namespace.
pub async fn method_not_allowed(
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    method: Method,
) -> Response {
    reject(remote_addr, &method, ApiError::MethodNotAllowed)
}

async fn accept<S: NamespaceStore>(state: &AppState<S>, body: Body) -> Result<Namespace, ApiError> {
    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(ApiError::UnreadableBody)?;

    let namespace: Namespace = serde_json::from_slice(&bytes)?;
    namespace.validate()?;
    state.store.commit(&namespace).await?;

    Ok(namespace)
}

fn reject(remote_addr: SocketAddr, method: &Method, err: ApiError) -> Response {
    let status = err.status();

    if status.is_server_error() {
        tracing::error!(
            %remote_addr,
            %method,
            status = status.as_u16(),
            error = %err,
            "namespace request failed"
        );
    } else {
        tracing::warn!(
            %remote_addr,
            %method,
            status = status.as_u16(),
            error = %err,
            "namespace request rejected"
        );
    }
    metrics::counter!("namespace_requests_total", "outcome" => err.outcome()).increment(1);

    err.into_response()
}
