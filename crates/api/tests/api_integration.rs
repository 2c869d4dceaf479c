//! Integration tests for the API server.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use api::routes::namespace::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode};
use domain::{Namespace, NamespaceStore, NoopNamespaceStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Store whose commit always fails.
struct FailingStore;

#[async_trait]
impl NamespaceStore for FailingStore {
    async fn commit(&self, _namespace: &Namespace) -> Result<(), StoreError> {
        Err(StoreError::Backend("database unavailable".to_string()))
    }
}

fn with_store<S: NamespaceStore + 'static>(store: S, max_body_bytes: usize) -> axum::Router {
    let state = Arc::new(AppState::new(store, max_body_bytes));
    api::create_app(state, get_metrics_handle())
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

fn setup() -> axum::Router {
    let state = api::create_default_state(&api::config::Config::default());
    api::create_app(state, get_metrics_handle())
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

fn valid_namespace_json() -> serde_json::Value {
    serde_json::json!({
        "name": "payments",
        "labels": {"env": "prod", "team": "billing"},
        "admin_user": ["alice", "bob"],
        "admin_group": ["billing-admins"],
        "flavor": "gold"
    })
}

fn post_namespace(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/namespace")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = send(
        setup(),
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"status": "ok", "code": 200}));
}

#[tokio::test]
async fn test_health_check_accepts_any_method() {
    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        let (status, json) = send(
            setup(),
            Request::builder()
                .method(method)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "method {method}");
        assert_eq!(json, serde_json::json!({"status": "ok", "code": 200}));
    }
}

#[tokio::test]
async fn test_create_namespace() {
    let input = valid_namespace_json();
    let (status, json) = send(setup(), post_namespace(input.to_string())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["code"], 201);
    assert_eq!(json["message"], "namespace created successfully");
    assert_eq!(json["namespace"], input);
}

#[tokio::test]
async fn test_create_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/namespace")
        .body(Body::from(valid_namespace_json().to_string()))
        .unwrap();

    let (status, _) = send(setup(), request).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_namespace_rejects_other_methods() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let (status, json) = send(
            setup(),
            Request::builder()
                .method(method)
                .uri("/namespace")
                .body(Body::from(valid_namespace_json().to_string()))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(
            json,
            serde_json::json!({"error": "only the POST method is allowed on this endpoint"})
        );
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, json) = send(setup(), post_namespace("{\"name\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        serde_json::json!({"error": "invalid JSON or incompatible with the expected namespace model"})
    );
}

#[tokio::test]
async fn test_incompatible_json_shape() {
    let body = serde_json::json!({"name": "payments", "admin_user": "alice"});
    let (status, json) = send(setup(), post_namespace(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "invalid JSON or incompatible with the expected namespace model"
    );
}

#[tokio::test]
async fn test_empty_body_is_malformed() {
    let (status, json) = send(setup(), post_namespace(Body::empty())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "invalid JSON or incompatible with the expected namespace model"
    );
}

#[tokio::test]
async fn test_missing_fields_fail_validation() {
    let (status, json) = send(setup(), post_namespace("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        serde_json::json!({"error": "namespace name must not be empty"})
    );
}

#[tokio::test]
async fn test_validation_messages_pass_through() {
    let cases = [
        ("labels", serde_json::json!({}), "labels must not be empty"),
        (
            "labels",
            serde_json::json!({"env": ""}),
            "value of label 'env' must not be empty",
        ),
        (
            "admin_user",
            serde_json::json!(["alice", ""]),
            "admin user at position 1 must not be empty",
        ),
        ("admin_group", serde_json::json!([]), "admin_group must not be empty"),
        ("flavor", serde_json::json!(""), "flavor must not be empty"),
    ];

    for (field, value, expected) in cases {
        let mut body = valid_namespace_json();
        body[field] = value;

        let (status, json) = send(setup(), post_namespace(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(json["error"], expected);
    }
}

#[tokio::test]
async fn test_null_values_fail_validation_not_parsing() {
    let mut null_name = valid_namespace_json();
    null_name["name"] = serde_json::Value::Null;

    let mut null_label = valid_namespace_json();
    null_label["labels"] = serde_json::json!({"env": null});

    let mut null_admin = valid_namespace_json();
    null_admin["admin_user"] = serde_json::json!(["x", null]);

    let cases = [
        (null_name, "namespace name must not be empty"),
        (null_label, "value of label 'env' must not be empty"),
        (null_admin, "admin user at position 1 must not be empty"),
    ];

    for (body, expected) in cases {
        let (status, json) = send(setup(), post_namespace(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": expected }));
    }
}

#[tokio::test]
async fn test_capitalized_keys_accepted() {
    let body = serde_json::json!({
        "Name": "payments",
        "Labels": {"env": "prod"},
        "ADMIN_USER": ["alice"],
        "Admin_group": ["ops"],
        "FLAVOR": "gold"
    });
    let (status, json) = send(setup(), post_namespace(body.to_string())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["namespace"]["name"], "payments");
    assert_eq!(json["namespace"]["admin_user"], serde_json::json!(["alice"]));
}

#[tokio::test]
async fn test_commit_failure_returns_internal_error() {
    let app = with_store(FailingStore, api::config::DEFAULT_MAX_BODY_BYTES);
    let (status, json) = send(app, post_namespace(valid_namespace_json().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"error": "failed to commit namespace"}));
}

#[tokio::test]
async fn test_invalid_record_never_reaches_store() {
    let app = with_store(FailingStore, api::config::DEFAULT_MAX_BODY_BYTES);
    let (status, json) = send(app, post_namespace("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "namespace name must not be empty");
}

#[tokio::test]
async fn test_oversized_body_is_unreadable() {
    let app = with_store(NoopNamespaceStore::new(), 16);
    let (status, json) = send(app, post_namespace(valid_namespace_json().to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"error": "failed to read request body"}));
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let response = setup()
        .oneshot(
            Request::builder()
                .uri("/namespaces")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    // Generate a request so the counter exists
    let (status, _) = send(app.clone(), post_namespace("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("namespace_requests_total"));
}
