use super::*;

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

// =========================================================================
// Mock server
// =========================================================================

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn verify(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
    let accepted = body["token"] == "good-token";
    seen.lock().unwrap().push(body);
    if accepted { StatusCode::OK } else { StatusCode::UNAUTHORIZED }
}

async fn users() -> Json<Value> {
    Json(json!([{"id": 1}, {"id": 2}]))
}

async fn mock_api() -> (HttpApi, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = axum::Router::new()
        .route("/", get(users))
        .route("/api/verify-token", post(verify))
        .with_state(seen.clone());
    let base = spawn_server(app).await;
    let api = HttpApi::new(&ClientConfig::with_base_url(&base).unwrap()).unwrap();
    (api, seen)
}

// =========================================================================
// verify_token
// =========================================================================

#[tokio::test]
async fn verify_token_posts_token_body() {
    let (api, seen) = mock_api().await;
    api.verify_token("good-token").await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![json!({"token": "good-token"})]);
}

#[tokio::test]
async fn verify_token_rejection_is_status_error() {
    let (api, _seen) = mock_api().await;
    let err = api.verify_token("stale").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }), "got {err:?}");
}

#[tokio::test]
async fn verify_token_transport_failure_is_request_error() {
    let api = HttpApi::new(&ClientConfig::with_base_url("http://127.0.0.1:1").unwrap()).unwrap();
    let err = api.verify_token("good-token").await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)), "got {err:?}");
}

/// Serves one connection: reads the request up to the end of its JSON body,
/// then answers 200 with a body shorter than its Content-Length.
async fn spawn_truncated_ok_server() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"valid\"")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn verify_token_2xx_succeeds_without_reading_body() {
    let base = spawn_truncated_ok_server().await;
    let api = HttpApi::new(&ClientConfig::with_base_url(&base).unwrap()).unwrap();
    api.verify_token("good-token").await.unwrap();
}

// =========================================================================
// fetch_users
// =========================================================================

#[tokio::test]
async fn fetch_users_returns_records_in_order() {
    let (api, _seen) = mock_api().await;
    let users = api.fetch_users().await.unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.field("id").cloned()).collect();
    assert_eq!(ids, vec![Some(json!(1)), Some(json!(2))]);
}

#[tokio::test]
async fn fetch_users_non_2xx_is_status_error() {
    let app = axum::Router::new().route("/", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
    let base = spawn_server(app).await;
    let api = HttpApi::new(&ClientConfig::with_base_url(&base).unwrap()).unwrap();
    let err = api.fetch_users().await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

// =========================================================================
// parse_users
// =========================================================================

#[test]
fn parse_users_accepts_empty_array() {
    assert!(parse_users("[]").unwrap().is_empty());
}

#[test]
fn parse_users_rejects_object_body() {
    let err = parse_users(r#"{"users": []}"#).unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn parse_users_rejects_garbage() {
    assert!(matches!(parse_users("<html>"), Err(ApiError::Parse(_))));
}
