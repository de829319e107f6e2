//! `ReqwestTransport` against an in-process axum account server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use dream_account_config::StaticSettings;
use dream_account_core::contracts::AccountSettings;
use dream_account_core::model::{Credentials, ErrorKind, UserRecord};
use dream_account_core::{AccountSession, OperationEvent, PingOperation, ReqwestTransport};
use serde_json::{Value, json};

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["user_name"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "USERNAME_EXISTS", "message": "name taken"})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"user": {"user_name": body["user_name"], "user_id": 1}})),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["user_password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "INVALID_CREDENTIALS"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "user": {"user_name": body["user_name"], "user_id": 42},
            "token": "abc123",
        })),
    )
}

async fn auth(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|value| value.to_str().ok()) {
        Some("Bearer abc123") => (
            StatusCode::OK,
            Json(json!({"user": {"user_name": "alice", "user_id": 42}})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "TOKEN_INVALID"})),
        ),
    }
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/account/register", post(register))
        .route("/api/account/login", post(login))
        .route("/api/account/auth", get(auth))
        .route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// Loopback traffic must not be routed through an ambient HTTP_PROXY.
fn transport() -> ReqwestTransport {
    ReqwestTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

fn settings(addr: SocketAddr) -> AccountSettings {
    AccountSettings::new(format!("http://{addr}/"), Duration::from_secs(5))
}

#[tokio::test]
async fn full_account_flow_over_http() {
    let addr = spawn_server().await;
    let session = AccountSession::new(transport(), settings(addr));

    let taken = session.register_async(Credentials::new("taken", "secret")).await;
    assert_eq!(taken.error(), ErrorKind::UsernameExists);
    assert_eq!(taken.message(), "name taken");

    let created = session.register_async(Credentials::new("alice", "secret")).await;
    assert!(created.is_success());
    assert_eq!(created.user(), &UserRecord::new("alice", 1));

    let rejected = session.login_async(Credentials::new("alice", "nope")).await;
    assert_eq!(rejected.error(), ErrorKind::InvalidCredentials);
    assert!(!session.has_token());

    let logged_in = session.login_async(Credentials::new("alice", "secret")).await;
    assert!(logged_in.is_success());
    assert_eq!(session.token().as_deref(), Some("abc123"));

    let authed = session.authenticate_async().await;
    assert!(authed.is_success());
    assert_eq!(authed.user(), &UserRecord::new("alice", 42));

    session.set_token("forged");
    let forged = session.authenticate_async().await;
    assert_eq!(forged.error(), ErrorKind::TokenRejected);
}

#[tokio::test]
async fn ping_measures_round_trip_even_for_error_status() {
    let addr = spawn_server().await;
    let mut ping = PingOperation::new(
        transport(),
        StaticSettings::new(settings(addr)),
        format!("http://{addr}/health"),
    );
    let completion = ping.completion();
    ping.activate();

    match completion.await {
        Some(OperationEvent::Succeeded(ms)) => assert!(ms >= 0.0),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = AccountSession::new(transport(), settings(addr));
    let result = session.login_async(Credentials::new("alice", "secret")).await;

    assert_eq!(result.error(), ErrorKind::TransportError);
    assert_eq!(result.user().id(), UserRecord::DEFAULT_ID);
}
