//! Sign-in, persistence, and logout tests against a stub auth endpoint

use axum::extract::Json as ExtractJson;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use megachat_cli::api::{ApiClient, AuthProvider};
use megachat_cli::config::EndpointsConfig;
use megachat_cli::tui::app::AppState;
use megachat_cli::{Config, SessionStore};

async fn serve(router: Router) -> EndpointsConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });

    let base = format!("http://{addr}");
    EndpointsConfig {
        assist_url: format!("{base}/assist"),
        auth_url: format!("{base}/auth"),
        timeout_secs: 5,
    }
}

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::at_path(dir.path().join("session.json"))
}

/// Echo the posted user back with a token, like the real endpoint
fn auth_ok_router() -> Router {
    Router::new().route(
        "/auth",
        post(|ExtractJson(body): ExtractJson<Value>| async move {
            Json(json!({
                "token": "mock-token-123",
                "user": body["userData"],
            }))
        }),
    )
}

#[tokio::test]
async fn successful_auth_closes_modal_and_persists_session() {
    let endpoints = serve(auth_ok_router()).await;
    let client = ApiClient::new(&endpoints);
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut state = AppState::new(&Config::default().model, store.load());
    assert!(state.auth_modal_open);
    assert!(state.begin_auth());

    let session = client.authenticate(AuthProvider::Google).await.unwrap();
    store.save(&session).unwrap();
    state.auth_succeeded(session);

    assert!(!state.auth_modal_open);
    assert!(!state.auth_in_flight);
    let user = &state.session.as_ref().unwrap().user;
    assert!(user.id.starts_with("google_"));
    assert_eq!(user.email, "student@example.com");

    // durable entries survive a restart
    let restored = store.load().expect("persisted session loads");
    assert_eq!(restored.token, "mock-token-123");
    assert_eq!(restored.user.provider, "google");

    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("session.json")).unwrap())
            .unwrap();
    assert!(raw.get("token").is_some());
    assert!(raw["user"].get("email").is_some());
}

#[tokio::test]
async fn failed_auth_leaves_no_session_and_keeps_modal_open() {
    let endpoints = serve(Router::new().route(
        "/auth",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "auth backend down" })),
            )
        }),
    ))
    .await;
    let client = ApiClient::new(&endpoints);
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut state = AppState::new(&Config::default().model, store.load());
    assert!(state.begin_auth());

    let result = client.authenticate(AuthProvider::Yandex).await;
    assert!(result.is_err());
    state.auth_failed();

    assert!(state.auth_modal_open);
    assert!(!state.auth_in_flight);
    assert!(state.session.is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn token_without_user_is_rejected() {
    let endpoints = serve(Router::new().route(
        "/auth",
        post(|| async {
            Json(json!({
                "token": "t",
                "user": { "id": "", "email": "", "name": "", "provider": "" },
            }))
        }),
    ))
    .await;
    let client = ApiClient::new(&endpoints);

    let result = client.authenticate(AuthProvider::Google).await;
    assert!(result.is_err());
}

#[test]
fn malformed_stored_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(dir.path().join("session.json"), "{not json").unwrap();
    assert!(store.load().is_none());
}

#[test]
fn logout_clears_store_and_reopens_modal() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let session = serde_json::from_value(json!({
        "token": "t",
        "user": { "id": "google_1", "email": "e", "name": "n", "provider": "google" },
    }))
    .unwrap();
    store.save(&session).unwrap();

    let mut state = AppState::new(&Config::default().model, store.load());
    assert!(!state.auth_modal_open);

    store.clear().unwrap();
    state.logout();

    assert!(state.session.is_none());
    assert!(state.auth_modal_open);
    assert!(store.load().is_none());
    // clearing twice is fine
    store.clear().unwrap();
}
