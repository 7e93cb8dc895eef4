//! Integration tests for the GoTrue client and the file session store

use std::sync::Arc;
use std::time::Duration;

use opsboard_core::{AuthContext, AuthPort, SessionStore};
use opsboard_domain::{OpsBoardError, Role};
use opsboard_infra::{FileSessionStore, GoTrueAuth, HttpClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "6f1c1c52-3f0a-4d57-9a1e-2b1f9d2c8e01";

fn http() -> HttpClient {
    HttpClient::builder()
        .base_backoff(Duration::from_millis(5))
        .build()
        .expect("http client")
}

fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": refresh,
        "user": {"id": USER_ID, "email": "ana@example.com"},
    })
}

async fn mount_role(server: &MockServer, access: &str, role: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("select", "rol"))
        .and(query_param("id", format!("eq.{USER_ID}")))
        .and(header("Authorization", format!("Bearer {access}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"rol": role}])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn password_grant_builds_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({"email": "ana@example.com", "password": "secreto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-1", "rt-1")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = GoTrueAuth::new(http(), &format!("{}/", server.uri()));
    let session = auth.sign_in("ana@example.com", "secreto").await.unwrap();

    assert_eq!(session.access_token, "at-1");
    assert_eq!(session.refresh_token, "rt-1");
    assert_eq!(session.email, "ana@example.com");
    assert_eq!(session.user_id.to_string(), USER_ID);
    assert!(!session.is_expired(chrono::Utc::now()));
}

#[tokio::test]
async fn rejected_password_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = GoTrueAuth::new(http(), &server.uri());
    let err = auth.sign_in("ana@example.com", "mala").await.unwrap_err();

    assert_eq!(err, OpsBoardError::Auth("invalid credentials".into()));
}

#[tokio::test]
async fn stale_refresh_token_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid Refresh Token: Refresh Token Not Found",
        })))
        .mount(&server)
        .await;

    let auth = GoTrueAuth::new(http(), &server.uri());
    let err = auth.refresh("rt-old").await.unwrap_err();

    assert!(matches!(err, OpsBoardError::Auth(msg) if msg.contains("Refresh Token Not Found")));
}

#[tokio::test]
async fn missing_profile_has_no_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-1", "rt-1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let auth = GoTrueAuth::new(http(), &server.uri());
    let session = auth.sign_in("ana@example.com", "secreto").await.unwrap();

    assert_eq!(auth.fetch_role(&session).await.unwrap(), None);
}

#[tokio::test]
async fn context_round_trips_through_the_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-1", "rt-1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({"refresh_token": "rt-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-2", "rt-2")))
        .expect(1)
        .mount(&server)
        .await;
    mount_role(&server, "at-1", "admin").await;
    mount_role(&server, "at-2", "admin").await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("Authorization", "Bearer at-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("nested").join("session.json");
    let context = |server: &MockServer| {
        AuthContext::new(
            Arc::new(GoTrueAuth::new(http(), &server.uri())),
            Arc::new(FileSessionStore::new(&file)),
        )
    };

    let first = context(&server);
    let actor = first.sign_in("ana@example.com", "secreto").await.unwrap();
    assert_eq!(actor.role, Role::Admin);
    assert!(file.exists());

    let second = context(&server);
    let restored = second.restore().await.unwrap().expect("restored actor");
    assert_eq!(restored.email, "ana@example.com");
    assert_eq!(second.access_token().as_deref(), Some("at-2"));
    assert_eq!(
        FileSessionStore::new(&file).load().unwrap().map(|s| s.refresh_token).as_deref(),
        Some("rt-2")
    );

    second.sign_out().await.unwrap();
    assert!(!file.exists());
    assert!(second.actor().is_err());
}

#[tokio::test]
async fn rejected_restore_clears_the_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "session expired"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(
        &file,
        json!({
            "access_token": "at-0",
            "refresh_token": "rt-0",
            "expires_at": "2026-01-01T00:00:00Z",
            "user_id": USER_ID,
            "email": "ana@example.com",
        })
        .to_string(),
    )
    .unwrap();

    let context = AuthContext::new(
        Arc::new(GoTrueAuth::new(http(), &server.uri())),
        Arc::new(FileSessionStore::new(&file)),
    );

    assert_eq!(context.restore().await.unwrap(), None);
    assert!(!file.exists());
    assert_eq!(context.role(), Role::Consulta);
}
