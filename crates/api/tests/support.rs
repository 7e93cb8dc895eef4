#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use opsboard_core::Clock;
use opsboard_domain::{BackendConfig, Config, SessionConfig};
use opsboard_lib::{dispatch, AppContext, Cli};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_ID: &str = "0b6f4a8e-5d1c-4b7e-9a43-7c2e1f0d9a10";

pub struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }
}

/// Mock backend, a scratch directory and a context wired to both.
pub struct TestApp {
    pub server: MockServer,
    pub dir: TempDir,
    pub ctx: AppContext,
}

impl TestApp {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("temp dir");
        let ctx = context(&server, &dir);
        Self { server, dir, ctx }
    }

    /// A second process sharing the same backend and session file.
    pub fn restart(&self) -> AppContext {
        context(&self.server, &self.dir)
    }

    pub fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Run an `opsboard` command line against this app.
    pub async fn run(&self, args: &[&str]) -> opsboard_domain::Result<Value> {
        run(&self.ctx, args).await
    }
}

pub async fn run(ctx: &AppContext, args: &[&str]) -> opsboard_domain::Result<Value> {
    let cli = Cli::try_parse_from(std::iter::once("opsboard").chain(args.iter().copied()))
        .expect("valid command line");
    dispatch(ctx, cli.command).await
}

fn context(server: &MockServer, dir: &TempDir) -> AppContext {
    let config = Config {
        backend: BackendConfig {
            url: server.uri(),
            anon_key: "anon".into(),
            timeout_secs: 5,
            max_attempts: 1,
        },
        session: SessionConfig { path: dir.path().join("session.json").display().to_string() },
        ..Config::default()
    };
    AppContext::new(config).expect("context").with_clock(Arc::new(FixedClock))
}

pub fn token_body(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": refresh,
        "user": {"id": USER_ID, "email": "ana@example.com"},
    })
}

/// Password and refresh grants both succeed; the profile carries `role`.
pub async fn mount_auth(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-1", "rt-1")))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-2", "rt-2")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"rol": role}])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}
