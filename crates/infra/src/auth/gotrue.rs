//! `AuthPort` over the backend's GoTrue auth service
//!
//! Password and refresh-token grants, logout, and the role lookup against
//! the `profiles` table.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use opsboard_core::AuthPort;
use opsboard_domain::constants::{PROFILES_TABLE, PROFILE_ROLE_COLUMN};
use opsboard_domain::{OpsBoardError, Result, Session};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: TokenUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
            user_id: self.user.id,
            email: self.user.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    rol: Option<String>,
}

/// GoTrue client for one backend project
pub struct GoTrueAuth {
    http: HttpClient,
    base_url: String,
}

impl GoTrueAuth {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session> {
        let request = self
            .http
            .request(Method::POST, format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let response = self.http.send_once(request).await?;
        let status = response.status();
        // GoTrue rejects bad credentials and stale refresh tokens with 400.
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, grant_type, "Token grant rejected");
            return Err(match status_error(status, &body) {
                OpsBoardError::Auth(msg) | OpsBoardError::Remote(msg) => OpsBoardError::Auth(msg),
                other => other,
            });
        }
        parse_json::<TokenResponse>(response).await.map(TokenResponse::into_session)
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    response.json::<T>().await.map_err(|err| InfraError::from(err).into())
}

#[async_trait]
impl AuthPort for GoTrueAuth {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
            .map_err(|err| match err {
                OpsBoardError::Auth(_) => OpsBoardError::Auth("invalid credentials".into()),
                other => other,
            })
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token })).await
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    async fn sign_out(&self, session: &Session) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, format!("{}/auth/v1/logout", self.base_url))
            .bearer_auth(&session.access_token);
        let response = self.http.send_once(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    async fn fetch_role(&self, session: &Session) -> Result<Option<String>> {
        let request = self
            .http
            .request(Method::GET, format!("{}/rest/v1/{PROFILES_TABLE}", self.base_url))
            .query(&[
                ("select", PROFILE_ROLE_COLUMN.to_string()),
                ("id", format!("eq.{}", session.user_id)),
            ])
            .bearer_auth(&session.access_token);
        let rows: Vec<ProfileRow> = parse_json(self.http.send(request).await?).await?;
        Ok(rows.into_iter().next().and_then(|row| row.rol))
    }
}
