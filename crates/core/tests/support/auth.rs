//! Mock auth service and session store

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use opsboard_core::{AuthPort, SessionStore};
use opsboard_domain::{OpsBoardError, Result, Session};
use parking_lot::Mutex;
use uuid::Uuid;

pub fn session(email: &str, refresh_token: &str) -> Session {
    Session {
        access_token: format!("access-{refresh_token}"),
        refresh_token: refresh_token.to_string(),
        expires_at: Utc.with_ymd_and_hms(2026, 2, 14, 12, 0, 0).unwrap() + Duration::hours(1),
        user_id: Uuid::from_u128(42),
        email: email.to_string(),
    }
}

/// Auth service accepting one password and one refresh token.
#[derive(Clone)]
pub struct MockAuth {
    password: String,
    valid_refresh: String,
    role: Option<String>,
    role_lookup_fails: bool,
    signed_out: Arc<Mutex<Vec<String>>>,
}

impl Default for MockAuth {
    fn default() -> Self {
        Self {
            password: "secreto".into(),
            valid_refresh: "refresh-1".into(),
            role: Some("admin".into()),
            role_lookup_fails: false,
            signed_out: Arc::default(),
        }
    }
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: Option<&str>) -> Self {
        self.role = role.map(str::to_string);
        self
    }

    pub fn with_failing_role_lookup(mut self) -> Self {
        self.role_lookup_fails = true;
        self
    }

    /// Access tokens revoked so far.
    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().clone()
    }
}

#[async_trait]
impl AuthPort for MockAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if password == self.password {
            Ok(session(email, &self.valid_refresh))
        } else {
            Err(OpsBoardError::Auth("invalid credentials".into()))
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        if refresh_token == self.valid_refresh {
            Ok(session("restored@example.com", "refresh-2"))
        } else {
            Err(OpsBoardError::Auth("refresh token expired".into()))
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.signed_out.lock().push(session.access_token.clone());
        Ok(())
    }

    async fn fetch_role(&self, _session: &Session) -> Result<Option<String>> {
        if self.role_lookup_fails {
            return Err(OpsBoardError::Network("profiles unreachable".into()));
        }
        Ok(self.role.clone())
    }
}

/// Session store kept in memory.
#[derive(Default, Clone)]
pub struct MemorySessionStore {
    saved: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self { saved: Arc::new(Mutex::new(Some(session))) }
    }

    pub fn saved(&self) -> Option<Session> {
        self.saved.lock().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.saved.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.saved.lock() = None;
        Ok(())
    }
}
