//! Signed-in session, role and acting user

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{OpsBoardError, Result};

/// Tokens issued by the auth service for one signed-in user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish()
    }
}

/// Coarse permission level read from the user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Read and create only
    #[default]
    Consulta,
}

crate::impl_domain_status_conversions!(Role {
    Admin => "admin",
    Consulta => "consulta",
});

impl Role {
    /// Resolve a profile value; missing or unknown roles are `Consulta`.
    pub fn from_profile(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The signed-in user performing a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, email: impl Into<String>, role: Role) -> Self {
        Self { user_id, email: email.into(), role }
    }

    /// Fail with an `Auth` error unless this actor is an admin.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(OpsBoardError::Auth(format!("{action} requires the admin role")))
        }
    }
}
