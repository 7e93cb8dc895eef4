//! Port interfaces for authentication

use async_trait::async_trait;
use opsboard_domain::{Result, Session};

/// Trait for the remote auth service
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchange credentials for a session; `Auth("invalid credentials")` on
    /// rejection
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Exchange a refresh token for a new session
    async fn refresh(&self, refresh_token: &str) -> Result<Session>;

    /// Revoke the session remotely
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Raw role value from the user's profile row, if any
    async fn fetch_role(&self, session: &Session) -> Result<Option<String>>;
}

/// Trait for persisting the session between runs
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;

    fn save(&self, session: &Session) -> Result<()>;

    /// Remove any persisted session; succeeds when there is none
    fn clear(&self) -> Result<()>;
}
