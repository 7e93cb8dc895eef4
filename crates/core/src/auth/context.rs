//! Process-wide authentication context
//!
//! Built once at startup and shared by every command. Holds the current
//! session and the role resolved for it; the lock is never held across an
//! `.await`.

use std::sync::Arc;

use opsboard_domain::{Actor, OpsBoardError, Result, Role, Session};
use parking_lot::RwLock;
use tracing::{info, warn};

use super::ports::{AuthPort, SessionStore};

#[derive(Clone)]
struct SignedIn {
    session: Session,
    role: Role,
}

/// Current session, role and the ports that manage them
pub struct AuthContext {
    auth: Arc<dyn AuthPort>,
    sessions: Arc<dyn SessionStore>,
    state: RwLock<Option<SignedIn>>,
}

impl AuthContext {
    pub fn new(auth: Arc<dyn AuthPort>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { auth, sessions, state: RwLock::new(None) }
    }

    /// Resume the persisted session, if any.
    ///
    /// The stored refresh token is exchanged for a fresh session. When the
    /// auth service rejects it the persisted session is discarded and the
    /// context stays signed out.
    pub async fn restore(&self) -> Result<Option<Actor>> {
        let Some(stored) = self.sessions.load()? else {
            return Ok(None);
        };
        let session = match self.auth.refresh(&stored.refresh_token).await {
            Ok(session) => session,
            Err(OpsBoardError::Auth(reason)) => {
                warn!(%reason, "Stored session rejected; signing out");
                self.sessions.clear()?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        Ok(Some(self.establish(session).await?))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Actor> {
        let session = self.auth.sign_in(email, password).await?;
        let actor = self.establish(session).await?;
        info!(user_id = %actor.user_id, role = %actor.role, "Signed in");
        Ok(actor)
    }

    /// Forget the session locally and on disk. The remote revoke is best
    /// effort.
    pub async fn sign_out(&self) -> Result<()> {
        let previous = self.state.write().take();
        if let Some(signed_in) = previous {
            if let Err(err) = self.auth.sign_out(&signed_in.session).await {
                warn!(error = %err, "Remote sign-out failed; clearing local session anyway");
            }
        }
        self.sessions.clear()
    }

    async fn establish(&self, session: Session) -> Result<Actor> {
        let role = match self.auth.fetch_role(&session).await {
            Ok(raw) => Role::from_profile(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "Role lookup failed; using default role");
                Role::default()
            }
        };
        self.sessions.save(&session)?;
        let actor = Actor::new(session.user_id, session.email.clone(), role);
        *self.state.write() = Some(SignedIn { session, role });
        Ok(actor)
    }

    pub fn current(&self) -> Option<Session> {
        self.state.read().as_ref().map(|s| s.session.clone())
    }

    /// Role of the signed-in user; `consulta` when signed out.
    pub fn role(&self) -> Role {
        self.state.read().as_ref().map_or_else(Role::default, |s| s.role)
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().as_ref().map(|s| s.session.access_token.clone())
    }

    /// The signed-in user, or an `Auth` error.
    pub fn actor(&self) -> Result<Actor> {
        self.state
            .read()
            .as_ref()
            .map(|s| Actor::new(s.session.user_id, s.session.email.clone(), s.role))
            .ok_or_else(|| OpsBoardError::Auth("not signed in".into()))
    }
}
