//! Sign-in, sign-out and identity commands

use opsboard_domain::{Actor, Result};
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;
use crate::utils::execute_logged;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedOut {
    pub signed_out: bool,
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<Actor> {
    execute_logged("session::login", "-", ctx.auth.sign_in(email, password)).await
}

/// Revoke the persisted session. Succeeds when nobody is signed in.
pub async fn logout(ctx: &AppContext) -> Result<SignedOut> {
    execute_logged("session::logout", "-", async {
        if let Err(err) = ctx.auth.restore().await {
            warn!(error = %err, "Could not resume session before signing out");
        }
        ctx.auth.sign_out().await?;
        Ok(SignedOut { signed_out: true })
    })
    .await
}

/// `None` when signed out.
pub async fn whoami(ctx: &AppContext) -> Result<Option<Actor>> {
    execute_logged("session::whoami", "-", async { Ok(ctx.session().await) }).await
}
