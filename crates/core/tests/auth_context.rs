//! Integration tests for `AuthContext`

mod support;

use std::sync::Arc;

use opsboard_core::AuthContext;
use opsboard_domain::{OpsBoardError, Role};
use support::auth::{session, MemorySessionStore, MockAuth};

fn context(auth: &MockAuth, sessions: &MemorySessionStore) -> AuthContext {
    AuthContext::new(Arc::new(auth.clone()), Arc::new(sessions.clone()))
}

#[tokio::test]
async fn sign_in_resolves_role_and_persists_session() {
    let auth = MockAuth::new();
    let sessions = MemorySessionStore::default();
    let ctx = context(&auth, &sessions);

    let actor = ctx.sign_in("ana@example.com", "secreto").await.unwrap();

    assert_eq!(actor.role, Role::Admin);
    assert_eq!(ctx.role(), Role::Admin);
    assert_eq!(ctx.actor().unwrap().email, "ana@example.com");
    assert_eq!(sessions.saved().unwrap().refresh_token, "refresh-1");
}

#[tokio::test]
async fn wrong_password_leaves_context_signed_out() {
    let sessions = MemorySessionStore::default();
    let ctx = context(&MockAuth::new(), &sessions);

    let err = ctx.sign_in("ana@example.com", "otra").await.unwrap_err();

    assert_eq!(err, OpsBoardError::Auth("invalid credentials".into()));
    assert!(ctx.current().is_none());
    assert!(matches!(ctx.actor(), Err(OpsBoardError::Auth(_))));
    assert!(sessions.saved().is_none());
}

#[tokio::test]
async fn missing_or_failed_role_lookup_defaults_to_consulta() {
    let sessions = MemorySessionStore::default();

    let no_profile = context(&MockAuth::new().with_role(None), &sessions);
    assert_eq!(no_profile.sign_in("a@example.com", "secreto").await.unwrap().role, Role::Consulta);

    let failing = context(&MockAuth::new().with_failing_role_lookup(), &sessions);
    assert_eq!(failing.sign_in("a@example.com", "secreto").await.unwrap().role, Role::Consulta);
    assert!(failing.access_token().is_some());
}

#[tokio::test]
async fn restore_refreshes_the_stored_session() {
    let sessions = MemorySessionStore::with_session(session("ana@example.com", "refresh-1"));
    let ctx = context(&MockAuth::new(), &sessions);

    let actor = ctx.restore().await.unwrap().unwrap();

    assert_eq!(actor.email, "restored@example.com");
    assert_eq!(sessions.saved().unwrap().refresh_token, "refresh-2");
}

#[tokio::test]
async fn rejected_stored_session_is_discarded() {
    let sessions = MemorySessionStore::with_session(session("ana@example.com", "stale"));
    let ctx = context(&MockAuth::new(), &sessions);

    assert!(ctx.restore().await.unwrap().is_none());
    assert!(sessions.saved().is_none());
    assert_eq!(ctx.role(), Role::Consulta);
}

#[tokio::test]
async fn restore_without_a_stored_session_is_a_no_op() {
    let ctx = context(&MockAuth::new(), &MemorySessionStore::default());
    assert!(ctx.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_out_revokes_and_clears() {
    let auth = MockAuth::new();
    let sessions = MemorySessionStore::default();
    let ctx = context(&auth, &sessions);
    ctx.sign_in("ana@example.com", "secreto").await.unwrap();

    ctx.sign_out().await.unwrap();

    assert_eq!(auth.signed_out(), vec!["access-refresh-1".to_string()]);
    assert!(sessions.saved().is_none());
    assert!(ctx.current().is_none());
}
