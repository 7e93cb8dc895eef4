//! Remote table service (PostgREST)

pub mod query;
pub mod store;

use opsboard_core::AuthContext;

pub use store::RestRecordStore;

/// Source of the bearer token sent with table requests
pub trait AccessTokenProvider: Send + Sync {
    /// The signed-in user's access token; `None` falls back to the anon key.
    fn access_token(&self) -> Option<String>;
}

impl AccessTokenProvider for AuthContext {
    fn access_token(&self) -> Option<String> {
        AuthContext::access_token(self)
    }
}
