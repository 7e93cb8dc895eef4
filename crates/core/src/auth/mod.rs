//! Signed-in session and role

pub mod context;
pub mod ports;

pub use context::AuthContext;
pub use ports::*;
