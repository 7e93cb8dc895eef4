//! Auth service client and session persistence

pub mod gotrue;
pub mod session_file;

pub use gotrue::GoTrueAuth;
pub use session_file::FileSessionStore;
