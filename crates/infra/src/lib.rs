//! # OpsBoard Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The shared HTTP client (timeouts, retries for reads)
//! - The PostgREST table store and the GoTrue auth client
//! - File-backed session persistence
//! - The `.xlsx` spreadsheet codec
//! - Configuration loading from the environment or a file
//!
//! ## Architecture
//! - Implements traits defined in `opsboard-core`
//! - Contains all "impure" code (network, filesystem, spreadsheet files)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod rest;
pub mod spreadsheet;

// Re-export commonly used items
pub use auth::{FileSessionStore, GoTrueAuth};
pub use errors::InfraError;
pub use http::HttpClient;
pub use rest::{AccessTokenProvider, RestRecordStore};
pub use spreadsheet::XlsxCodec;
