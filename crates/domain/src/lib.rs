//! # OpsBoard Domain
//!
//! Business domain types and models for OpsBoard.
//!
//! This crate contains:
//! - Dynamic table rows (`Record`) and the schema descriptors that type them
//! - Filters, paging, sessions, roles and aggregate output types
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//! - Date and header-text helpers shared by import and export
//!
//! ## Architecture
//! - No dependencies on other OpsBoard crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
