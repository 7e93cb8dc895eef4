//! # OpsBoard App
//!
//! Application layer - commands and the `opsboard` entry point.
//!
//! This crate contains:
//! - The command-line interface (clap)
//! - Command functions with structured execution logging
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Prints command results as JSON on stdout; logs go to stderr

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::{Cli, Command};
pub use commands::dispatch;
pub use context::AppContext;
