//! Logging and command execution helpers

pub mod command_helpers;
pub mod logging;

pub use command_helpers::execute_logged;
pub use logging::{error_label, init_tracing, log_command_execution};
