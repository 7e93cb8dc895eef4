use std::time::Duration;

use opsboard_domain::{LogFormat, LoggingConfig, OpsBoardError};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
///
/// Logs are written to stderr; stdout carries command output only. Calling
/// this twice is harmless: the second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => {
            registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
        }
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"records::list"`).
/// * `domain` - Table the command ran against, or `"-"` for session commands.
/// * `elapsed` - Duration the command execution took.
/// * `error` - Stable label of the failure, `None` on success.
#[inline]
pub fn log_command_execution(
    command: &str,
    domain: &str,
    elapsed: Duration,
    error: Option<&'static str>,
) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, domain, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, domain, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert an `OpsBoardError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &OpsBoardError) -> &'static str {
    match error {
        OpsBoardError::Validation(_) => "validation",
        OpsBoardError::MalformedInput(_) => "malformed_input",
        OpsBoardError::Remote(_) => "remote",
        OpsBoardError::Network(_) => "network",
        OpsBoardError::Auth(_) => "auth",
        OpsBoardError::NotFound(_) => "not_found",
        OpsBoardError::Config(_) => "config",
        OpsBoardError::Spreadsheet(_) => "spreadsheet",
        OpsBoardError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&OpsBoardError::validation("x")), "validation");
        assert_eq!(error_label(&OpsBoardError::NotFound("x".into())), "not_found");
        assert_eq!(error_label(&OpsBoardError::Network("x".into())), "network");
    }
}
