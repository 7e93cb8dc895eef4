//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for OpsBoard
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OpsBoardError {
    /// Required-field, cross-field or filter checks failed before any remote call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Spreadsheet contents could not be mapped to records.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The backend rejected the request.
    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The spreadsheet codec failed to read or write a workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OpsBoardError {
    /// Build a validation error from anything displayable.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a malformed-input error prefixed with the 1-based sheet row.
    pub fn malformed_row(row: usize, message: impl std::fmt::Display) -> Self {
        Self::MalformedInput(format!("row {row}: {message}"))
    }

    /// True for errors raised locally before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MalformedInput(_))
    }
}

/// Result type alias for OpsBoard operations
pub type Result<T> = std::result::Result<T, OpsBoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_and_message() {
        let err = OpsBoardError::Validation("cycle is required".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Validation");
        assert_eq!(json["message"], "cycle is required");
    }

    #[test]
    fn malformed_row_prefixes_row_number() {
        let err = OpsBoardError::malformed_row(3, "invalid JSON in \"paquetes\"");
        assert_eq!(err.to_string(), "Malformed input: row 3: invalid JSON in \"paquetes\"");
        assert!(err.is_input_error());
        assert!(!OpsBoardError::Network("down".into()).is_input_error());
    }
}
