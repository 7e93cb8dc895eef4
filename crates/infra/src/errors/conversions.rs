//! Conversions from external infrastructure errors into domain errors.

use opsboard_domain::OpsBoardError;
use reqwest::{Error as HttpError, StatusCode};
use serde::Deserialize;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OpsBoardError);

impl From<InfraError> for OpsBoardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OpsBoardError> for InfraError {
    fn from(value: OpsBoardError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoOpsBoardError {
    fn into_opsboard(self) -> OpsBoardError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → OpsBoardError */
/* -------------------------------------------------------------------------- */

impl IntoOpsBoardError for HttpError {
    fn into_opsboard(self) -> OpsBoardError {
        if self.is_timeout() {
            return OpsBoardError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return OpsBoardError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return OpsBoardError::Remote(format!("unreadable response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, "");
        }

        OpsBoardError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_opsboard())
    }
}

/* -------------------------------------------------------------------------- */
/* HTTP status → OpsBoardError */
/* -------------------------------------------------------------------------- */

/// Error body returned by the REST and auth services
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl ErrorBody {
    fn summary(self) -> Option<String> {
        let head = self.message.or(self.error_description).or(self.msg)?;
        Some(match self.details.or(self.hint) {
            Some(detail) if !detail.is_empty() => format!("{head} ({detail})"),
            _ => head,
        })
    }
}

/// Map a non-success response to a domain error. The message comes from the
/// JSON error body when there is one, the raw body or status line otherwise.
pub fn status_error(status: StatusCode, body: &str) -> OpsBoardError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::summary)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| {
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )
        });

    match status.as_u16() {
        401 | 403 => OpsBoardError::Auth(message),
        404 => OpsBoardError::NotFound(message),
        400..=499 => OpsBoardError::Remote(message),
        _ => OpsBoardError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Spreadsheet and file errors → OpsBoardError */
/* -------------------------------------------------------------------------- */

impl IntoOpsBoardError for calamine::Error {
    fn into_opsboard(self) -> OpsBoardError {
        OpsBoardError::Spreadsheet(format!("cannot read workbook: {self}"))
    }
}

impl From<calamine::Error> for InfraError {
    fn from(value: calamine::Error) -> Self {
        InfraError(value.into_opsboard())
    }
}

impl IntoOpsBoardError for rust_xlsxwriter::XlsxError {
    fn into_opsboard(self) -> OpsBoardError {
        OpsBoardError::Spreadsheet(format!("cannot write workbook: {self}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for InfraError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        InfraError(value.into_opsboard())
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(OpsBoardError::Internal(format!("I/O error: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(OpsBoardError::Internal(format!("JSON error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
