//! Report building error types.

use thiserror::Error;

/// Errors that can occur while turning a raw payload into a [`Report`].
///
/// [`Report`]: crate::model::Report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The payload, or one of its records, lacks a required field or has the
    /// wrong shape. `record` is the zero-based index of the offending record,
    /// `None` when the envelope itself is malformed.
    #[error("malformed payload{}: {reason}", record_suffix(.record))]
    MalformedPayload {
        record: Option<usize>,
        reason: String,
    },

    /// The API answered with `"success": false`.
    #[error("API returned error: {0}")]
    Rejected(String),

    /// The requested date window ends before it starts.
    #[error("invalid date window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },
}

fn record_suffix(record: &Option<usize>) -> String {
    match record {
        Some(index) => format!(" (record {index})"),
        None => String::new(),
    }
}

impl ReportError {
    /// Shorthand for a malformed-record error.
    pub fn malformed(record: usize, reason: impl Into<String>) -> Self {
        ReportError::MalformedPayload {
            record: Some(record),
            reason: reason.into(),
        }
    }

    /// Shorthand for a malformed-envelope error.
    pub fn malformed_envelope(reason: impl Into<String>) -> Self {
        ReportError::MalformedPayload {
            record: None,
            reason: reason.into(),
        }
    }
}
