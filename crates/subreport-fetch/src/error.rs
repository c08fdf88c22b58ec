//! Fetch error types.

use thiserror::Error;

/// Longest slice of an HTTP error body kept in the error message.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when fetching submissions from the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", body_excerpt(.body))]
    Http { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),

    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

/// First line of `body`, truncated, so error messages stay on one line.
fn body_excerpt(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty());
    match line {
        None => "<empty body>".to_string(),
        Some(line) if line.chars().count() > BODY_EXCERPT_CHARS => {
            let cut: String = line.chars().take(BODY_EXCERPT_CHARS).collect();
            format!("{cut}...")
        }
        Some(line) => line.to_string(),
    }
}
