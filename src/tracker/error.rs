//! Resource client error types.

/// Errors that can occur while talking to the entries store.
///
/// Callers treat every variant the same way: the request failed.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Transport-level failure or client construction failure
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Failed to deserialize response: {0}")]
    Deserialization(#[from] serde_json::Error),
}
