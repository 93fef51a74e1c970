//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Entry id not present in the cached list
    #[error("Entry not found: {id}")]
    EntryNotFound { id: String },

    /// Form input failed a required-field check
    #[error("{0}")]
    Validation(String),
}
