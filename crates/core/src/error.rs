//! Error types for the askdesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all askdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Knowledge text errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures from the key-value persistence collaborator.
///
/// Callers above the persistence adapter never see these: every storage
/// failure degrades to "value absent" / "write did not happen" at the
/// adapter boundary.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Validation failures for knowledge-text updates.
///
/// Surfaced synchronously to the committer; the active knowledge text is
/// left unchanged on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("Knowledge text is empty")]
    EmptyInput,

    #[error("Knowledge text is too large: {len} characters (maximum {max})")]
    TooLarge { len: usize, max: usize },
}

/// Failures from the remote completion endpoint.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_displays_correctly() {
        let err = Error::Storage(StorageError::Unavailable("backend offline".into()));
        assert!(err.to_string().contains("backend offline"));
    }

    #[test]
    fn knowledge_error_displays_correctly() {
        let err = Error::Knowledge(KnowledgeError::TooLarge {
            len: 100_001,
            max: 100_000,
        });
        assert!(err.to_string().contains("100001"));
        assert!(err.to_string().contains("100000"));
    }

    #[test]
    fn config_error_displays_correctly() {
        let err = Error::Config {
            message: "unknown language code".into(),
        };
        assert!(err.to_string().contains("unknown language code"));
    }

    #[test]
    fn completion_error_displays_correctly() {
        let err = Error::Completion(CompletionError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }
}
