//! Error types for the warehouse analytics engine.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for analytics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for analytics operations
///
/// Insufficient data is deliberately not represented here: components
/// return empty or zero results for windows that are too small, so
/// callers can tell "no signal" from a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown metric identifier
    #[error("Metric not found: {0}")]
    NotFound(Uuid),

    /// Invalid input (forecast horizon over the cap, malformed time range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Optimistic-lock version mismatch on a concurrent update
    #[error("Version conflict for metric {id}: expected {expected}, found {found}")]
    Conflict {
        id: Uuid,
        expected: u64,
        found: u64,
    },

    /// Backing metric store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Search index failure; callers catch this and fall back to the store
    #[error("Search index error: {0}")]
    SearchIndex(String),

    /// Report or CSV rendering failure
    #[error("Export error: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::new_v4();
        let err = Error::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));

        let err = Error::Validation("horizon too long".to_string());
        assert!(err.to_string().contains("horizon too long"));
    }

    #[test]
    fn test_conflict_display() {
        let id = Uuid::new_v4();
        let err = Error::Conflict {
            id,
            expected: 2,
            found: 3,
        };
        let message = err.to_string();
        assert!(message.contains("expected 2"));
        assert!(message.contains("found 3"));
    }
}
