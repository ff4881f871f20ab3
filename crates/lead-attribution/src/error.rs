//! Error types for session storage

/// Session storage failures
///
/// These never escape attribution capture; callers log and continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or inaccessible
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// Storage refused the write
    #[error("session storage quota exceeded")]
    QuotaExceeded,
}
