//! Error type for save/load operations.

/// Error type for save/load operations.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Load or delete of a profile that was never saved. Distinguishable so
    /// callers can treat a missing save as "start fresh" instead of a crash.
    #[error("save data `{0}` does not exist")]
    NotFound(String),

    /// Filesystem failure underneath the store.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file exists but does not decode as a profile.
    #[error("malformed save data: {0}")]
    Format(#[from] serde_json::Error),
}
