//! Error handling and exit codes.

use repool_core::error::PoolError;
use repool_persist::error::SaveError;

/// Process exit codes.
pub mod exit_codes {
    /// Generic failure.
    pub const ERROR_GENERIC: i32 = 1;
    /// A named save was missing.
    pub const ERROR_NOT_FOUND: i32 = 2;
    /// Pool or profile configuration mistake.
    pub const ERROR_CONFIG: i32 = 4;
}

/// Map an error chain to the appropriate exit code.
pub fn handle_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<PoolError>().is_some() {
        return exit_codes::ERROR_CONFIG;
    }
    match err.downcast_ref::<SaveError>() {
        Some(SaveError::NotFound(_)) => exit_codes::ERROR_NOT_FOUND,
        Some(_) | None => exit_codes::ERROR_GENERIC,
    }
}
