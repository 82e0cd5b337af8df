//! Error type for pool operations.

/// Error type for pool operations.
///
/// Only configuration mistakes surface here. Releases of tickets the pool
/// does not hold are absorbed as diagnostics, not errors.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Explicit `warm` called for a key whose pool already exists.
    #[error("pool for key `{0}` has already been created")]
    PoolExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_exists_message_names_the_key() {
        let err = PoolError::PoolExists(String::from("\"enemy\""));
        assert!(err.to_string().contains("enemy"));
        assert!(err.to_string().contains("already been created"));
    }
}
