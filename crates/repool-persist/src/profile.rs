//! Named, versioned save profile (serializable).

use serde::{Deserialize, Serialize};

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// One named save: a version stamp, the profile name, and the payload.
///
/// The payload is whatever the host wants persisted; the store only asks
/// that it round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfile<T> {
    /// Profile format version for compatibility checking.
    pub version: u32,
    /// Name the profile is stored under.
    pub name: String,
    /// The saved payload.
    pub data: T,
}

impl<T> SaveProfile<T> {
    /// Create a profile at the current format version.
    pub fn new(name: impl Into<String>, data: T) -> Self {
        Self {
            version: PROFILE_VERSION,
            name: name.into(),
            data,
        }
    }

    /// Check if this profile was written at the current format version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == PROFILE_VERSION
    }
}
