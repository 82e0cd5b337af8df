//! Profile persistence (save/load/delete).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SaveError;
use crate::profile::SaveProfile;

const CONFIG_DIR_NAME: &str = "repool";
const SAVE_DIR_NAME: &str = "saves";

/// Directory-backed store of named save profiles, one JSON file per profile.
#[derive(Debug, Clone)]
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    /// Store rooted at an explicit directory. The directory is created on
    /// the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at the standard location: the XDG config dir, falling back to
    /// a dot-directory under the working directory.
    #[must_use]
    pub fn default_location() -> Self {
        let root = xdg_save_root().unwrap_or_else(|| PathBuf::from(".repool-saves"));
        Self { root }
    }

    /// Directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a profile, overwriting any previous save under the same name.
    pub fn save<T: Serialize>(&self, profile: &SaveProfile<T>) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(&profile.name);
        let content = serde_json::to_string_pretty(profile)?;
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "saved profile");
        Ok(())
    }

    /// Read a profile back. A name that was never saved is a
    /// [`SaveError::NotFound`], not a crash.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<SaveProfile<T>, SaveError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(SaveError::NotFound(name.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        let profile = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), "loaded profile");
        Ok(profile)
    }

    /// Remove a saved profile. Deleting a name that was never saved is a
    /// [`SaveError::NotFound`].
    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(SaveError::NotFound(name.to_string()));
        }
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "deleted profile");
        Ok(())
    }

    /// Whether a profile is currently saved under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

/// XDG config directory for saves: `$XDG_CONFIG_HOME` or `~/.config`.
fn xdg_save_root() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        })?;

    Some(config_dir.join(CONFIG_DIR_NAME).join(SAVE_DIR_NAME))
}
