//! # Filesystem-backed key/value store
//!
//! [`FileStorage`] keeps each key in its own file under a base directory. It
//! is used on desktop and mobile, where there is no browser `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>              # raw value
//! ```
//!
//! ## Platform data directories
//!
//! [`FileStorage::in_data_dir`] resolves the base via [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/<app>/` |
//! | Linux | `~/.local/share/<app>/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\<app>\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::kv::{KeyValueStore, StorageError};

#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Store under the platform data directory, if the platform has one.
    pub fn in_data_dir(app: &str) -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join(app)))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base.join(key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key).ok()?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)?) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("safestock"));

        assert!(storage.get("user").is_none());
        storage.set("user", r#"{"id":"1"}"#).unwrap();

        let reopened = FileStorage::new(dir.path().join("safestock"));
        assert_eq!(reopened.get("user").as_deref(), Some(r#"{"id":"1"}"#));

        reopened.remove("user").unwrap();
        assert!(storage.get("user").is_none());
        reopened.remove("user").unwrap();
    }

    #[test]
    fn test_keys_cannot_escape_the_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../user", "a/b", ".hidden"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
            assert!(storage.get(key).is_none());
        }
    }
}
