//! # Filesystem-backed key-value store
//!
//! [`FileStore`] keeps each key in its own small file so a native build keeps
//! the session across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session/
//!     ├── accessToken
//!     ├── refreshToken
//!     └── userRole
//! ```
//!
//! Use [`dirs::data_dir()`] joined with `bloodlink` as the base on desktop.
//! I/O failures are swallowed: an unreadable file reads as absent, which the
//! session layer treats as "not logged in".

use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn session_dir(&self) -> PathBuf {
        self.base.join("session")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.session_dir().join(file_name)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::SessionStorage;
    use crate::models::{Credential, Role};

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let storage = SessionStorage::new(FileStore::new(dir.path().to_path_buf()));
        storage
            .save(&Credential::new("access-1", "refresh-1", Some(Role::Donor)))
            .await;

        let reopened = SessionStorage::new(FileStore::new(dir.path().to_path_buf()));
        let credential = reopened.load().await.unwrap();
        assert_eq!(credential.access, "access-1");
        assert_eq!(credential.role, Some(Role::Donor));

        reopened.clear().await;
        assert!(storage.load().await.is_none());
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.set("../outside", "x").await;
        assert_eq!(store.get("../outside").await.as_deref(), Some("x"));
        assert!(dir.path().join("session").join("___outside").exists());
    }
}
