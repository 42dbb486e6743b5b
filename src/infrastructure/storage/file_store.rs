//! File-backed key-value store persisting across sessions.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::errors::StoreError;
use crate::domain::ports::KeyValueStorePort;

const STORE_FILE_NAME: &str = "local_storage.json";

/// Key-value store kept in a single JSON object on disk.
///
/// The whole map is loaded once and written through on every mutation.
/// Writes go to a temporary file that is then renamed over the target.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`, creating parent directories.
    ///
    /// A missing file starts an empty store; an unreadable or malformed one
    /// is logged and replaced on the next write.
    ///
    /// # Errors
    /// Returns error if the parent directory cannot be created.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Malformed store file, starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read store file, starting empty");
                HashMap::new()
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened key-value store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store in the default cache location.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created.
    pub fn default_location() -> Result<Self, StoreError> {
        Self::open(default_store_path())
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let content = serde_json::to_string(entries)?;

        let parent = self
            .path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid store path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// Returns the default store file path.
fn default_store_path() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront").map_or_else(
        || {
            std::env::temp_dir()
                .join("storefront")
                .join("cache")
                .join(STORE_FILE_NAME)
        },
        |dirs| dirs.cache_dir().join(STORE_FILE_NAME),
    )
}
