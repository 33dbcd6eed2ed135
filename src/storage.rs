// src/storage.rs
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix shared by every key this crate persists.
pub const STORAGE_PREFIX: &str = "swtracker:";

const STORAGE_FILE_NAME: &str = "stores.json";
const APP_DATA_DIR: &str = "swtracker";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine application data directory.")]
    CannotDetermineDataDir,
    #[error("I/O error accessing storage file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Synchronous key-value persistence seam.
///
/// Mirrors the contract the stores were written against: reads never fail (a
/// key is present or it is not), writes and removals may. Values are plain
/// text; callers own the serialization. Foreign backends map their failures
/// through [`Error::Backend`].
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be written to the medium.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// # Errors
    /// Returns an error if the removal cannot be written to the medium.
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

pub(crate) fn storage_key(suffix: &str) -> String {
    format!("{STORAGE_PREFIX}{suffix}")
}

/// In-process backend with no durability. Used by tests and by hosts that
/// want the stores without a real storage medium behind them.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

/// File-backed storage: one JSON object mapping keys to string values,
/// rewritten in full on every mutation.
pub struct FileStorage {
    path: PathBuf,
    cache: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the storage file at `path`, starting empty when the file does
    /// not exist yet.
    ///
    /// # Errors
    /// Returns `Error::Io` if an existing file cannot be read, or
    /// `Error::Encode` if its contents are not a JSON string-to-string map.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            tracing::debug!(path = %path.display(), "storage file absent, starting empty");
            BTreeMap::new()
        };
        Ok(Self {
            path,
            cache: RefCell::new(cache),
        })
    }

    /// Opens the storage file in the platform data directory (e.g.
    /// `~/.local/share/swtracker/stores.json` on Linux), creating the
    /// directory if needed.
    ///
    /// # Errors
    /// Returns `Error::CannotDetermineDataDir` if the platform data directory
    /// cannot be resolved, otherwise the same errors as [`FileStorage::open`].
    pub fn open_default() -> Result<Self, Error> {
        let data_dir = dirs::data_dir().ok_or(Error::CannotDetermineDataDir)?;
        let app_dir = data_dir.join(APP_DATA_DIR);
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }
        Self::open(app_dir.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(&*self.cache.borrow())?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.cache
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.cache.borrow_mut().remove(key);
        self.flush()
    }
}
