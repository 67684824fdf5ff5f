use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

/// File name of the key/value store inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Error type for storage writes
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize storage: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Durable string key/value storage, modelled on browser `localStorage`.
/// Reads never fail; a write either lands completely or returns an error.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Storage backed by a single JSON object file (`{"key": "value", ...}`)
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: IndexMap<String, String>,
}

impl FileStorage {
    /// Open `<dir>/storage.json`. A missing file is an empty store; a corrupt
    /// one is backed up as `.bak` and treated as empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let items = read_items(&path);
        FileStorage { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_items(path: &Path) -> IndexMap<String, String> {
    let content = match fs::read(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return IndexMap::new(),
        Err(e) => {
            back_up(path, &format!("could not read storage file: {}", e));
            return IndexMap::new();
        }
    };
    // Bytes, not a String: invalid UTF-8 is just another parse failure
    match serde_json::from_slice(&content) {
        Ok(items) => items,
        Err(e) => {
            back_up(path, &format!("could not parse storage file: {}", e));
            IndexMap::new()
        }
    }
}

/// Keep a copy of an unusable storage file before the next write replaces it
fn back_up(path: &Path, reason: &str) {
    let bak = path.with_extension("json.bak");
    match fs::copy(path, &bak) {
        Ok(_) => tracing::warn!(
            path = %path.display(),
            backup = %bak.display(),
            "{}, starting empty",
            reason
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            "{}, starting empty (backup failed: {})",
            reason,
            e
        ),
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.items.clone();
        next.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&next)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        self.items = next;
        Ok(())
    }
}

/// Write via temp file + rename so a crash never leaves a half-written file
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Non-durable storage, for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: IndexMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
