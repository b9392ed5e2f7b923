// In-memory store for tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

use super::fs::{FileMode, Store};

#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<HashSet<PathBuf>>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn insert(&self, key: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(key.into(), bytes.into());
    }

    pub fn get(&self, key: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(key.as_ref()).cloned()
    }

    pub fn has_dir(&self, key: impl AsRef<Path>) -> bool {
        self.dirs.borrow().contains(key.as_ref())
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &Path, bytes: &[u8], _mode: FileMode) -> Result<()> {
        if self.read_only.get() {
            return Err(LauncherError::Other(format!(
                "read-only store: {}",
                key.display()
            )));
        }
        self.insert(key, bytes);
        Ok(())
    }

    fn exists(&self, key: &Path) -> bool {
        self.files.borrow().contains_key(key) || self.dirs.borrow().contains(key)
    }

    fn ensure_dir(&self, key: &Path) -> Result<()> {
        if self.read_only.get() {
            return Err(LauncherError::Other(format!(
                "read-only store: {}",
                key.display()
            )));
        }
        self.dirs.borrow_mut().insert(key.to_path_buf());
        Ok(())
    }

    fn locate(&self, key: &Path) -> PathBuf {
        key.to_path_buf()
    }
}
