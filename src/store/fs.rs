// Key-value storage for the registry, cached API responses and avatars.
// `FsStore` maps keys onto files under the data directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Who may touch a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Readable and writable by everyone (cache files).
    Shared,
    /// Owner only (files holding tokens).
    Private,
}

impl FileMode {
    #[cfg(unix)]
    fn bits(self) -> u32 {
        match self {
            FileMode::Shared => 0o666,
            FileMode::Private => 0o600,
        }
    }
}

/// Storage port used by the registry, the cache and the pipeline.
pub trait Store {
    /// Read a value, `None` if the key does not exist.
    fn read(&self, key: &Path) -> Result<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one.
    fn write(&self, key: &Path, bytes: &[u8], mode: FileMode) -> Result<()>;

    /// Whether a value exists under `key`.
    fn exists(&self, key: &Path) -> bool;

    /// Make sure a directory-like prefix exists.
    fn ensure_dir(&self, key: &Path) -> Result<()>;

    /// Location handed to the launcher for a key (e.g. an icon path).
    fn locate(&self, key: &Path) -> PathBuf;
}

/// Read and decode a JSON value.
pub fn read_json<T: DeserializeOwned>(store: &impl Store, key: &Path) -> Result<Option<T>> {
    match store.read(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub fn write_json<T: Serialize + ?Sized>(
    store: &impl Store,
    key: &Path,
    value: &T,
    mode: FileMode,
) -> Result<()> {
    let json = serde_json::to_vec(value)?;
    store.write(key, &json, mode)
}

/// Filesystem store rooted at the data directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Store for FsStore {
    fn read(&self, key: &Path) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn write(&self, key: &Path, bytes: &[u8], mode: FileMode) -> Result<()> {
        let path = self.root.join(key);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        set_mode(&temp_path, mode)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn exists(&self, key: &Path) -> bool {
        self.root.join(key).exists()
    }

    fn ensure_dir(&self, key: &Path) -> Result<()> {
        fs::create_dir_all(self.root.join(key))?;
        Ok(())
    }

    fn locate(&self, key: &Path) -> PathBuf {
        self.root.join(key)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: FileMode) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: FileMode) -> Result<()> {
    Ok(())
}
