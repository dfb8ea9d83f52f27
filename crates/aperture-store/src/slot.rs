//! Key-value slot backends
//!
//! The image store persists through a minimal boundary: read a key, write
//! a key. `MemorySlot` keeps values in process; `FileSlot` keeps one file
//! per key under a data directory.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;

use aperture_core::{ApertureError, ApertureResult};

/// Minimal key-value boundary beneath the image store.
#[async_trait]
pub trait SlotBackend: Send + Sync {
    /// Read a key, `None` when it was never written.
    async fn read(&self, key: &str) -> ApertureResult<Option<String>>;

    /// Write a key, overwriting any previous value.
    async fn write(&self, key: &str, value: &str) -> ApertureResult<()>;
}

/// In-process slot backend.
#[derive(Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }
}

#[async_trait]
impl SlotBackend for MemorySlot {
    async fn read(&self, key: &str) -> ApertureResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> ApertureResult<()> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One-file-per-key slot backend under a data directory.
///
/// The directory is created on first write. A missing file reads as an
/// empty slot, not an error.
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl SlotBackend for FileSlot {
    async fn read(&self, key: &str) -> ApertureResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ApertureError::Persistence(err.to_string())),
        }
    }

    async fn write(&self, key: &str, value: &str) -> ApertureResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ApertureError::Persistence(e.to_string()))?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| ApertureError::Persistence(e.to_string()))
    }
}
