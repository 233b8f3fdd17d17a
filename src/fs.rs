//! Filesystem capability used by the availability gate and post-processing.
//!
//! Components take a `&dyn KeyFileSystem` so failure paths can be exercised without
//! touching the real disk.

use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait KeyFileSystem: Send + Sync {
    /// True when the file can be opened for reading and writing. Any error,
    /// including permission denied, reads as "not present".
    async fn is_accessible(&self, path: &Path) -> bool;

    /// Read the whole file as text. Invalid UTF-8 is replaced, not rejected.
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    async fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}

/// Real filesystem backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

#[async_trait]
impl KeyFileSystem for TokioFileSystem {
    async fn is_accessible(&self, path: &Path) -> bool {
        // Opening without truncate or create leaves the file untouched.
        tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .await
            .is_ok()
    }

    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

// In-memory filesystem for testing
#[cfg(test)]
pub struct MemoryFileSystem {
    files: std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, String>>,
    fail_read: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    fail_remove: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    ops: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            files: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail_read: std::sync::Mutex::new(std::collections::HashSet::new()),
            fail_remove: std::sync::Mutex::new(std::collections::HashSet::new()),
            ops: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, path: &Path, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    pub fn fail_read_of(&self, path: &Path) {
        self.fail_read.lock().unwrap().insert(path.to_path_buf());
    }

    pub fn fail_remove_of(&self, path: &Path) {
        self.fail_remove.lock().unwrap().insert(path.to_path_buf());
    }

    /// Operations in call order, e.g. `read /k` or `remove /k.pub`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    fn record(&self, op: &str, path: &Path) {
        self.ops
            .lock()
            .unwrap()
            .push(format!("{} {}", op, path.display()));
    }
}

#[cfg(test)]
#[async_trait]
impl KeyFileSystem for MemoryFileSystem {
    async fn is_accessible(&self, path: &Path) -> bool {
        self.record("probe", path);
        self.contains(path)
    }

    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.record("read", path);
        if self.fail_read.lock().unwrap().contains(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read denied",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        self.record("remove", path);
        if self.fail_remove.lock().unwrap().contains(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "remove denied",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
    }
}
