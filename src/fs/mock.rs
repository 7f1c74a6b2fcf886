// src/fs/mock.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};

use super::FileSystem;

/// In-memory filesystem for tests.
///
/// Clones share the same files, so a test can keep a handle and inspect what
/// the code under test wrote.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    read_only: Arc<AtomicBool>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        // A panicking test thread must not hide the files from the others.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent `write` fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Seed a file, e.g. output a fake executor would have produced.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock()
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// File content as text, if the file exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths currently stored, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("file not found: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(anyhow!("read-only file system: {}", path.display()));
        }
        self.add_file(path, contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_written_files() {
        let fs = MockFileSystem::new();
        let handle = fs.clone();
        fs.write(Path::new("root/doc/_script.sh"), b"echo hi\n").unwrap();

        assert_eq!(handle.contents("root/doc/_script.sh").as_deref(), Some("echo hi\n"));
        assert_eq!(handle.file_paths(), vec![PathBuf::from("root/doc/_script.sh")]);
        assert!(fs.read(Path::new("root/doc/stdout")).is_err());
    }

    #[test]
    fn read_only_rejects_writes() {
        let fs = MockFileSystem::new();
        fs.set_read_only(true);
        assert!(fs.write(Path::new("x"), b"1").is_err());
        assert!(fs.is_empty());
    }
}
