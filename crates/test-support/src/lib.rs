//! Shared helpers for tests that launch real child processes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use options::{Sink, sink};
use tempfile::TempDir;

/// Collects every chunk handed to a [`Sink`].
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sink that appends to this recorder.
    #[must_use]
    pub fn sink(&self) -> Sink {
        let chunks = Arc::clone(&self.chunks);
        sink(move |chunk| {
            chunks
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(chunk.to_vec());
        })
    }

    /// Number of chunks received so far.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.lock().len()
    }

    /// All received bytes, concatenated in arrival order.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().concat()
    }

    /// All received bytes decoded lossily as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        self.chunks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Temporary directory holding executable scripts that stand in for rsync.
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    /// Creates a fresh directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes an executable `/bin/sh` script named `name` with `body`.
    pub fn script(&self, name: &str, body: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        make_executable(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
