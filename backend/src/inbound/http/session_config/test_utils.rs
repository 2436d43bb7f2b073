//! Test utilities for session configuration.

use std::path::PathBuf;
use uuid::Uuid;

/// A session key file in the system temporary directory, removed on drop.
#[derive(Debug)]
pub struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    /// Create a temporary key file of `len` filler bytes.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be created or written.
    pub fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }

    /// The file path as a `String`, lossily converted from the OS encoding.
    #[must_use]
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
