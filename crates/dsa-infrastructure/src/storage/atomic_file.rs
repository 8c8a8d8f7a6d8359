//! Atomic text file writes.
//!
//! A write goes to a hidden temporary file next to the target, is synced to
//! disk and then renamed over the target, so readers see either the old
//! content or the new content and never a partial file.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(io::Error),
    /// The target path has no parent directory or no file name.
    InvalidPath(PathBuf),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::InvalidPath(path) => {
                write!(f, "Invalid file path: {}", path.display())
            }
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<io::Error> for AtomicFileError {
    fn from(e: io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

/// A handle to a text file that is only ever replaced atomically.
pub struct AtomicTextFile {
    path: PathBuf,
}

impl AtomicTextFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the file, returning `None` if it does not exist.
    pub async fn load(&self) -> Result<Option<String>, AtomicFileError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file content atomically, creating the parent directory if needed.
    pub async fn save(&self, content: &str) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.temp_path()?;
        if let Err(e) = Self::write_synced(&tmp_path, content).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn write_synced(path: &Path, content: &str) -> io::Result<()> {
        let mut file = File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await
    }

    /// `.{file_name}.tmp` in the same directory, so the rename stays on one filesystem.
    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| AtomicFileError::InvalidPath(self.path.clone()))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(match self.path.parent() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        })
    }
}
