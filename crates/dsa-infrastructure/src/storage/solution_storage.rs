//! Problems directory storage for solution files and derived artifacts.

use super::atomic_file::AtomicTextFile;
use async_trait::async_trait;
use dsa_core::{DsaError, Language, Result, SolutionStore, SubmissionMode};
use std::path::PathBuf;

/// Filesystem-backed [`SolutionStore`].
///
/// ```text
/// problems/
/// ├── Two Sum.py         # the user's solution
/// ├── Two Sum-help.py    # derived artifacts, one per mode
/// └── Two Sum-fix.py
/// ```
pub struct FileSolutionStore {
    root: PathBuf,
}

impl FileSolutionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SolutionStore for FileSolutionStore {
    fn solution_path(&self, title: &str, language: &str) -> Result<PathBuf> {
        let extension = Language::extension_for(language)?;
        Ok(self.root.join(format!("{title}.{extension}")))
    }

    fn artifact_path(&self, title: &str, mode: SubmissionMode, language: &str) -> Result<PathBuf> {
        let extension = Language::extension_for(language)?;
        Ok(self.root.join(format!("{title}-{mode}.{extension}")))
    }

    async fn read_solution(&self, title: &str, language: &str) -> Result<String> {
        let path = self.solution_path(title, language)?;
        let content = AtomicTextFile::new(path.clone())
            .load()
            .await
            .map_err(|e| DsaError::file_read(path.display().to_string(), e.to_string()))?
            .ok_or_else(|| DsaError::file_read(path.display().to_string(), "file not found"))?;
        tracing::info!("[SolutionStore] Read solution from {}", path.display());
        Ok(content)
    }

    async fn write_artifact(
        &self,
        title: &str,
        mode: SubmissionMode,
        language: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let path = self.artifact_path(title, mode, language)?;
        AtomicTextFile::new(path.clone())
            .save(content)
            .await
            .map_err(|e| DsaError::file_write(path.display().to_string(), e.to_string()))?;
        tracing::info!("[SolutionStore] Saved {} artifact to {}", mode, path.display());
        Ok(path)
    }

    async fn write_starter(&self, title: &str, language: &str, content: &str) -> Result<bool> {
        let path = self.solution_path(title, language)?;
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!("[SolutionStore] Keeping existing solution at {}", path.display());
            return Ok(false);
        }
        AtomicTextFile::new(path.clone())
            .save(content)
            .await
            .map_err(|e| DsaError::file_write(path.display().to_string(), e.to_string()))?;
        tracing::info!("[SolutionStore] Created starter file {}", path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_never_collide() {
        let store = FileSolutionStore::new("problems");
        let user = store.solution_path("Two Sum", "python").unwrap();
        assert_eq!(user, PathBuf::from("problems/Two Sum.py"));
        for mode in [SubmissionMode::Help, SubmissionMode::Fix, SubmissionMode::Optimize] {
            let derived = store.artifact_path("Two Sum", mode, "python").unwrap();
            assert_ne!(derived, user);
        }
        assert_eq!(
            store.artifact_path("Two Sum", SubmissionMode::Fix, "go").unwrap(),
            PathBuf::from("problems/Two Sum-fix.go")
        );
    }

    #[test]
    fn test_unsupported_language_has_no_path() {
        let store = FileSolutionStore::new("problems");
        assert!(store.solution_path("Two Sum", "rust").unwrap_err().is_unsupported_language());
    }

    #[tokio::test]
    async fn test_read_missing_solution() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSolutionStore::new(temp_dir.path());
        let err = store.read_solution("Two Sum", "python").await.unwrap_err();
        assert!(err.is_file_read());
        assert!(err.to_string().contains("Two Sum.py"));
    }

    #[tokio::test]
    async fn test_unreadable_solution_is_file_read_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("Two Sum.py")).unwrap();
        let store = FileSolutionStore::new(temp_dir.path());
        let err = store.read_solution("Two Sum", "python").await.unwrap_err();
        assert!(err.is_file_read());
    }

    #[tokio::test]
    async fn test_starter_does_not_overwrite_user_code() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSolutionStore::new(temp_dir.path());

        assert!(store.write_starter("Two Sum", "python", "class Solution:\n").await.unwrap());
        std::fs::write(temp_dir.path().join("Two Sum.py"), "my work").unwrap();
        assert!(!store.write_starter("Two Sum", "python", "class Solution:\n").await.unwrap());

        assert_eq!(store.read_solution("Two Sum", "python").await.unwrap(), "my work");
    }

    #[tokio::test]
    async fn test_write_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSolutionStore::new(temp_dir.path().join("problems"));

        let path = store
            .write_artifact("Two Sum", SubmissionMode::Help, "go", "// hint\n")
            .await
            .unwrap();

        assert_eq!(path, temp_dir.path().join("problems").join("Two Sum-help.go"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "// hint\n");
    }
}
