//! Storage and collaborator traits.
//!
//! The core never touches the network or the filesystem directly; it talks
//! to these seams and the outer crates provide the implementations.

use crate::error::Result;
use crate::mode::SubmissionMode;
use crate::session::Problem;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Local storage for solution artifacts.
///
/// The user's own file lives at `{title}.{ext}`; derived artifacts always
/// carry a mode suffix, `{title}-{mode}.{ext}`, so the two never collide.
#[async_trait]
pub trait SolutionStore: Send + Sync {
    /// Path of the user's solution file.
    fn solution_path(&self, title: &str, language: &str) -> Result<PathBuf>;

    /// Path of the artifact derived for `mode`.
    fn artifact_path(&self, title: &str, mode: SubmissionMode, language: &str) -> Result<PathBuf>;

    /// Reads the user's solution.
    async fn read_solution(&self, title: &str, language: &str) -> Result<String>;

    /// Writes a derived artifact, returning where it landed.
    ///
    /// The write is all-or-nothing: on error no artifact is left behind.
    async fn write_artifact(
        &self,
        title: &str,
        mode: SubmissionMode,
        language: &str,
        content: &str,
    ) -> Result<PathBuf>;

    /// Writes the starter file unless the user already has one.
    ///
    /// Returns `true` when a file was created.
    async fn write_starter(&self, title: &str, language: &str, content: &str) -> Result<bool>;
}

/// Source of problem statements.
///
/// `fetch` returns the problem and leaves a starter solution file in the
/// store before it returns.
#[async_trait]
pub trait ProblemFetcher: Send + Sync {
    async fn fetch(&self, slug: &str, language: &str) -> Result<Problem>;
}

/// A connected model backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the first completion.
    async fn complete(&self, prompt: &str) -> Result<ModelResponse>;
}

/// Produces a [`ModelClient`] from configured credentials.
pub trait ModelConnector: Send + Sync {
    /// Fails with a connection error when credentials are missing or unusable.
    fn connect(&self) -> Result<Arc<dyn ModelClient>>;
}

/// Raw text of one model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub raw_text: String,
}

impl ModelResponse {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}
