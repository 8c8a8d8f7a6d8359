//! Mode-aware handling of model responses.

use crate::error::{DsaError, Result};
use crate::language::Language;
use crate::mode::{ResponsePolicy, SubmissionMode};
use crate::repository::{ModelResponse, SolutionStore};
use std::path::PathBuf;
use std::sync::Arc;

/// What became of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedResponse {
    /// Shown to the user as-is.
    Displayed(String),
    /// Saved as a derived artifact.
    Saved(PathBuf),
}

/// Strips the wrapper a model puts around generated code.
///
/// The first line (usually an opening fence or a one-line preamble) is
/// dropped, then backticks are trimmed from both ends of what remains. A
/// response without a newline yields an empty body.
pub fn clean_code_response(raw: &str) -> String {
    match raw.split_once('\n') {
        Some((_header, body)) => body.trim_matches('`').to_string(),
        None => String::new(),
    }
}

/// Applies the response policy of each [`SubmissionMode`].
pub struct ResponseProcessor {
    store: Arc<dyn SolutionStore>,
}

impl ResponseProcessor {
    pub fn new(store: Arc<dyn SolutionStore>) -> Self {
        Self { store }
    }

    /// Displays or persists `response` according to `mode`.
    ///
    /// Persisting modes check the language first so an unsupported language
    /// never leaves a file behind.
    pub async fn process(
        &self,
        mode: SubmissionMode,
        title: &str,
        language: &str,
        response: ModelResponse,
    ) -> Result<ProcessedResponse> {
        match mode.policy() {
            ResponsePolicy::Display => Ok(ProcessedResponse::Displayed(response.raw_text)),
            ResponsePolicy::Persist => {
                Language::extension_for(language)?;
                if response.raw_text.trim().is_empty() {
                    return Err(DsaError::malformed_response(
                        "expected a header line followed by code, got an empty response",
                    ));
                }
                let body = clean_code_response(&response.raw_text);
                let path = self
                    .store
                    .write_artifact(title, mode, language, &body)
                    .await?;
                Ok(ProcessedResponse::Saved(path))
            }
        }
    }
}
