//! Submission use case.
//!
//! One submission runs five steps strictly in order and stops at the first
//! failure: connect, read the user's code, build the prompt, ask the model,
//! handle the response. Nothing is kept between attempts, so a failed
//! submission can simply be retried.

use dsa_core::{
    DsaError, ModelConnector, ProcessedResponse, PromptBuilder, PromptRequest, ResponseProcessor,
    Result, Session, SolutionStore, SubmissionMode,
};
use std::sync::Arc;
use std::time::Duration;

pub struct SolutionSubmitter {
    /// Produces a model client per submission
    connector: Arc<dyn ModelConnector>,
    /// Where the user's code is read from
    store: Arc<dyn SolutionStore>,
    /// Displays or persists the model's answer
    processor: ResponseProcessor,
    /// Upper bound for the model call, if any
    timeout: Option<Duration>,
}

impl SolutionSubmitter {
    pub fn new(connector: Arc<dyn ModelConnector>, store: Arc<dyn SolutionStore>) -> Self {
        Self {
            connector,
            processor: ResponseProcessor::new(store.clone()),
            store,
            timeout: None,
        }
    }

    /// Bounds the model call; expiry is reported as a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs one submission of the session's solution in `mode`.
    pub async fn submit(
        &self,
        mode: SubmissionMode,
        session: &Session,
    ) -> Result<ProcessedResponse> {
        let title = session.title();
        let language = session.language.as_str();

        let client = self.connector.connect()?;
        tracing::info!("[SolutionSubmitter] Model backend connected");

        let user_code = self.store.read_solution(title, language).await?;

        let prompt = PromptBuilder::build(&PromptRequest::new(
            mode,
            session.problem.description.as_str(),
            language,
            user_code,
        ));

        tracing::info!("[SolutionSubmitter] Sending '{}' ({}) for {}", title, language, mode);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, client.complete(&prompt))
                .await
                .map_err(|_| {
                    DsaError::transport(format!(
                        "model request timed out after {}s",
                        limit.as_secs_f32()
                    ))
                })??,
            None => client.complete(&prompt).await?,
        };

        self.processor
            .process(mode, title, language, response)
            .await
    }
}
