//! Domain layer of the DSA agent: the session model, submission modes,
//! prompt construction, response handling and the collaborator seams.

pub mod command;
pub mod error;
pub mod language;
pub mod mode;
pub mod prompt;
pub mod repository;
pub mod response;
pub mod session;

pub use command::Command;
pub use error::{DsaError, Result};
pub use language::Language;
pub use mode::{ResponsePolicy, SubmissionMode};
pub use prompt::{PromptBuilder, PromptRequest};
pub use repository::{ModelClient, ModelConnector, ModelResponse, ProblemFetcher, SolutionStore};
pub use response::{ProcessedResponse, ResponseProcessor};
pub use session::{Problem, Session, SessionState};
