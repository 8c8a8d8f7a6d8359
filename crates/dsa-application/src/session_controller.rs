//! Session state machine.
//!
//! The controller owns the only [`SessionState`] in the process and decides
//! which commands are valid in it:
//!
//! ```text
//!            dsa-init (fetch ok)
//!   Idle ─────────────────────────▶ Active
//!    ▲                                │  dsa-submit (state unchanged,
//!    └──────────── dsa-exit ──────────┘  success or not)
//! ```
//!
//! Every error is turned into a [`CommandOutcome::Failed`]; the state is
//! never left half-updated and the command loop keeps going.

use crate::solution_submitter::SolutionSubmitter;
use dsa_core::command::help_text;
use dsa_core::{
    Command, DsaError, ProblemFetcher, ProcessedResponse, Result, Session, SessionState,
    SubmissionMode,
};
use std::path::PathBuf;
use std::sync::Arc;

/// What the REPL should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Blank input; nothing to show.
    NoOp,
    /// The command list.
    Help(String),
    /// A session was created for the problem with this title.
    SessionStarted { title: String },
    /// Verdict of a `check` submission.
    Verification(String),
    /// A derived artifact was written.
    ArtifactSaved(PathBuf),
    /// The active session was cleared.
    SessionEnded,
    /// The command was rejected or failed; state is unchanged.
    Failed(DsaError),
}

pub struct SessionController {
    state: SessionState,
    fetcher: Arc<dyn ProblemFetcher>,
    submitter: SolutionSubmitter,
}

impl SessionController {
    pub fn new(fetcher: Arc<dyn ProblemFetcher>, submitter: SolutionSubmitter) -> Self {
        Self {
            state: SessionState::Idle,
            fetcher,
            submitter,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Parses and runs one input line.
    pub async fn handle_line(&mut self, line: &str) -> CommandOutcome {
        let result = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(CommandOutcome::NoOp),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::debug!("[SessionController] Command failed: {}", e);
            CommandOutcome::Failed(e)
        })
    }

    pub async fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Init { slug, language } => self.init(&slug, &language).await,
            Command::Submit { mode } => self.submit(&mode).await,
            Command::Exit => self.exit(),
            Command::Help => Ok(CommandOutcome::Help(help_text())),
        }
    }

    /// Starts a session. Only valid while idle; a failed fetch keeps the controller idle.
    pub async fn init(&mut self, slug: &str, language: &str) -> Result<CommandOutcome> {
        if self.state.is_active() {
            return Err(DsaError::session_state(
                "A session is already active. Please run 'dsa-exit' first.",
            ));
        }

        tracing::info!("[SessionController] Starting session for '{}' ({})", slug, language);
        let problem = self.fetcher.fetch(slug, language).await?;
        let title = problem.title.clone();
        self.state = SessionState::Active(Session::new(slug, language, problem));

        Ok(CommandOutcome::SessionStarted { title })
    }

    /// Submits the active session's solution.
    ///
    /// The mode is validated before any file or network access. Failures
    /// leave the session active so the user can fix the file and retry.
    pub async fn submit(&self, mode: &str) -> Result<CommandOutcome> {
        let Some(session) = self.state.session() else {
            return Err(DsaError::session_state(
                "No active session. Please start one with 'dsa-init'.",
            ));
        };
        let mode = SubmissionMode::parse_command_mode(mode)?;

        match self.submitter.submit(mode, session).await? {
            ProcessedResponse::Displayed(text) => Ok(CommandOutcome::Verification(text)),
            ProcessedResponse::Saved(path) => Ok(CommandOutcome::ArtifactSaved(path)),
        }
    }

    /// Ends the active session.
    pub fn exit(&mut self) -> Result<CommandOutcome> {
        if !self.state.is_active() {
            return Err(DsaError::session_state("No active session to exit."));
        }
        tracing::info!("[SessionController] Session ended");
        self.state = SessionState::Idle;
        Ok(CommandOutcome::SessionEnded)
    }
}
