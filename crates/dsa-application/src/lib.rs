//! Application layer for the DSA agent.
//!
//! Use cases that coordinate the domain with its collaborators: the session
//! state machine and the submission pipeline.

pub mod session_controller;
pub mod solution_submitter;

pub use session_controller::{CommandOutcome, SessionController};
pub use solution_submitter::SolutionSubmitter;
