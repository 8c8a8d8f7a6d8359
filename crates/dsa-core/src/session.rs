//! Session domain model.
//!
//! A session is the single active problem-solving context between
//! `dsa-init` and `dsa-exit`. It lives in memory only.

use serde::{Deserialize, Serialize};

/// A fetched coding exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    pub description: String,
}

impl Problem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The active session: what the user is working on and in which language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub problem_slug: String,
    pub language: String,
    pub problem: Problem,
}

impl Session {
    pub fn new(
        problem_slug: impl Into<String>,
        language: impl Into<String>,
        problem: Problem,
    ) -> Self {
        Self {
            problem_slug: problem_slug.into(),
            language: language.into(),
            problem,
        }
    }

    pub fn title(&self) -> &str {
        &self.problem.title
    }
}

/// Session state machine: `Idle` until a successful init, `Active` until exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Active(Session),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = SessionState::default();
        assert!(!state.is_active());
        assert!(state.session().is_none());
    }

    #[test]
    fn test_active_state_exposes_session() {
        let session = Session::new(
            "two-sum",
            "python",
            Problem::new("Two Sum", "Find two numbers that add up to target."),
        );
        let state = SessionState::Active(session.clone());
        assert!(state.is_active());
        assert_eq!(state.session(), Some(&session));
        assert_eq!(session.title(), "Two Sum");
    }
}
