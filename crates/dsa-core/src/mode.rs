//! Submission modes.

use crate::error::{DsaError, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// What happens to the model's answer for a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Show the raw answer, write nothing.
    Display,
    /// Clean the answer and save it as a derived artifact.
    Persist,
}

/// Selects the prompt template and the response handling of a submission.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionMode {
    /// Verdict only: "OK" or "Not OK".
    Check,
    /// The user's code annotated with hints.
    Help,
    /// A corrected solution.
    Fix,
    /// A faster or leaner rewrite of a working solution.
    Optimize,
}

impl SubmissionMode {
    pub fn policy(self) -> ResponsePolicy {
        match self {
            SubmissionMode::Check => ResponsePolicy::Display,
            SubmissionMode::Help | SubmissionMode::Fix | SubmissionMode::Optimize => {
                ResponsePolicy::Persist
            }
        }
    }

    /// Whether `dsa-submit` accepts this mode.
    ///
    /// `Optimize` is only reachable through the library API.
    pub fn is_command_mode(self) -> bool {
        !matches!(self, SubmissionMode::Optimize)
    }

    /// Modes accepted by `dsa-submit`, in display order.
    pub fn command_modes() -> impl Iterator<Item = SubmissionMode> {
        SubmissionMode::iter().filter(|mode| mode.is_command_mode())
    }

    /// Parses a `dsa-submit` argument, rejecting modes the command does not expose.
    pub fn parse_command_mode(token: &str) -> Result<Self> {
        token
            .parse::<SubmissionMode>()
            .ok()
            .filter(|mode| mode.is_command_mode())
            .ok_or_else(|| DsaError::InvalidMode {
                mode: token.to_string(),
                available: Self::command_modes_label(),
            })
    }

    /// "check, help, fix"
    pub fn command_modes_label() -> String {
        Self::command_modes()
            .map(|mode| mode.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_is_display_only() {
        assert_eq!(SubmissionMode::Check.policy(), ResponsePolicy::Display);
        assert_eq!(SubmissionMode::Help.policy(), ResponsePolicy::Persist);
        assert_eq!(SubmissionMode::Fix.policy(), ResponsePolicy::Persist);
        assert_eq!(SubmissionMode::Optimize.policy(), ResponsePolicy::Persist);
    }

    #[test]
    fn test_command_modes() {
        assert_eq!(SubmissionMode::command_modes_label(), "check, help, fix");
        assert_eq!(
            SubmissionMode::parse_command_mode("fix").unwrap(),
            SubmissionMode::Fix
        );
    }

    #[test]
    fn test_optimize_is_not_a_command_mode() {
        assert!("optimize".parse::<SubmissionMode>().is_ok());
        let err = SubmissionMode::parse_command_mode("optimize").unwrap_err();
        assert!(err.is_invalid_mode());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(SubmissionMode::parse_command_mode("review").is_err());
        assert!(SubmissionMode::parse_command_mode("CHECK").is_err());
    }
}
