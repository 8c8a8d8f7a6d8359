//! Solution languages and their file extensions.

use crate::error::{DsaError, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A language a solution file can be written in.
///
/// The set is closed: every variant has exactly one file extension, and any
/// other language tag is rejected instead of producing a misnamed file.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    Python,
    Go,
}

impl Language {
    /// Resolves a user-supplied language tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim()
            .parse()
            .map_err(|_| DsaError::UnsupportedLanguage(tag.to_string()))
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Go => "go",
        }
    }

    /// Shorthand for `from_tag(tag)?.extension()`.
    pub fn extension_for(tag: &str) -> Result<&'static str> {
        Self::from_tag(tag).map(Self::extension)
    }
}
