//! Validation rules attached to schema fields.
//!
//! Validators are plain data: the engine that executes them lives in
//! `importkit-validate`. Patterns are carried as strings plus an explicit
//! [`MatchMode`] so any consumer can compile an equivalent matcher; the
//! `regex_matches` constructor guarantees the pattern compiles, so a schema
//! in hand is always executable.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// How a pattern is applied to a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The pattern must match the entire value.
    #[default]
    FullMatch,
    /// The pattern may match any substring of the value.
    Search,
}

/// Matching mode for a pattern validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchMode {
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub case_insensitive: bool,
}

impl MatchMode {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Compile `pattern` into a matcher honoring this mode.
    pub fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error> {
        let mut source = String::new();
        if self.case_insensitive {
            source.push_str("(?i)");
        }
        match self.anchor {
            Anchor::FullMatch => {
                source.push_str("^(?:");
                source.push_str(pattern);
                source.push_str(")$");
            }
            Anchor::Search => source.push_str(pattern),
        }
        Regex::new(&source)
    }
}

/// A rule attached to a field that classifies a value as accepted or
/// rejected, optionally with a user-facing message.
///
/// Serializes to the widget's tagged shape, e.g.
/// `{ "validate": "regex_matches", "regex": "...", "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "validate", rename_all = "snake_case")]
pub enum Validator {
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Unique {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    RegexMatches {
        #[serde(rename = "regex")]
        pattern: String,
        #[serde(default, skip_serializing_if = "MatchMode::is_default")]
        mode: MatchMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Validator {
    pub fn required() -> Self {
        Self::Required { error: None }
    }

    pub fn unique() -> Self {
        Self::Unique { error: None }
    }

    /// Build a pattern validator, verifying up front that the pattern
    /// compiles under `mode`.
    pub fn regex_matches(pattern: impl Into<String>, mode: MatchMode) -> Result<Self> {
        let pattern = pattern.into();
        mode.compile(&pattern)
            .map_err(|source| ModelError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        Ok(Self::RegexMatches {
            pattern,
            mode,
            error: None,
        })
    }

    /// Attach a user-facing failure message.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::Required { error } | Self::Unique { error } | Self::RegexMatches { error, .. } => {
                error
            }
        };
        *slot = Some(message.into());
        self
    }

    /// The user-facing failure message, if one was attached.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Required { error } | Self::Unique { error } | Self::RegexMatches { error, .. } => {
                error.as_deref()
            }
        }
    }
}
