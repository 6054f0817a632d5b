use serde::{Deserialize, Serialize};

/// Severity of a diagnostic attached to a field or record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Parse a severity from a wire string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Classification of a data-quality or pipeline failure signal.
///
/// Validator failures and contained hook failures are surfaced through this
/// taxonomy rather than as process errors; the hosting widget renders them
/// next to the affected cell and the import continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field has no value.
    MissingValue,
    /// A value failed its pattern validator.
    InvalidFormat,
    /// A value violates a uniqueness constraint within the batch.
    DuplicateValue,
    /// A registered hook returned an error; the prior value was kept.
    HookExecutionFailure,
    /// The external confirmation rejected the whole submission.
    SubmissionRejected,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::InvalidFormat => "invalid_format",
            Self::DuplicateValue => "duplicate_value",
            Self::HookExecutionFailure => "hook_execution_failure",
            Self::SubmissionRejected => "submission_rejected",
        }
    }
}

/// A severity-tagged message attached to a field or record.
///
/// Plain hook diagnostics carry only `message` and `level`, matching the
/// widget's `{ "message": ..., "level": ... }` shape; pipeline-produced
/// diagnostics additionally classify themselves via `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub level: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<IssueKind>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, level: Severity) -> Self {
        Self {
            message: message.into(),
            level,
            kind: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn with_kind(mut self, kind: IssueKind) -> Self {
        self.kind = Some(kind);
        self
    }
}
