use thiserror::Error;

use importkit_model::{Diagnostic, IssueKind};

/// Terminal failure paths of a submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The external confirmation rejected the batch.
    #[error("{message}")]
    Rejected { message: String },
    /// The caller canceled before the confirmation arrived.
    #[error("submission canceled")]
    Canceled,
}

impl SubmitError {
    /// Render this failure as a diagnostic the widget can surface.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Rejected { message } => {
                Diagnostic::error(message.clone()).with_kind(IssueKind::SubmissionRejected)
            }
            Self::Canceled => Diagnostic::warning("submission canceled"),
        }
    }
}
