use serde::{Deserialize, Serialize};

use importkit_model::{IssueKind, Severity};

/// A validator failure, scoped to one field of one record.
///
/// Issues are data-quality signals surfaced through the widget's own error
/// rendering; they never abort the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub field: String,
    /// Zero-based index of the record within the batch.
    pub record: usize,
    pub message: String,
}

/// Validation outcome for a whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Issues raised against one record, in emission order.
    pub fn for_record(&self, index: usize) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.record == index)
    }
}
