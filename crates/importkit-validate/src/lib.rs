mod engine;
mod report;

pub use engine::ValidatorEngine;
pub use report::{Issue, ValidationReport};

/// Outcome of the pre-submission gate.
#[derive(Debug, Clone, Default)]
pub struct GatingDecision {
    pub block_submit: bool,
    pub blocking_fields: Vec<String>,
}

/// Decide whether a batch may be handed to submission.
///
/// When invalid submits are disallowed, any error-severity issue blocks the
/// whole batch; the decision lists the offending fields.
pub fn gate_submission(allow_invalid_submit: bool, report: &ValidationReport) -> GatingDecision {
    if allow_invalid_submit || !report.has_errors() {
        return GatingDecision::default();
    }
    let mut blocking = std::collections::BTreeSet::new();
    for issue in &report.issues {
        if issue.severity == importkit_model::Severity::Error {
            blocking.insert(issue.field.clone());
        }
    }
    GatingDecision {
        block_submit: true,
        blocking_fields: blocking.into_iter().collect(),
    }
}
