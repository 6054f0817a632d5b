//! Executes schema validators against a batch of records.
//!
//! Patterns are compiled once when the engine is built, never per record.
//! Checks run in schema order per field:
//!
//! - **required**: empty cell → `MissingValue`, Error
//! - **regex_matches**: non-empty cell that fails the matcher →
//!   `InvalidFormat`, Error (empty cells are missingness, not format)
//! - **unique**: non-empty cell whose text was already seen in the column →
//!   `DuplicateValue`, Error; the first occurrence is not flagged

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use importkit_model::{Field, IssueKind, ModelError, Record, Result, Severity, Validator};

use crate::report::{Issue, ValidationReport};

#[derive(Debug)]
enum Check {
    Required { message: String },
    Unique { message: String },
    Pattern { matcher: Regex, message: String },
}

#[derive(Debug)]
struct FieldChecks {
    key: String,
    checks: Vec<Check>,
}

/// Compiled validators for one schema.
#[derive(Debug)]
pub struct ValidatorEngine {
    fields: Vec<FieldChecks>,
}

impl ValidatorEngine {
    /// Compile every validator of `schema`. Fails if a pattern validator
    /// carries a pattern its match mode cannot compile.
    pub fn new(schema: &[Field]) -> Result<Self> {
        let mut fields = Vec::with_capacity(schema.len());
        for field in schema {
            let mut checks = Vec::with_capacity(field.validators.len());
            for validator in &field.validators {
                checks.push(compile_check(validator)?);
            }
            fields.push(FieldChecks {
                key: field.key.clone(),
                checks,
            });
        }
        Ok(Self { fields })
    }

    /// Run all checks against `batch`, producing field/record-scoped issues.
    pub fn validate(&self, batch: &[Record]) -> ValidationReport {
        let mut issues = Vec::new();

        for field in &self.fields {
            let before = issues.len();
            for check in &field.checks {
                self.run_check(field, check, batch, &mut issues);
            }
            debug!(
                field = %field.key,
                issues = issues.len() - before,
                "column validated"
            );
        }

        ValidationReport { issues }
    }

    fn run_check(
        &self,
        field: &FieldChecks,
        check: &Check,
        batch: &[Record],
        issues: &mut Vec<Issue>,
    ) {
        match check {
            Check::Required { message } => {
                for (index, record) in batch.iter().enumerate() {
                    if record.value_or_null(&field.key).is_empty() {
                        issues.push(self.issue(field, IssueKind::MissingValue, index, message));
                    }
                }
            }
            Check::Pattern { matcher, message } => {
                for (index, record) in batch.iter().enumerate() {
                    let value = record.value_or_null(&field.key);
                    if value.is_empty() {
                        continue;
                    }
                    if !matcher.is_match(&value.as_text()) {
                        issues.push(self.issue(field, IssueKind::InvalidFormat, index, message));
                    }
                }
            }
            Check::Unique { message } => {
                let mut seen: BTreeSet<String> = BTreeSet::new();
                for (index, record) in batch.iter().enumerate() {
                    let value = record.value_or_null(&field.key);
                    if value.is_empty() {
                        continue;
                    }
                    if !seen.insert(value.as_text()) {
                        issues.push(self.issue(field, IssueKind::DuplicateValue, index, message));
                    }
                }
            }
        }
    }

    fn issue(&self, field: &FieldChecks, kind: IssueKind, record: usize, message: &str) -> Issue {
        Issue {
            kind,
            severity: Severity::Error,
            field: field.key.clone(),
            record,
            message: message.to_string(),
        }
    }
}

fn compile_check(validator: &Validator) -> Result<Check> {
    Ok(match validator {
        Validator::Required { error } => Check::Required {
            message: message_or(error, "A value is required"),
        },
        Validator::Unique { error } => Check::Unique {
            message: message_or(error, "This value appears more than once"),
        },
        Validator::RegexMatches {
            pattern,
            mode,
            error,
        } => Check::Pattern {
            matcher: mode
                .compile(pattern)
                .map_err(|source| ModelError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?,
            message: message_or(error, "Value does not match the expected format"),
        },
    })
}

fn message_or(error: &Option<String>, fallback: &str) -> String {
    error.clone().unwrap_or_else(|| fallback.to_string())
}
