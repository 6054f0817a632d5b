//! Marker hooks: the built-in demonstration transforms.
//!
//! Each appends a fixed marker character to one field's text and attaches a
//! single diagnostic. Real deployments register their own hooks for format
//! normalization, lookups or derived fields; these exist so the wiring can
//! be exercised and demonstrated end to end.

use anyhow::Result;
use async_trait::async_trait;

use importkit_model::{CellValue, Diagnostic, FieldPatch, HookResponse, Record, Severity};

use crate::hook::{ColumnEntry, FieldHook, PatchEntry, RecordHook};

/// Appends a marker to one field and notes it with a diagnostic. Usable
/// both as a column batch hook and as a record lifecycle hook.
#[derive(Debug, Clone)]
pub struct MarkerHook {
    field: String,
    marker: char,
    level: Severity,
    message: String,
}

impl MarkerHook {
    pub fn new(
        field: impl Into<String>,
        marker: char,
        level: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            marker,
            level,
            message: message.into(),
        }
    }

    fn patch(&self, current: &CellValue) -> FieldPatch {
        let value = format!("{}{}", current.as_text(), self.marker);
        FieldPatch::new(value).with_info([Diagnostic::new(self.message.clone(), self.level)])
    }
}

#[async_trait]
impl FieldHook for MarkerHook {
    async fn transform(&self, column: Vec<ColumnEntry>) -> Result<Vec<PatchEntry>> {
        Ok(column
            .into_iter()
            .map(|(value, index)| (self.patch(&value), index))
            .collect())
    }
}

#[async_trait]
impl RecordHook for MarkerHook {
    async fn on_record(&self, record: &Record, _index: usize) -> Result<HookResponse> {
        let current = record.value_or_null(&self.field);
        Ok(HookResponse::single(self.field.clone(), self.patch(&current)))
    }
}

/// Column hook: `value` -> `value@`, one warning per element.
pub fn email_column_hook() -> MarkerHook {
    MarkerHook::new("email", '@', Severity::Warning, "added @ after the email")
}

/// Record-init hook: `value` -> `value@` with an info note.
pub fn email_init_hook() -> MarkerHook {
    MarkerHook::new("email", '@', Severity::Info, "added @ on init")
}

/// Record-change hook: `value` -> `value#` with a warning.
pub fn email_change_hook() -> MarkerHook {
    MarkerHook::new("email", '#', Severity::Warning, "added # on change")
}
