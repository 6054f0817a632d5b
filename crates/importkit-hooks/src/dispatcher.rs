//! Dispatches registered hooks against incoming column batches and record
//! lifecycle events.
//!
//! Failure containment: a hook that returns an error never aborts the
//! pipeline. The dispatcher reports the failure as a
//! `HookExecutionFailure` diagnostic scoped to the affected record/field
//! and keeps the prior values; every other record, field and hook still
//! runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use importkit_model::{CellValue, Diagnostic, FieldPatch, HookResponse, IssueKind, Record};

use crate::hook::{ColumnEntry, FieldHook, PatchEntry, RecordHook};

/// Record lifecycle points at which the host widget invokes hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEvent {
    /// The record was just created from uploaded data.
    Init,
    /// Some field of the record changed.
    Change,
}

/// A record guarded for serialized hook merges.
///
/// The tokio mutex queues waiters FIFO, so concurrent events against the
/// same slot apply in arrival order: an init result is fully merged before
/// a later change event reads the record. Distinct records proceed
/// independently.
pub type RecordSlot = tokio::sync::Mutex<Record>;

/// Holds the hook registrations and runs them. No state beyond the
/// callback table is retained across invocations.
#[derive(Default)]
pub struct HookDispatcher {
    field_hooks: BTreeMap<String, Arc<dyn FieldHook>>,
    on_init: Option<Arc<dyn RecordHook>>,
    on_change: Option<Arc<dyn RecordHook>>,
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch hook for one field key.
    pub fn with_field_hook(mut self, field: impl Into<String>, hook: Arc<dyn FieldHook>) -> Self {
        self.field_hooks.insert(field.into(), hook);
        self
    }

    /// Register the record-creation lifecycle hook.
    pub fn with_record_init(mut self, hook: Arc<dyn RecordHook>) -> Self {
        self.on_init = Some(hook);
        self
    }

    /// Register the record-change lifecycle hook.
    pub fn with_record_change(mut self, hook: Arc<dyn RecordHook>) -> Self {
        self.on_change = Some(hook);
        self
    }

    pub fn field_hook_keys(&self) -> impl Iterator<Item = &str> {
        self.field_hooks.keys().map(String::as_str)
    }

    /// Run the hook registered for `field` over one column.
    ///
    /// Always yields one patch per input element, restored to index order.
    /// On hook failure every element keeps its prior value and carries a
    /// `HookExecutionFailure` diagnostic. Returns an empty vector when no
    /// hook is registered for the field.
    pub async fn run_column(&self, field: &str, column: Vec<ColumnEntry>) -> Vec<PatchEntry> {
        let Some(hook) = self.field_hooks.get(field) else {
            debug!(field, "no field hook registered");
            return Vec::new();
        };

        let originals = column.clone();
        match hook.transform(column).await {
            Ok(patches) => restore_order(field, &originals, patches),
            Err(err) => {
                warn!(field, error = %err, "field hook failed, keeping prior values");
                originals
                    .into_iter()
                    .map(|(value, index)| (failure_patch(field, value, &err), index))
                    .collect()
            }
        }
    }

    /// Extract each registered column from `batch`, run its hook, and merge
    /// the patches back into the records. Records missing a key contribute
    /// null cells.
    pub async fn run_field_hooks(&self, batch: &mut [Record]) {
        for field in self.field_hooks.keys() {
            let column: Vec<ColumnEntry> = batch
                .iter()
                .enumerate()
                .map(|(index, record)| (record.value_or_null(field), index))
                .collect();

            let patches = self.run_column(field, column).await;
            for (patch, index) in patches {
                if let Some(record) = batch.get_mut(index) {
                    record.apply(HookResponse::single(field.clone(), patch));
                } else {
                    warn!(field, index, "field hook produced an out-of-range index");
                }
            }
        }
    }

    /// Apply one lifecycle event to the record in `slot`.
    ///
    /// The slot stays locked for the whole hook-plus-merge section, so
    /// merges for the same record never interleave. A hook error becomes a
    /// record-scoped diagnostic and the record's values are left untouched.
    pub async fn apply_record_event(&self, event: RecordEvent, index: usize, slot: &RecordSlot) {
        let hook = match event {
            RecordEvent::Init => self.on_init.as_ref(),
            RecordEvent::Change => self.on_change.as_ref(),
        };
        let Some(hook) = hook else {
            return;
        };

        let mut record = slot.lock().await;
        match hook.on_record(&record, index).await {
            Ok(response) => record.apply(response),
            Err(err) => {
                warn!(index, error = %err, "record hook failed, record left unchanged");
                record.push_note(
                    Diagnostic::error(format!("record hook failed: {err:#}"))
                        .with_kind(IssueKind::HookExecutionFailure),
                );
            }
        }
    }
}

/// Re-order hook output by record index and fill contract gaps.
///
/// The batch-hook contract promises one patch per input element. Missing
/// indices fall back to the element's prior value; duplicate or unknown
/// indices are dropped. Either violation is logged.
fn restore_order(field: &str, originals: &[ColumnEntry], patches: Vec<PatchEntry>) -> Vec<PatchEntry> {
    let mut by_index: BTreeMap<usize, FieldPatch> = BTreeMap::new();
    for (patch, index) in patches {
        if !originals.iter().any(|(_, original)| *original == index) {
            warn!(field, index, "field hook produced an unknown index");
            continue;
        }
        if by_index.insert(index, patch).is_some() {
            warn!(field, index, "field hook produced a duplicate index");
        }
    }

    originals
        .iter()
        .map(|(value, index)| {
            let patch = by_index.remove(index).unwrap_or_else(|| {
                warn!(field, index, "field hook delivered no result, keeping prior value");
                FieldPatch::new(value.clone())
            });
            (patch, *index)
        })
        .collect()
}

fn failure_patch(field: &str, value: CellValue, err: &anyhow::Error) -> FieldPatch {
    FieldPatch::new(value).with_info([Diagnostic::error(format!("{field} hook failed: {err:#}"))
        .with_kind(IssueKind::HookExecutionFailure)])
}
