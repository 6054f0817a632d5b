//! Hook traits.
//!
//! Hooks are pure with respect to fields they do not patch: they receive
//! their full context as arguments and communicate exclusively through the
//! returned [`HookResponse`] / patches. Both traits are async so that
//! synchronous and future-producing callbacks are handled uniformly; plain
//! closures adapt through [`record_hook_fn`] and [`field_hook_fn`].

use anyhow::Result;
use async_trait::async_trait;

use importkit_model::{CellValue, FieldPatch, HookResponse, Record};

/// One cell of a column batch: the value and its record index.
pub type ColumnEntry = (CellValue, usize);

/// One transformed cell: the patch and the record index it applies to.
pub type PatchEntry = (FieldPatch, usize);

/// A field-level batch hook: transforms an entire column across all records
/// in one call, returning one patch per input element, order-preserving by
/// index.
#[async_trait]
pub trait FieldHook: Send + Sync {
    async fn transform(&self, column: Vec<ColumnEntry>) -> Result<Vec<PatchEntry>>;
}

/// A record-level lifecycle hook, invoked when a record is first created and
/// whenever one of its fields changes.
#[async_trait]
pub trait RecordHook: Send + Sync {
    async fn on_record(&self, record: &Record, index: usize) -> Result<HookResponse>;
}

/// Adapt a synchronous closure into a [`RecordHook`].
pub fn record_hook_fn<F>(hook: F) -> RecordHookFn<F>
where
    F: Fn(&Record, usize) -> Result<HookResponse> + Send + Sync,
{
    RecordHookFn(hook)
}

/// A [`RecordHook`] backed by a plain closure. See [`record_hook_fn`].
pub struct RecordHookFn<F>(F);

#[async_trait]
impl<F> RecordHook for RecordHookFn<F>
where
    F: Fn(&Record, usize) -> Result<HookResponse> + Send + Sync,
{
    async fn on_record(&self, record: &Record, index: usize) -> Result<HookResponse> {
        (self.0)(record, index)
    }
}

/// Adapt a synchronous closure into a [`FieldHook`].
pub fn field_hook_fn<F>(hook: F) -> FieldHookFn<F>
where
    F: Fn(Vec<ColumnEntry>) -> Result<Vec<PatchEntry>> + Send + Sync,
{
    FieldHookFn(hook)
}

/// A [`FieldHook`] backed by a plain closure. See [`field_hook_fn`].
pub struct FieldHookFn<F>(F);

#[async_trait]
impl<F> FieldHook for FieldHookFn<F>
where
    F: Fn(Vec<ColumnEntry>) -> Result<Vec<PatchEntry>> + Send + Sync,
{
    async fn transform(&self, column: Vec<ColumnEntry>) -> Result<Vec<PatchEntry>> {
        (self.0)(column)
    }
}
