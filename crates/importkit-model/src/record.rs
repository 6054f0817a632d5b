//! Records and the hook merge contract.
//!
//! A record is a mapping from field key to scalar value, identified by its
//! zero-based index within the batch. Records mutate only through
//! [`Record::apply`] (merging a [`HookResponse`]) and through the
//! failure-containment note methods; validators and hooks themselves never
//! reach into a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;

/// A scalar cell value: text, number or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Null,
}

impl CellValue {
    /// Render the cell as text. Null renders empty, numbers via `Display`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Null => String::new(),
        }
    }

    /// Null or blank text. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Null => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A replacement value for one field plus the diagnostics that explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<Diagnostic>,
}

impl FieldPatch {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            info: Vec::new(),
        }
    }

    pub fn with_info(mut self, info: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.info.extend(info);
        self
    }
}

/// The outcome of a hook invocation: replacement values for a subset of
/// fields. Only keys present here are merged back into the record; every
/// other field is left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookResponse(BTreeMap<String, FieldPatch>);

impl HookResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response patching a single field.
    pub fn single(field: impl Into<String>, patch: FieldPatch) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), patch);
        Self(map)
    }

    pub fn with_patch(mut self, field: impl Into<String>, patch: FieldPatch) -> Self {
        self.0.insert(field.into(), patch);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldPatch> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldPatch)> {
        self.0.iter()
    }
}

impl IntoIterator for HookResponse {
    type Item = (String, FieldPatch);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldPatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One row of the import batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    values: BTreeMap<String, CellValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    field_notes: BTreeMap<String, Vec<Diagnostic>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<Diagnostic>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            field_notes: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field)
    }

    /// The cell for `field`, or null when the record has no such key.
    pub fn value_or_null(&self, field: &str) -> CellValue {
        self.values.get(field).cloned().unwrap_or(CellValue::Null)
    }

    pub fn values(&self) -> &BTreeMap<String, CellValue> {
        &self.values
    }

    /// Diagnostics accumulated against one field.
    pub fn field_notes(&self, field: &str) -> &[Diagnostic] {
        self.field_notes.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record-scoped diagnostics (e.g. a contained lifecycle hook failure).
    pub fn notes(&self) -> &[Diagnostic] {
        &self.notes
    }

    /// Merge a hook response: replace the patched fields' values and append
    /// their diagnostics. Fields absent from the response are untouched.
    pub fn apply(&mut self, response: HookResponse) {
        for (field, patch) in response {
            self.values.insert(field.clone(), patch.value);
            if !patch.info.is_empty() {
                self.field_notes.entry(field).or_default().extend(patch.info);
            }
        }
    }

    pub fn push_note(&mut self, diagnostic: Diagnostic) {
        self.notes.push(diagnostic);
    }
}
