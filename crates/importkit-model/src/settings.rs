use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Flat mapping of named visual tokens handed opaquely to the hosting
/// widget. The core assigns no semantics to keys or values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOverrides(BTreeMap<String, String>);

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.0.insert(token.into(), value.into());
    }

    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(token, value);
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// Widget-facing import configuration: the schema plus the surrounding
/// flags, serialized as the plain camelCase key/value structure the widget
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSettings {
    #[serde(rename = "type")]
    pub import_type: String,
    pub title: String,
    pub allow_invalid_submit: bool,
    pub allow_custom: bool,
    pub managed: bool,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style_overrides: StyleOverrides,
}
