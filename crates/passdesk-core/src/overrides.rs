//! Sparse field and asset replacements for bulk edits.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use passdesk_path::FieldPath;
use serde_json::Value;

use crate::error::Result;

/// Paths of the fields the bulk editor exposes by name.
pub mod paths {
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const FOREGROUND_COLOR: &str = "foregroundColor";
    pub const LABEL_COLOR: &str = "labelColor";
    pub const LOGO_TEXT: &str = "logoText";
    pub const RELEVANT_DATE: &str = "relevantDate";
    pub const HEADER_LABEL: &str = "eventTicket.headerFields.0.label";
    pub const HEADER_VALUE: &str = "eventTicket.headerFields.0.value";
    pub const SECONDARY_LABEL: &str = "eventTicket.secondaryFields.0.label";
    pub const SECONDARY_VALUE: &str = "eventTicket.secondaryFields.0.value";
}

/// Replacement values, in editable representation, applied to every record
/// of a bulk selection.
///
/// Empty values (null, `""`, `[]`, `{}`) are kept but skipped when applied,
/// so an untouched form field never overwrites a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideSet {
    fields: IndexMap<FieldPath, Value>,
    assets: BTreeMap<String, Vec<u8>>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the field at `path`.
    pub fn field(mut self, path: &str, value: impl Into<Value>) -> Result<Self> {
        self.insert(FieldPath::parse(path)?, value.into());
        Ok(self)
    }

    pub fn insert(&mut self, path: FieldPath, value: Value) {
        self.fields.insert(path, value);
    }

    /// Add or replace an asset file.
    pub fn asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(name.into(), bytes.into());
        self
    }

    pub fn background_color(self, hex: &str) -> Self {
        self.named(paths::BACKGROUND_COLOR, hex)
    }

    pub fn foreground_color(self, hex: &str) -> Self {
        self.named(paths::FOREGROUND_COLOR, hex)
    }

    pub fn label_color(self, hex: &str) -> Self {
        self.named(paths::LABEL_COLOR, hex)
    }

    pub fn logo_text(self, text: &str) -> Self {
        self.named(paths::LOGO_TEXT, text)
    }

    pub fn relevant_date(self, local: &str) -> Self {
        self.named(paths::RELEVANT_DATE, local)
    }

    pub fn header_label(self, text: &str) -> Self {
        self.named(paths::HEADER_LABEL, text)
    }

    pub fn header_value(self, local: &str) -> Self {
        self.named(paths::HEADER_VALUE, local)
    }

    pub fn secondary_label(self, text: &str) -> Self {
        self.named(paths::SECONDARY_LABEL, text)
    }

    pub fn secondary_value(self, text: &str) -> Self {
        self.named(paths::SECONDARY_VALUE, text)
    }

    fn named(mut self, path: &'static str, value: &str) -> Self {
        // named paths are constants and always parse
        if let Ok(path) = FieldPath::parse(path) {
            self.fields.insert(path, Value::String(value.to_string()));
        }
        self
    }

    /// Overrides that will actually be written, in insertion order.
    pub fn effective_fields(&self) -> impl Iterator<Item = (&FieldPath, &Value)> {
        self.fields.iter().filter(|(_, v)| !is_empty(v))
    }

    pub fn fields(&self) -> &IndexMap<FieldPath, Value> {
        &self.fields
    }

    pub fn assets(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.assets
    }

    pub fn is_empty(&self) -> bool {
        self.effective_fields().next().is_none() && self.assets.is_empty()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
