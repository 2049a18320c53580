//! Wire-format pass records.
//!
//! A record is kept as the JSON object the store delivered. Accessors read
//! the handful of fields the engine understands; everything else, including
//! absent keys and explicit `null`s, goes back to the store exactly as it
//! came.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{PassError, Result};

pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const FOREGROUND_COLOR: &str = "foregroundColor";
pub const LABEL_COLOR: &str = "labelColor";
pub const LOGO_TEXT: &str = "logoText";
pub const RELEVANT_DATE: &str = "relevantDate";
pub const EVENT_TICKET: &str = "eventTicket";
pub const SERIAL_NUMBER: &str = "serialNumber";

/// The ordered field lists of an `eventTicket`.
pub const FIELD_LISTS: [&str; 4] = [
    "headerFields",
    "primaryFields",
    "secondaryFields",
    "auxiliaryFields",
];

/// One `{key, label, value, ...}` entry of a ticket field list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassField {
    entries: Map<String, Value>,
}

impl PassField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut entries = Map::new();
        entries.insert("key".into(), Value::String(key.into()));
        entries.insert("label".into(), Value::String(label.into()));
        entries.insert("value".into(), value.into());
        Self { entries }
    }

    /// The entry's `key`, or `""` when it has none.
    pub fn key(&self) -> &str {
        self.entries.get("key").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn label(&self) -> Option<&str> {
        self.entries.get("label").and_then(Value::as_str)
    }

    pub fn value(&self) -> Option<&Value> {
        self.entries.get("value")
    }

    /// The value as text; numbers and booleans are rendered, null and
    /// absent are empty.
    pub fn value_text(&self) -> String {
        match self.value() {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

impl From<Map<String, Value>> for PassField {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

/// A pass record in wire representation.
///
/// The three colors are always strings. `relevantDate` is a string, null
/// or absent. `eventTicket`, when present, is an object whose field lists
/// are arrays of objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PassData {
    fields: Map<String, Value>,
}

impl PassData {
    /// Decode a record delivered either as an object or as a JSON string
    /// holding the object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(serde_json::from_str(&text)?),
            Value::Object(fields) => Self::try_from(fields),
            other => Err(PassError::InvalidRecord(format!(
                "expected an object, found {other}"
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn background_color(&self) -> &str {
        self.text(BACKGROUND_COLOR).unwrap_or_default()
    }

    pub fn foreground_color(&self) -> &str {
        self.text(FOREGROUND_COLOR).unwrap_or_default()
    }

    pub fn label_color(&self) -> &str {
        self.text(LABEL_COLOR).unwrap_or_default()
    }

    /// Wire text of a color field by its key.
    pub fn color(&self, key: &str) -> Option<&str> {
        self.text(key)
    }

    pub fn set_background_color(&mut self, rgb: impl Into<String>) {
        self.fields.insert(BACKGROUND_COLOR.into(), Value::String(rgb.into()));
    }

    pub fn set_foreground_color(&mut self, rgb: impl Into<String>) {
        self.fields.insert(FOREGROUND_COLOR.into(), Value::String(rgb.into()));
    }

    pub fn set_label_color(&mut self, rgb: impl Into<String>) {
        self.fields.insert(LABEL_COLOR.into(), Value::String(rgb.into()));
    }

    pub fn logo_text(&self) -> Option<&str> {
        self.text(LOGO_TEXT)
    }

    pub fn relevant_date(&self) -> Option<&str> {
        self.text(RELEVANT_DATE)
    }

    pub fn set_relevant_date(&mut self, iso: impl Into<String>) {
        self.fields.insert(RELEVANT_DATE.into(), Value::String(iso.into()));
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.text(SERIAL_NUMBER)
    }

    /// Entries of one `eventTicket` field list; empty when absent.
    pub fn field_list(&self, list: &str) -> Vec<PassField> {
        self.fields
            .get(EVENT_TICKET)
            .and_then(|ticket| ticket.get(list))
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .cloned()
                    .map(PassField::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn header_fields(&self) -> Vec<PassField> {
        self.field_list("headerFields")
    }

    pub fn secondary_fields(&self) -> Vec<PassField> {
        self.field_list("secondaryFields")
    }

    pub fn auxiliary_fields(&self) -> Vec<PassField> {
        self.field_list("auxiliaryFields")
    }

    /// Replace the auxiliary block, creating `eventTicket` if needed.
    pub fn set_auxiliary_fields(&mut self, aux: Vec<PassField>) {
        let ticket = self
            .fields
            .entry(EVENT_TICKET)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(ticket) = ticket {
            ticket.insert(
                "auxiliaryFields".into(),
                Value::Array(aux.into_iter().map(PassField::into_value).collect()),
            );
        }
    }
}

impl TryFrom<Map<String, Value>> for PassData {
    type Error = PassError;

    fn try_from(fields: Map<String, Value>) -> Result<Self> {
        for key in [BACKGROUND_COLOR, FOREGROUND_COLOR, LABEL_COLOR] {
            if !fields.get(key).is_some_and(Value::is_string) {
                return Err(PassError::InvalidRecord(format!("`{key}` must be a string")));
            }
        }
        if let Some(date) = fields.get(RELEVANT_DATE) {
            if !(date.is_string() || date.is_null()) {
                return Err(PassError::InvalidRecord(format!(
                    "`{RELEVANT_DATE}` must be a string or null"
                )));
            }
        }
        match fields.get(EVENT_TICKET) {
            None => {}
            Some(Value::Object(ticket)) => {
                for list in FIELD_LISTS {
                    let valid = match ticket.get(list) {
                        None => true,
                        Some(Value::Array(entries)) => entries.iter().all(Value::is_object),
                        Some(_) => false,
                    };
                    if !valid {
                        return Err(PassError::InvalidRecord(format!(
                            "`{EVENT_TICKET}.{list}` must be an array of objects"
                        )));
                    }
                }
            }
            Some(_) => {
                return Err(PassError::InvalidRecord(format!(
                    "`{EVENT_TICKET}` must be an object"
                )))
            }
        }
        Ok(Self { fields })
    }
}

impl Serialize for PassData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// A row of the pass listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassRecord {
    pub serial_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, alias = "emailStatus", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_pass_data")]
    pub pass_data: PassData,
}

impl PassRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

fn deserialize_pass_data<'de, D>(deserializer: D) -> std::result::Result<PassData, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    PassData::from_value(value).map_err(serde::de::Error::custom)
}
