//! Single-record editing.
//!
//! A [`RecordEditSession`] loads one wire record, rewrites it into the
//! editable representation, takes path edits, and turns the result back
//! into a wire payload for saving or an editable preview for display.

use passdesk_path::{get, get_str, set_in_place, FieldPath};
use serde_json::Value;
use tracing::debug;

use crate::codec::{hex_to_rgb, iso_to_local, rgb_to_hex, to_iso_z};
use crate::error::{PassError, Result};
use crate::layout::{to_seated, to_standing, Seating};
use crate::model::{PassData, PassField};
use crate::store::{EncodedAssets, PassStore};

pub const COLOR_FIELDS: [&str; 3] = ["backgroundColor", "foregroundColor", "labelColor"];
pub const RELEVANT_DATE: &str = "relevantDate";
pub const HEADER_FIELDS: &str = "eventTicket.headerFields";
pub const AUXILIARY_FIELDS: &str = "eventTicket.auxiliaryFields";

fn path(text: &str) -> Result<FieldPath> {
    Ok(FieldPath::parse(text)?)
}

fn aux_value(aux: Vec<PassField>) -> Value {
    Value::Array(aux.into_iter().map(PassField::into_value).collect())
}

/// A pass record in editable representation: hex colors and
/// minute-resolution local datetimes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableSnapshot {
    value: Value,
}

impl EditableSnapshot {
    /// Rewrite a wire record into editable form.
    pub fn from_wire(pass: &PassData) -> Result<Self> {
        let mut value = pass.to_value();

        for field in COLOR_FIELDS {
            let wire = pass.color(field).unwrap_or_default();
            let hex = rgb_to_hex(wire).map_err(|e| e.at(field))?;
            set_in_place(&mut value, &path(field)?, Value::String(hex))?;
        }

        if let Some(date) = pass.relevant_date() {
            let local = iso_to_local(date).map_err(|e| e.at(RELEVANT_DATE))?;
            set_in_place(&mut value, &path(RELEVANT_DATE)?, Value::String(local))?;
        }

        let headers = path(HEADER_FIELDS)?;
        for (i, header) in pass.header_fields().iter().enumerate() {
            if let Some(Value::String(iso)) = header.value() {
                let target = headers.index(i).child("value")?;
                let local = iso_to_local(iso).map_err(|e| e.at(&target.to_string()))?;
                set_in_place(&mut value, &target, Value::String(local))?;
            }
        }

        Ok(Self { value })
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn get(&self, path: &FieldPath) -> Result<Option<&Value>> {
        Ok(get(&self.value, path)?)
    }

    /// A new snapshot with `path` replaced; `self` is left as is.
    pub fn with(&self, path: &FieldPath, value: Value) -> Result<Self> {
        Ok(Self {
            value: passdesk_path::set(&self.value, path, value)?,
        })
    }

    /// The auxiliary block as currently edited; empty if absent.
    pub fn auxiliary_fields(&self) -> Result<Vec<PassField>> {
        match get(&self.value, &path(AUXILIARY_FIELDS)?)? {
            Some(aux) => Ok(serde_json::from_value(aux.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

/// Editing state for one pass record.
#[derive(Debug, Clone)]
pub struct RecordEditSession {
    serial: String,
    original: PassData,
    baseline: EditableSnapshot,
    snapshot: EditableSnapshot,
    seating: Option<Seating>,
}

impl RecordEditSession {
    /// Start editing `pass`. Fails if the record's colors or dates are not
    /// in wire form.
    pub fn open(serial: impl Into<String>, pass: PassData) -> Result<Self> {
        let snapshot = EditableSnapshot::from_wire(&pass)?;
        let seating = Seating::detect(&pass.auxiliary_fields());
        Ok(Self {
            serial: serial.into(),
            baseline: snapshot.clone(),
            snapshot,
            original: pass,
            seating,
        })
    }

    /// Fetch `serial` from `store` and start editing it.
    pub async fn load(store: &dyn PassStore, serial: &str) -> Result<Self> {
        let pass = store.get(serial).await?;
        Self::open(serial, pass)
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn snapshot(&self) -> &EditableSnapshot {
        &self.snapshot
    }

    /// The record as it was loaded.
    pub fn original(&self) -> &PassData {
        &self.original
    }

    /// Seating recognized when the record was opened.
    pub fn seating(&self) -> Option<&Seating> {
        self.seating.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.snapshot != self.baseline
    }

    pub fn get(&self, path: &str) -> Result<Option<&Value>> {
        self.snapshot.get(&FieldPath::parse(path)?)
    }

    /// Replace the field at `path` in the snapshot.
    pub fn mutate(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.mutate_path(&FieldPath::parse(path)?, value.into())
    }

    pub fn mutate_path(&mut self, path: &FieldPath, value: Value) -> Result<()> {
        self.snapshot = self.snapshot.with(path, value)?;
        debug!(serial = %self.serial, path = %path, "field updated");
        Ok(())
    }

    /// Write a seated `[block, row, seat]` block into the snapshot.
    pub fn reseat(
        &mut self,
        block: impl Into<String>,
        row: impl Into<String>,
        seat: impl Into<String>,
    ) -> Result<()> {
        self.mutate_path(&path(AUXILIARY_FIELDS)?, aux_value(to_seated(block, row, seat)))
    }

    /// The record in wire form, ready to save.
    ///
    /// Colors and dates whose editable text is unchanged since the session
    /// was opened keep their original wire text, so only edited fields are
    /// guaranteed to come out in canonical form.
    pub fn to_wire_payload(&self, seating: &Seating) -> Result<PassData> {
        let mut value = self.snapshot.as_value().clone();

        let aux = seating.apply(&self.snapshot.auxiliary_fields()?)?;
        set_in_place(&mut value, &path(AUXILIARY_FIELDS)?, aux_value(aux))?;

        for field in COLOR_FIELDS {
            let target = path(field)?;
            let wire = self.restore(&target, self.original.color(field), hex_to_rgb)?;
            set_in_place(&mut value, &target, wire)?;
        }

        let target = path(RELEVANT_DATE)?;
        if get(&value, &target)?.is_some_and(|v| !v.is_null()) {
            let wire = self.restore(&target, self.original.relevant_date(), to_iso_z)?;
            set_in_place(&mut value, &target, wire)?;
        }

        let headers = path(HEADER_FIELDS)?;
        let original_headers = self.original.header_fields();
        let count = get(&value, &headers)?
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        for i in 0..count {
            let target = headers.index(i).child("value")?;
            if get_str(&value, &target)?.is_none() {
                continue;
            }
            let original = original_headers
                .get(i)
                .and_then(PassField::value)
                .and_then(Value::as_str);
            let wire = self.restore(&target, original, to_iso_z)?;
            set_in_place(&mut value, &target, wire)?;
        }

        PassData::from_value(value)
    }

    /// The snapshot with `seating` applied, for live display.
    ///
    /// No codec conversion, no I/O; a seated request on an unrecognized
    /// block shows the block unchanged.
    pub fn to_preview(&self, seating: &Seating) -> Value {
        let mut value = self.snapshot.as_value().clone();
        if let Seating::Standing(number) = seating {
            if let Some(Value::Object(ticket)) = value.get_mut("eventTicket") {
                ticket.insert("auxiliaryFields".to_string(), aux_value(to_standing(number.clone())));
            }
        }
        value
    }

    /// Save the wire payload to `store` and make it the new baseline.
    pub async fn save(
        &mut self,
        store: &dyn PassStore,
        seating: &Seating,
        assets: &EncodedAssets,
    ) -> Result<PassData> {
        let payload = self.to_wire_payload(seating)?;
        store.save(&self.serial, &payload, assets).await?;
        debug!(serial = %self.serial, assets = assets.len(), "pass saved");
        *self = Self::open(self.serial.clone(), payload.clone())?;
        Ok(payload)
    }

    /// Convert the editable value at `target` back to wire text, reusing
    /// `original` when the value was not edited.
    fn restore(
        &self,
        target: &FieldPath,
        original: Option<&str>,
        convert: fn(&str) -> Result<String>,
    ) -> Result<Value> {
        let current = self.snapshot.get(target)?;
        let field = target.to_string();
        let text = match current {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(PassError::InvalidRecord(format!(
                    "`{field}` must be a string, found {other}"
                )))
            }
            None => {
                return Err(PassError::InvalidRecord(format!("`{field}` is missing")));
            }
        };
        if let (Some(original), Some(Value::String(before))) = (original, self.baseline.get(target)?) {
            if before == text {
                return Ok(Value::String(original.to_string()));
            }
        }
        convert(text).map(Value::String).map_err(|e| e.at(&field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::detect_standing;
    use crate::model::fixtures::{season_ticket, season_ticket_value, sparse_ticket_value};
    use serde_json::json;

    fn session() -> RecordEditSession {
        RecordEditSession::open("LTN-1357", season_ticket()).unwrap()
    }

    #[test]
    fn test_open_builds_editable_snapshot() {
        let s = session();
        let v = s.snapshot().as_value();
        assert_eq!(v["backgroundColor"], json!("#D8BD5A"));
        assert_eq!(v["foregroundColor"], json!("#000000"));
        assert_eq!(v["relevantDate"], json!("2025-05-23T13:00"));
        assert_eq!(v["eventTicket"]["headerFields"][0]["value"], json!("2025-10-10T19:00"));
        assert_eq!(s.seating(), Some(&Seating::Seated));
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_open_rejects_bad_wire_color() {
        let mut pass = season_ticket();
        pass.set_label_color("black");
        let err = RecordEditSession::open("x", pass).unwrap_err();
        assert_eq!(err.field(), Some("labelColor"));
    }

    #[test]
    fn test_mutate_and_get() {
        let mut s = session();
        s.mutate("eventTicket.secondaryFields.0.value", "Sheffield Steeldogs").unwrap();
        assert_eq!(
            s.get("eventTicket.secondaryFields.0.value").unwrap(),
            Some(&json!("Sheffield Steeldogs"))
        );
        assert!(s.is_dirty());
    }

    #[test]
    fn test_mutate_invalid_path() {
        let mut s = session();
        let err = s.mutate("eventTicket.primaryFields.4.value", "x").unwrap_err();
        assert!(matches!(err, PassError::InvalidPath(_)));
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_wire_payload_converts_edited_color() {
        let mut s = session();
        s.mutate("backgroundColor", "#d8bd5b").unwrap();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.background_color(), "rgb(216,189,91)");
    }

    #[test]
    fn test_wire_payload_hex_spec_example() {
        let mut s = session();
        s.mutate("backgroundColor", "#D8BD5A").unwrap();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.background_color(), "rgb(216,189,90)");
    }

    #[test]
    fn test_wire_payload_converts_dates() {
        let mut s = session();
        s.mutate("relevantDate", "2025-11-01T18:30").unwrap();
        s.mutate("eventTicket.headerFields.0.value", "2025-11-02T19:00").unwrap();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.relevant_date(), Some("2025-11-01T18:30:00Z"));
        assert_eq!(
            wire.header_fields()[0].value(),
            Some(&json!("2025-11-02T19:00:00Z"))
        );
    }

    #[test]
    fn test_unedited_record_round_trips() {
        let s = session();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.to_value(), season_ticket_value());
    }

    #[test]
    fn test_unedited_noncanonical_wire_text_is_kept() {
        let mut pass = season_ticket();
        pass.set_background_color("rgb(216, 189, 90)");
        pass.set_relevant_date("2025-05-23T13:00:00.000Z");
        let s = RecordEditSession::open("x", pass).unwrap();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.background_color(), "rgb(216, 189, 90)");
        assert_eq!(wire.relevant_date(), Some("2025-05-23T13:00:00.000Z"));
    }

    #[test]
    fn test_wire_payload_rejects_typed_garbage() {
        let mut s = session();
        s.mutate("labelColor", "not a color").unwrap();
        let err = s.to_wire_payload(&Seating::Seated).unwrap_err();
        assert!(matches!(err, PassError::InvalidColor { .. }));
        assert_eq!(err.field(), Some("labelColor"));

        let mut s = session();
        s.mutate("eventTicket.headerFields.0.value", "next friday").unwrap();
        let err = s.to_wire_payload(&Seating::Seated).unwrap_err();
        assert_eq!(err.field(), Some("eventTicket.headerFields.0.value"));
    }

    #[test]
    fn test_standing_payload() {
        let s = session();
        let wire = s.to_wire_payload(&Seating::Standing("42".into())).unwrap();
        assert_eq!(wire.auxiliary_fields(), to_standing("42"));
        assert!(detect_standing(&wire.auxiliary_fields()));
    }

    #[test]
    fn test_seated_payload_from_standing_record_needs_reseat() {
        let mut pass = season_ticket();
        pass.set_auxiliary_fields(to_standing("42"));
        let mut s = RecordEditSession::open("x", pass).unwrap();
        assert_eq!(s.seating(), Some(&Seating::Standing("42".into())));

        let err = s.to_wire_payload(&Seating::Seated).unwrap_err();
        assert_eq!(err, PassError::VariantMismatch { count: 1 });

        s.reseat("14", "C", "9").unwrap();
        let wire = s.to_wire_payload(&Seating::Seated).unwrap();
        assert_eq!(wire.auxiliary_fields(), to_seated("14", "C", "9"));
    }

    #[test]
    fn test_preview_keeps_editable_form() {
        let mut s = session();
        s.mutate("foregroundColor", "#FFFFFF").unwrap();
        let preview = s.to_preview(&Seating::Standing("7".into()));
        assert_eq!(preview["foregroundColor"], json!("#FFFFFF"));
        assert_eq!(preview["relevantDate"], json!("2025-05-23T13:00"));
        assert_eq!(
            preview["eventTicket"]["auxiliaryFields"],
            json!([{"key": "standing", "label": "STANDING", "value": "7"}])
        );
        // the snapshot itself is untouched
        assert_eq!(s.snapshot().as_value()["eventTicket"]["auxiliaryFields"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_preview_passes_unrecognized_layout_through() {
        let mut pass = season_ticket();
        let mut aux = pass.auxiliary_fields();
        aux.truncate(2);
        pass.set_auxiliary_fields(aux);
        let s = RecordEditSession::open("x", pass).unwrap();
        let preview = s.to_preview(&Seating::Seated);
        assert_eq!(preview["eventTicket"]["auxiliaryFields"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_sparse_record_keeps_absent_and_null_keys() {
        let pass = PassData::from_value(sparse_ticket_value()).unwrap();
        let mut s = RecordEditSession::open("x", pass).unwrap();
        s.mutate("logoText", "New Name").unwrap();

        let wire = s.to_wire_payload(&Seating::Seated).unwrap();

        let mut expected = sparse_ticket_value();
        expected["logoText"] = json!("New Name");
        assert_eq!(wire.to_value(), expected);
    }

    #[test]
    fn test_preview_standing_entry() {
        let s = session();
        let preview = s.to_preview(&Seating::Standing("9".into()));
        assert_eq!(preview["eventTicket"]["auxiliaryFields"][0]["key"], json!("standing"));
        assert_eq!(preview["eventTicket"]["auxiliaryFields"].as_array().unwrap().len(), 1);
    }
}
