//! Seated and standing ticket layouts.
//!
//! A ticket's auxiliary fields hold either one `standing` entry or three
//! entries ordered `[block, row, seat]`. Any other shape is left alone and
//! reported as unrecognized.

use crate::error::{PassError, Result};
use crate::model::PassField;

pub const STANDING_KEY: &str = "standing";
pub const STANDING_LABEL: &str = "STANDING";

/// Conventional `(key, label)` pairs of the seated entries, in order.
pub const SEATED_KEYS: [(&str, &str); 3] = [("block", "BLOCK"), ("row", "ROW"), ("seat", "SEAT")];

/// True iff `aux` is a single entry tagged as standing.
pub fn detect_standing(aux: &[PassField]) -> bool {
    match aux {
        [only] => {
            only.key() == STANDING_KEY
                || only
                    .label()
                    .is_some_and(|l| l.eq_ignore_ascii_case(STANDING_LABEL))
        }
        _ => false,
    }
}

/// The single-entry standing block.
pub fn to_standing(value: impl Into<String>) -> Vec<PassField> {
    vec![PassField::new(STANDING_KEY, STANDING_LABEL, value.into())]
}

/// The three-entry seated block in `[block, row, seat]` order.
pub fn to_seated(
    block: impl Into<String>,
    row: impl Into<String>,
    seat: impl Into<String>,
) -> Vec<PassField> {
    let values = [block.into(), row.into(), seat.into()];
    SEATED_KEYS
        .iter()
        .zip(values)
        .map(|((key, label), value)| PassField::new(*key, *label, value))
        .collect()
}

/// A recognized auxiliary-field layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketLayout {
    Standing { number: String },
    Seated { block: String, row: String, seat: String },
}

impl TicketLayout {
    /// Interpret an auxiliary block. `None` for shapes that are neither.
    pub fn resolve(aux: &[PassField]) -> Option<TicketLayout> {
        if detect_standing(aux) {
            return Some(TicketLayout::Standing {
                number: aux[0].value_text(),
            });
        }
        match aux {
            [block, row, seat] => Some(TicketLayout::Seated {
                block: block.value_text(),
                row: row.value_text(),
                seat: seat.value_text(),
            }),
            _ => None,
        }
    }

    /// Like [`resolve`](Self::resolve), failing with `VariantMismatch`.
    pub fn require(aux: &[PassField]) -> Result<TicketLayout> {
        Self::resolve(aux).ok_or(PassError::VariantMismatch { count: aux.len() })
    }

    pub fn is_standing(&self) -> bool {
        matches!(self, TicketLayout::Standing { .. })
    }

    pub fn to_aux_fields(&self) -> Vec<PassField> {
        match self {
            TicketLayout::Standing { number } => to_standing(number.clone()),
            TicketLayout::Seated { block, row, seat } => {
                to_seated(block.clone(), row.clone(), seat.clone())
            }
        }
    }
}

/// The layout a caller asks for when materializing a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seating {
    /// Replace the auxiliary block with a standing entry.
    Standing(String),
    /// Keep the record's own three seated entries.
    Seated,
}

impl Seating {
    /// The seating a record already has, if it has a recognized one.
    pub fn detect(aux: &[PassField]) -> Option<Seating> {
        match TicketLayout::resolve(aux)? {
            TicketLayout::Standing { number } => Some(Seating::Standing(number)),
            TicketLayout::Seated { .. } => Some(Seating::Seated),
        }
    }

    pub fn is_standing(&self) -> bool {
        matches!(self, Seating::Standing(_))
    }

    /// Produce the auxiliary block to save under this seating.
    ///
    /// Seated keeps `aux` untouched but requires it to be a three-entry
    /// block; standing always rebuilds it.
    pub fn apply(&self, aux: &[PassField]) -> Result<Vec<PassField>> {
        match self {
            Seating::Standing(number) => Ok(to_standing(number.clone())),
            Seating::Seated => match TicketLayout::require(aux)? {
                TicketLayout::Seated { .. } => Ok(aux.to_vec()),
                TicketLayout::Standing { .. } => Err(PassError::VariantMismatch { count: aux.len() }),
            },
        }
    }
}
