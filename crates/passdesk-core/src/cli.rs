//! Core logic of the `pass-edit` binary.
//!
//! ```text
//! pass-edit [--preview] [--standing N | --seat BLOCK,ROW,SEAT] [PATH=TEXT | PATH:=JSON]...
//! ```
//!
//! The pass is read from stdin in wire form. Edits are in editable form:
//! `backgroundColor=#FFFFFF`, `relevantDate=2025-11-01T18:30`.

use serde_json::Value;
use thiserror::Error;

use crate::error::PassError;
use crate::layout::Seating;
use crate::model::PassData;
use crate::session::RecordEditSession;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Pass(#[from] PassError),
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Text { path: String, text: String },
    Json { path: String, json: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditArgs {
    pub edits: Vec<Edit>,
    pub standing: Option<String>,
    pub seat: Option<(String, String, String)>,
    pub preview: bool,
}

impl EditArgs {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = EditArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--preview" => parsed.preview = true,
                "--standing" => {
                    let number = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--standing needs a number".into()))?;
                    parsed.standing = Some(number);
                }
                "--seat" => {
                    let seat = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--seat needs BLOCK,ROW,SEAT".into()))?;
                    parsed.seat = Some(parse_seat(&seat)?);
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::Usage(format!("unknown option `{flag}`")));
                }
                _ => parsed.edits.push(parse_edit(&arg)?),
            }
        }
        if parsed.standing.is_some() && parsed.seat.is_some() {
            return Err(CliError::Usage(
                "--standing and --seat cannot be combined".into(),
            ));
        }
        Ok(parsed)
    }
}

fn parse_seat(text: &str) -> Result<(String, String, String), CliError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [block, row, seat] => Ok((block.to_string(), row.to_string(), seat.to_string())),
        _ => Err(CliError::Usage(format!("`{text}` is not BLOCK,ROW,SEAT"))),
    }
}

fn parse_edit(arg: &str) -> Result<Edit, CliError> {
    let (path, rest) = arg
        .split_once('=')
        .ok_or_else(|| CliError::Usage(format!("`{arg}` is not PATH=VALUE")))?;
    match path.strip_suffix(':') {
        Some(path) => Ok(Edit::Json {
            path: path.to_string(),
            json: rest.to_string(),
        }),
        None => Ok(Edit::Text {
            path: path.to_string(),
            text: rest.to_string(),
        }),
    }
}

// ── pass-edit ─────────────────────────────────────────────────────────────

/// Apply `args` to the pass in `input` and return the resulting document as
/// pretty-printed JSON.
pub fn edit_pass(input: &str, args: &EditArgs) -> Result<String, CliError> {
    let pass = PassData::from_value(serde_json::from_str(input)?)?;
    let serial = pass.serial_number().unwrap_or("-").to_string();
    let mut session = RecordEditSession::open(serial, pass)?;

    for edit in &args.edits {
        match edit {
            Edit::Text { path, text } => session.mutate(path, text.as_str())?,
            Edit::Json { path, json } => {
                let value: Value = serde_json::from_str(json)?;
                session.mutate(path, value)?;
            }
        }
    }

    let seating = if let Some(number) = &args.standing {
        Seating::Standing(number.clone())
    } else if let Some((block, row, seat)) = &args.seat {
        session.reseat(block.as_str(), row.as_str(), seat.as_str())?;
        Seating::Seated
    } else {
        let aux = session.snapshot().auxiliary_fields()?;
        Seating::detect(&aux).ok_or(PassError::VariantMismatch { count: aux.len() })?
    };

    let output = if args.preview {
        session.to_preview(&seating)
    } else {
        session.to_wire_payload(&seating)?.into_value()
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::season_ticket_value;
    use serde_json::json;

    fn run(args: &[&str]) -> Result<Value, CliError> {
        let args = EditArgs::parse(args.iter().copied())?;
        let out = edit_pass(&season_ticket_value().to_string(), &args)?;
        Ok(serde_json::from_str(&out).unwrap())
    }

    #[test]
    fn test_parse_args() {
        let args = EditArgs::parse(["--preview", "logoText=MKL", "--seat", "1, A ,2", "x:=3"]).unwrap();
        assert!(args.preview);
        assert_eq!(args.seat, Some(("1".into(), "A".into(), "2".into())));
        assert_eq!(
            args.edits,
            [
                Edit::Text { path: "logoText".into(), text: "MKL".into() },
                Edit::Json { path: "x".into(), json: "3".into() },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_args() {
        assert!(matches!(EditArgs::parse(["--standing"]), Err(CliError::Usage(_))));
        assert!(matches!(EditArgs::parse(["--seat", "1,2"]), Err(CliError::Usage(_))));
        assert!(matches!(EditArgs::parse(["logoText"]), Err(CliError::Usage(_))));
        assert!(matches!(EditArgs::parse(["--verbose"]), Err(CliError::Usage(_))));
        assert!(matches!(
            EditArgs::parse(["--standing", "1", "--seat", "1,2,3"]),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_no_edits_returns_input() {
        assert_eq!(run(&[]).unwrap(), season_ticket_value());
    }

    #[test]
    fn test_edits_are_converted_to_wire() {
        let out = run(&["backgroundColor=#FFFFFF", "relevantDate=2025-11-01T18:30"]).unwrap();
        assert_eq!(out["backgroundColor"], json!("rgb(255,255,255)"));
        assert_eq!(out["relevantDate"], json!("2025-11-01T18:30:00Z"));
    }

    #[test]
    fn test_standing_and_preview() {
        let out = run(&["--preview", "--standing", "42", "labelColor=#FF0000"]).unwrap();
        assert_eq!(out["labelColor"], json!("#FF0000"));
        assert_eq!(
            out["eventTicket"]["auxiliaryFields"],
            json!([{"key": "standing", "label": "STANDING", "value": "42"}])
        );
    }

    #[test]
    fn test_json_edit() {
        let out = run(&["eventTicket.primaryFields.0.value:={\"n\":1}"]).unwrap();
        assert_eq!(out["eventTicket"]["primaryFields"][0]["value"], json!({"n": 1}));
    }

    #[test]
    fn test_bad_edit_is_reported() {
        let err = run(&["foregroundColor=white"]).unwrap_err();
        assert_eq!(err.to_string(), "invalid color `white` at `foregroundColor`");
    }
}
