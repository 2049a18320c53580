#![allow(dead_code)]

use passdesk_core::{PassData, PassRecord};
use serde_json::{json, Value};

pub fn season_ticket_value(serial: &str) -> Value {
    json!({
        "organizationName": "Milton Keynes Lightning",
        "description": "2025 / 26 Season Ticket",
        "backgroundColor": "rgb(216,189,90)",
        "foregroundColor": "rgb(0,0,0)",
        "labelColor": "rgb(0,0,0)",
        "logoText": "MKL Season Ticket",
        "relevantDate": "2025-05-23T13:00:00Z",
        "eventTicket": {
            "headerFields": [{
                "key": "nextGame", "label": "NEXT GAME",
                "value": "2025-10-10T19:00:00Z", "dateStyle": "PKDateStyleShort"
            }],
            "primaryFields": [{"key": "ticket", "label": "2025/26", "value": "Adult Season Ticket"}],
            "secondaryFields": [
                {"key": "opponent", "label": "OPPONENT", "value": "Leeds Knights"},
                {"key": "ticketType", "label": "TICKET TYPE", "value": "Child"}
            ],
            "auxiliaryFields": [
                {"key": "block", "label": "BLOCK", "value": "13"},
                {"key": "row", "label": "ROW", "value": "B"},
                {"key": "seat", "label": "SEAT", "value": "5"}
            ]
        },
        "barcode": {
            "format": "PKBarcodeFormatQR",
            "message": format!("LTN-ABCD-{serial}"),
            "altText": format!("Ticket {serial}")
        },
        "serialNumber": serial
    })
}

pub fn season_ticket(serial: &str) -> PassData {
    PassData::from_value(season_ticket_value(serial)).unwrap()
}

/// Only the required colors, no header or primary lists, and explicit nulls.
pub fn sparse_ticket_value() -> Value {
    json!({
        "backgroundColor": "rgb(0,0,0)",
        "foregroundColor": "rgb(255,255,255)",
        "labelColor": "rgb(255,255,255)",
        "logoText": "Old",
        "eventTicket": {
            "secondaryFields": [{"key": "opponent", "label": null, "value": "Leeds"}],
            "auxiliaryFields": [
                {"key": "block", "label": "BLOCK", "value": "13"},
                {"key": "row", "label": "ROW", "value": "B"},
                {"key": "seat", "label": "SEAT", "value": "5"}
            ]
        },
        "barcode": {"message": "m", "altText": null}
    })
}

pub fn record(serial: &str) -> PassRecord {
    PassRecord {
        serial_number: serial.to_string(),
        email: format!("{}@example.com", serial.to_lowercase()),
        first_name: "Season".into(),
        last_name: serial.into(),
        status: None,
        pass_data: season_ticket(serial),
    }
}
