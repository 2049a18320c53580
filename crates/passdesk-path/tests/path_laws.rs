use passdesk_path::{get, set, FieldPath};
use proptest::prelude::*;
use serde_json::{json, Value};

fn ticket() -> Value {
    json!({
        "organizationName": "Milton Keynes Lightning",
        "logoText": "MKL Season Ticket",
        "eventTicket": {
            "headerFields": [{"key": "nextGame", "label": "NEXT GAME", "value": "2025-10-10T19:00"}],
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
        "barcode": {"message": "LTN-ABCD-1357", "altText": "Ticket 1357"}
    })
}

const RESOLVABLE: &[&str] = &[
    "logoText",
    "organizationName",
    "eventTicket.headerFields.0.value",
    "eventTicket.headerFields.0.dateStyle",
    "eventTicket.secondaryFields.1.value",
    "eventTicket.secondaryFields.1.textAlignment",
    "eventTicket.auxiliaryFields.2.value",
    "barcode.message",
    "barcode.altText",
];

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::String),
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
    ]
}

proptest! {
    #[test]
    fn set_then_get_returns_the_value(idx in 0..RESOLVABLE.len(), value in leaf_value()) {
        let doc = ticket();
        let before = doc.clone();
        let path = FieldPath::parse(RESOLVABLE[idx]).unwrap();

        let next = set(&doc, &path, value.clone()).unwrap();

        prop_assert_eq!(get(&next, &path).unwrap(), Some(&value));
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn set_touches_only_the_target(idx in 0..RESOLVABLE.len(), value in leaf_value()) {
        let doc = ticket();
        let target = FieldPath::parse(RESOLVABLE[idx]).unwrap();
        let next = set(&doc, &target, value).unwrap();

        for other in RESOLVABLE.iter().filter(|p| **p != RESOLVABLE[idx]) {
            let other = FieldPath::parse(other).unwrap();
            prop_assert_eq!(get(&next, &other).unwrap(), get(&doc, &other).unwrap());
        }
    }
}

#[test]
fn get_through_absent_nodes_never_errors() {
    let doc = ticket();
    for text in ["missing", "missing.deeper", "barcode.format.kind", "eventTicket.primaryFields.0"] {
        let path = FieldPath::parse(text).unwrap();
        assert_eq!(get(&doc, &path).unwrap(), None, "{text}");
    }
}

#[test]
fn set_without_intermediate_is_invalid_path() {
    let doc = ticket();
    let path = FieldPath::parse("eventTicket.primaryFields.0.label").unwrap();
    let err = set(&doc, &path, json!("2025/26")).unwrap_err();
    assert_eq!(err.path(), "eventTicket.primaryFields.0.label");
}
