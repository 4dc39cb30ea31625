//! JSON arrays of card objects.

use serde_json::{Map, Value};

use super::{non_blank, parse_quantity, positive_quantity, ParseResult};
use crate::error::ParseError;
use crate::types::CardEntry;

const NAME_KEYS: [&str; 2] = ["cardName", "name"];
const QUANTITY_KEYS: [&str; 2] = ["quantity", "count"];
const SET_NAME_KEYS: [&str; 2] = ["setName", "set"];
const SET_NUMBER_KEYS: [&str; 3] = ["setNumber", "number", "collectorNumber"];
const ID_KEYS: [&str; 2] = ["cardId", "id"];

pub(super) fn parse_json_text(raw: &str) -> Vec<ParseResult> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => parse_json_value(&value),
        Err(e) => vec![Err(ParseError::file_level("Invalid JSON")
            .with_suggestion(format!("check the file syntax ({})", e)))],
    }
}

pub(super) fn parse_json_value(value: &Value) -> Vec<ParseResult> {
    let Some(items) = value.as_array() else {
        return vec![Err(ParseError::file_level("Expected a JSON array")
            .with_suggestion("wrap card objects in [ ... ]"))];
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_object(item, idx + 1))
        .collect()
}

fn parse_object(item: &Value, line_num: usize) -> ParseResult {
    let missing_name = || {
        ParseError::new(line_num, "Missing card name in object")
            .with_suggestion("add a \"cardName\" or \"name\" field")
    };

    let object = item.as_object().ok_or_else(missing_name)?;
    let name = string_field(object, &NAME_KEYS).ok_or_else(missing_name)?;

    let quantity = first_present(object, &QUANTITY_KEYS)
        .map(coerce_quantity)
        .unwrap_or(0);
    let quantity = positive_quantity(quantity).ok_or_else(|| {
        ParseError::new(line_num, "Invalid quantity in object")
            .with_suggestion("\"quantity\" must be a positive integer")
    })?;

    let mut entry = CardEntry::named(line_num, name, quantity);
    entry.set_name = string_field(object, &SET_NAME_KEYS);
    entry.set_number = string_field(object, &SET_NUMBER_KEYS);
    entry.card_id = string_field(object, &ID_KEYS);
    Ok(entry)
}

fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// First key holding a non-blank string or a number, as a trimmed string.
fn string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn coerce_quantity(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_quantity(s),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn malformed_json_is_one_file_level_error() {
        let results = parse_json_text("{not valid json");
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.file_level);
        assert_eq!(err.message, "Invalid JSON");
    }

    #[test]
    fn non_array_top_level_is_rejected() {
        let results = parse_json_value(&json!({ "cardName": "Zaku", "quantity": 1 }));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap_err().message, "Expected a JSON array");
    }

    #[test]
    fn parses_objects_with_aliases() {
        let value = json!([
            { "cardName": "Zaku II", "quantity": 2, "setName": "Origins", "cardId": "ST01-010" },
            { "name": "Gouf", "count": "3", "set": "Blue", "id": 77, "number": "012" },
        ]);
        let results = parse_json_value(&value);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.card_name, "Zaku II");
        assert_eq!(first.quantity, 2);
        assert_eq!(first.set_name.as_deref(), Some("Origins"));
        assert_eq!(first.card_id.as_deref(), Some("ST01-010"));
        assert_eq!(first.source_line, 1);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.card_name, "Gouf");
        assert_eq!(second.quantity, 3);
        assert_eq!(second.set_name.as_deref(), Some("Blue"));
        assert_eq!(second.set_number.as_deref(), Some("012"));
        assert_eq!(second.card_id.as_deref(), Some("77"));
        assert_eq!(second.source_line, 2);
    }

    #[test]
    fn card_name_takes_precedence_over_name() {
        let results = parse_json_value(&json!([{ "cardName": "A", "name": "B", "quantity": 1 }]));
        assert_eq!(results[0].as_ref().unwrap().card_name, "A");
    }

    #[test]
    fn blank_card_name_falls_back_to_name() {
        let results = parse_json_value(&json!([{ "cardName": " ", "name": "B", "quantity": 1 }]));
        assert_eq!(results[0].as_ref().unwrap().card_name, "B");
    }

    #[test]
    fn missing_name_and_bad_quantity() {
        let value = json!([
            { "quantity": 1 },
            { "cardName": "Zaku" },
            { "cardName": "Zaku", "quantity": 0 },
            { "cardName": "Zaku", "quantity": "many" },
            "Zaku",
        ]);
        let errors: Vec<_> = parse_json_value(&value)
            .into_iter()
            .map(|r| r.unwrap_err())
            .collect();
        assert!(errors.iter().all(|e| !e.file_level));
        assert_eq!(errors[0].message, "Missing card name in object");
        assert_eq!(errors[1].message, "Invalid quantity in object");
        assert_eq!(errors[2].message, "Invalid quantity in object");
        assert_eq!(errors[3].message, "Invalid quantity in object");
        assert_eq!(errors[4].message, "Missing card name in object");
        let lines: Vec<_> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn fractional_quantity_truncates() {
        let results = parse_json_value(&json!([{ "cardName": "Zaku", "quantity": 2.7 }]));
        assert_eq!(results[0].as_ref().unwrap().quantity, 2);
    }

    #[test]
    fn empty_array_yields_nothing() {
        assert!(parse_json_text("[]").is_empty());
    }
}
