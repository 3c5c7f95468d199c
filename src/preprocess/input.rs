use serde_json::{Map, Value};

use super::impute::{is_placeholder, ImputationTable};
use crate::error::ApiError;

/// Numeric conversion applied to whatever JSON value a client sent for a
/// field. Numeric strings are accepted because HTML form clients tend to
/// send everything as strings; booleans coerce the way numeric casts do.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Strict extraction: every expected field must be present and numeric.
/// The first offending field terminates the request with an error that
/// names it. Field order in the output matches `fields`.
pub fn extract_strict(
    payload: &Map<String, Value>,
    fields: &[&str],
) -> Result<Vec<f64>, ApiError> {
    let mut values = Vec::with_capacity(fields.len());
    for &field in fields {
        let value = payload
            .get(field)
            .ok_or_else(|| ApiError::MissingField(field.to_string()))?;
        let number = numeric(value).ok_or_else(|| ApiError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
        })?;
        values.push(number);
    }
    Ok(values)
}

/// Lenient extraction: a missing field, a JSON null, a placeholder token
/// ("", "na", "nan", "null"), or a value that fails numeric conversion is
/// silently replaced by that field's training-set mean. Never fails.
pub fn extract_lenient(
    payload: &Map<String, Value>,
    fields: &[&str],
    table: &ImputationTable,
) -> Vec<f64> {
    fields
        .iter()
        .enumerate()
        .map(|(i, &field)| match payload.get(field) {
            None | Some(Value::Null) => table.fallback(i),
            Some(Value::String(s)) if is_placeholder(s) => table.fallback(i),
            Some(value) => numeric(value).unwrap_or_else(|| table.fallback(i)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: [&str; 3] = ["age", "bmi", "glucose"];

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    #[test]
    fn strict_accepts_numbers_numeric_strings_and_bools() {
        let body = payload(json!({"age": 50, "bmi": " 33.6 ", "glucose": true}));
        let values = extract_strict(&body, &FIELDS).unwrap();
        assert_eq!(values, vec![50.0, 33.6, 1.0]);
    }

    #[test]
    fn strict_names_the_missing_field() {
        let body = payload(json!({"age": 50, "glucose": 148}));
        let err = extract_strict(&body, &FIELDS).unwrap_err();
        assert_eq!(err, ApiError::MissingField("bmi".to_string()));
    }

    #[test]
    fn strict_rejects_non_numeric_values() {
        let body = payload(json!({"age": 50, "bmi": "heavy", "glucose": 148}));
        let err = extract_strict(&body, &FIELDS).unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { ref field, .. } if field == "bmi"));
    }

    #[test]
    fn lenient_imputes_missing_placeholder_and_unconvertible() {
        let table = ImputationTable::new(vec![45.0, 25.0, 100.0]);
        let body = payload(json!({"age": "NA", "bmi": {"nested": 1}}));
        let values = extract_lenient(&body, &FIELDS, &table);
        assert_eq!(values, vec![45.0, 25.0, 100.0]);
    }

    #[test]
    fn lenient_keeps_supplied_values() {
        let table = ImputationTable::new(vec![45.0, 25.0, 100.0]);
        let body = payload(json!({"age": 60, "bmi": "31.2", "glucose": null}));
        let values = extract_lenient(&body, &FIELDS, &table);
        assert_eq!(values, vec![60.0, 31.2, 100.0]);
    }
}
