//! Per-cell type conversion with explicit failure modes.
//!
//! Missing values (JSON null and the empty string) convert to null for every
//! target type; they are never a conversion error. Required-field emptiness
//! is checked separately by the row processor.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use thiserror::Error;

use sheetmap_model::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("cannot convert \"{0}\" to number")]
    Number(String),
    #[error("cannot convert \"{0}\" to date")]
    Date(String),
    #[error("cannot convert \"{0}\" to boolean")]
    Boolean(String),
}

/// True for values the engine treats as missing.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Convert a raw cell to the target type.
pub fn convert_value(value: &Value, target: DataType) -> Result<Value, ConvertError> {
    if is_missing(value) {
        return Ok(Value::Null);
    }
    match target {
        DataType::String => Ok(Value::String(display_string(value))),
        DataType::Number => convert_number(value),
        DataType::Date => convert_date(value),
        DataType::Boolean => convert_boolean(value),
    }
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn convert_number(value: &Value) -> Result<Value, ConvertError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(json_number(n)),
        _ => Err(ConvertError::Number(display_string(value))),
    }
}

/// Keep integral values integral so exports read naturally.
fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        return Value::Number(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn convert_date(value: &Value) -> Result<Value, ConvertError> {
    let raw = display_string(value);
    match parse_date(&raw) {
        Some(dt) => Ok(Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string())),
        None => Err(ConvertError::Date(raw)),
    }
}

fn convert_boolean(value: &Value) -> Result<Value, ConvertError> {
    if let Value::Bool(b) = value {
        return Ok(Value::Bool(*b));
    }
    let raw = display_string(value);
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(Value::Bool(true)),
        "false" | "0" | "no" | "n" => Ok(Value::Bool(false)),
        _ => Err(ConvertError::Boolean(raw)),
    }
}

/// Parse a date or datetime from the formats commonly seen in spreadsheets.
///
/// Date-only inputs are anchored at midnight.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_values_convert_to_null_for_every_type() {
        for target in [
            DataType::String,
            DataType::Number,
            DataType::Date,
            DataType::Boolean,
        ] {
            assert_eq!(convert_value(&Value::Null, target), Ok(Value::Null));
            assert_eq!(convert_value(&json!(""), target), Ok(Value::Null));
        }
    }

    #[test]
    fn string_cast_always_succeeds() {
        assert_eq!(
            convert_value(&json!("plc-7"), DataType::String),
            Ok(json!("plc-7"))
        );
        assert_eq!(convert_value(&json!(42), DataType::String), Ok(json!("42")));
        assert_eq!(
            convert_value(&json!(true), DataType::String),
            Ok(json!("true"))
        );
    }

    #[test]
    fn number_conversion() {
        assert_eq!(convert_value(&json!("12"), DataType::Number), Ok(json!(12)));
        assert_eq!(
            convert_value(&json!(" 3.5 "), DataType::Number),
            Ok(json!(3.5))
        );
        assert_eq!(convert_value(&json!(7), DataType::Number), Ok(json!(7)));

        let error = convert_value(&json!("abc"), DataType::Number).unwrap_err();
        assert_eq!(error.to_string(), "cannot convert \"abc\" to number");
        assert!(convert_value(&json!("inf"), DataType::Number).is_err());
    }

    #[test]
    fn date_conversion_emits_iso_8601() {
        assert_eq!(
            convert_value(&json!("2024-03-05"), DataType::Date),
            Ok(json!("2024-03-05T00:00:00"))
        );
        assert_eq!(
            convert_value(&json!("03/05/2024"), DataType::Date),
            Ok(json!("2024-03-05T00:00:00"))
        );
        assert_eq!(
            convert_value(&json!("2024-03-05T10:30:00"), DataType::Date),
            Ok(json!("2024-03-05T10:30:00"))
        );
        assert_eq!(
            convert_value(&json!("5-Mar-2024"), DataType::Date),
            Ok(json!("2024-03-05T00:00:00"))
        );
        assert!(convert_value(&json!("not a date"), DataType::Date).is_err());
    }

    #[test]
    fn boolean_conversion() {
        assert_eq!(
            convert_value(&json!(true), DataType::Boolean),
            Ok(json!(true))
        );
        for truthy in ["true", "TRUE", "1", "yes", "Y"] {
            assert_eq!(
                convert_value(&json!(truthy), DataType::Boolean),
                Ok(json!(true)),
                "{truthy}"
            );
        }
        for falsy in ["false", "0", "no", "N"] {
            assert_eq!(
                convert_value(&json!(falsy), DataType::Boolean),
                Ok(json!(false)),
                "{falsy}"
            );
        }
        assert!(convert_value(&json!("maybe"), DataType::Boolean).is_err());
    }

    #[test]
    fn numeric_one_and_zero_are_booleans() {
        assert_eq!(convert_value(&json!(1), DataType::Boolean), Ok(json!(true)));
        assert_eq!(
            convert_value(&json!(0), DataType::Boolean),
            Ok(json!(false))
        );
    }
}
