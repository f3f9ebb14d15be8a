//! Row representation shared by every stage
//!
//! A [`Record`] is an ordered JSON object keyed by column name. Key order
//! follows the source header.

use serde_json::{Map, Number, Value};

/// One row of the people table, keyed by column name
pub type Record = Map<String, Value>;

/// Infer a JSON value from a raw CSV cell
///
/// Empty cells become `null`, integers that fit `i64` and plain decimals
/// (`-12.5`) become numbers and everything else stays text. Digit runs too
/// long for `i64`, exponent and `inf`/`nan` spellings stay text so their
/// digits survive unchanged.
pub fn infer_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = cell.parse::<i64>() {
        return Value::Number(int.into());
    }
    if is_plain_decimal(cell) {
        if let Some(float) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(float);
        }
    }
    Value::String(cell.to_string())
}

/// Optional sign, digits, exactly one `.`, digits
fn is_plain_decimal(cell: &str) -> bool {
    let unsigned = cell.strip_prefix(['-', '+']).unwrap_or(cell);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            !(whole.is_empty() && fraction.is_empty())
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Coerce any value to text
///
/// Numbers render in their JSON form, `null` becomes empty text.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
