//! Lenient field access for upstream JSON payloads.
//!
//! Missing or malformed fields read as zero/empty; an `"error"` key marks
//! the whole payload as an upstream failure.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Upstream error message carried in the payload, if any
pub fn error_marker(payload: &Value) -> Option<String> {
    payload.get("error").map(|err| match err {
        Value::String(msg) => msg.clone(),
        other => other.to_string(),
    })
}

/// Decimal from a JSON number or numeric string; zero otherwise
pub fn decimal(value: &Value) -> Decimal {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}

/// Decimal field of an object, zero when absent
pub fn decimal_field(payload: &Value, key: &str) -> Decimal {
    payload.get(key).map_or(Decimal::ZERO, decimal)
}

/// Array field of an object, empty when absent or not an array
pub fn array_field<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}
