//! Ad hoc typing of control-table values
//!
//! Cells come back from the sheet as strings. Booleans and integers are
//! recovered at read time; everything else stays a string.

use serde_json::Value;

/// Convert a stored cell into the JSON value exposed by the API
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if looks_like_integer(trimmed) {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::from(n);
        }
    }

    Value::String(raw.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
