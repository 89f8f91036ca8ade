//! Mock session tokens.
//!
//! A token is `mockHeader.<base64 JSON>.mockSignature`. The outer segments are
//! fixed placeholders and nothing is signed, so any client can read the payload
//! back. It only has the shape of a signed token.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HEADER: &str = "mockHeader";
pub const SIGNATURE: &str = "mockSignature";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub username: Value,
    pub is_admin: bool,
}

pub fn issue(claims: &Claims) -> serde_json::Result<String> {
    let payload = serde_json::to_vec(claims)?;
    Ok(format!("{HEADER}.{}.{SIGNATURE}", STANDARD.encode(payload)))
}

/// JavaScript truthiness of a JSON value, used for `field || default`.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `field || default`: the field if it is truthy, otherwise the default string.
pub fn or_default(field: Option<&Value>, default: &str) -> Value {
    field
        .filter(|v| truthy(v))
        .map(|v| js_numbers(v.clone()))
        .unwrap_or_else(|| Value::from(default))
}

// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rewrites integral floats as integers, so `1.0` serializes as `1` the way a
/// JavaScript number would.
fn js_numbers(v: Value) -> Value {
    match v {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(js_numbers).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, js_numbers(v))).collect()),
        other => other,
    }
}
