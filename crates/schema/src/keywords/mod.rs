//! Built-in keyword implementations

pub mod array;
pub mod enumeration;
pub mod format;
pub mod length;
pub mod numeric;
pub mod object;
pub mod pattern;
pub mod required;
pub mod types;

use serde_json::{Map, Number, Value};

use crate::error::SchemaError;

/// JSON equality where `1` and `1.0` compare equal
pub(crate) fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).map(|y| json_equal(x, y)).unwrap_or(false))
        }
        _ => left == right,
    }
}

/// Read a non-negative integer keyword such as `maxLength`
pub(crate) fn read_limit(
    map: &Map<String, Value>,
    keyword: &'static str,
    path: &str,
) -> Result<Option<u64>, SchemaError> {
    match map.get(keyword) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| SchemaError::InvalidKeyword {
            path: path.to_string(),
            keyword,
            reason: "expected a non-negative integer".to_string(),
        }),
    }
}

/// Read a numeric keyword such as `minimum`
pub(crate) fn read_number(
    map: &Map<String, Value>,
    keyword: &'static str,
    path: &str,
) -> Result<Option<Number>, SchemaError> {
    match map.get(keyword) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(SchemaError::InvalidKeyword {
            path: path.to_string(),
            keyword,
            reason: "expected a number".to_string(),
        }),
    }
}

/// Read a string keyword such as `pattern`
pub(crate) fn read_string<'a>(
    map: &'a Map<String, Value>,
    keyword: &'static str,
    path: &str,
) -> Result<Option<&'a str>, SchemaError> {
    match map.get(keyword) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(SchemaError::InvalidKeyword {
            path: path.to_string(),
            keyword,
            reason: "expected a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_equal_numbers() {
        assert!(json_equal(&json!(1), &json!(1.0)));
        assert!(json_equal(&json!([1, {"a": 2}]), &json!([1.0, {"a": 2.0}])));
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!json_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_read_limit_rejects_negative() {
        let map = json!({"maxLength": -1});
        let err = read_limit(map.as_object().unwrap(), "maxLength", "#").unwrap_err();
        assert!(err.to_string().contains("maxLength"));
    }
}
