//! The `enum` and `const` keywords

use serde_json::{json, Map, Value};

use super::json_equal;
use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

#[derive(Debug)]
pub struct EnumKeyword {
    allowed: Vec<Value>,
}

impl Keyword for EnumKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        if !self.allowed.iter().any(|allowed| json_equal(allowed, value)) {
            scope.report(
                "enum",
                json!({ "allowedValues": self.allowed }),
                "should be equal to one of the allowed values",
            );
        }
    }
}

#[derive(Debug)]
pub struct ConstKeyword {
    expected: Value,
}

impl Keyword for ConstKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        if !json_equal(&self.expected, value) {
            scope.report(
                "const",
                json!({ "allowedValue": self.expected }),
                "should be equal to constant",
            );
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let mut keywords: Vec<Box<dyn Keyword>> = Vec::new();

    match map.get("enum") {
        None => {}
        Some(Value::Array(allowed)) => keywords.push(Box::new(EnumKeyword {
            allowed: allowed.clone(),
        })),
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                path: path.to_string(),
                keyword: "enum",
                reason: "expected an array".to_string(),
            })
        }
    }

    if let Some(expected) = map.get("const") {
        keywords.push(Box::new(ConstKeyword {
            expected: expected.clone(),
        }));
    }

    Ok(keywords)
}
