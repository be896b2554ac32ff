//! The `type` keyword

use std::fmt;
use serde_json::{json, Map, Value};

use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

/// The JSON data model types a schema can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(JsonType::String),
            "number" => Some(JsonType::Number),
            "integer" => Some(JsonType::Integer),
            "boolean" => Some(JsonType::Boolean),
            "object" => Some(JsonType::Object),
            "array" => Some(JsonType::Array),
            "null" => Some(JsonType::Null),
            _ => None,
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number => value.is_number(),
            JsonType::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
                }
                _ => false,
            },
            JsonType::Boolean => value.is_boolean(),
            JsonType::Object => value.is_object(),
            JsonType::Array => value.is_array(),
            JsonType::Null => value.is_null(),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Null => "null",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct TypeKeyword {
    types: Vec<JsonType>,
}

impl Keyword for TypeKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        if self.types.iter().any(|t| t.matches(value)) {
            return;
        }
        let expected = self
            .types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        scope.report(
            "type",
            json!({ "type": expected }),
            format!("should be {}", expected),
        );
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let names: Vec<&str> = match map.get("type") {
        None => return Ok(Vec::new()),
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| SchemaError::InvalidKeyword {
                    path: path.to_string(),
                    keyword: "type",
                    reason: "expected a type name".to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                path: path.to_string(),
                keyword: "type",
                reason: "expected a string or an array of strings".to_string(),
            })
        }
    };

    let types = names
        .into_iter()
        .map(|name| {
            JsonType::parse(name).ok_or_else(|| SchemaError::UnknownType {
                path: path.to_string(),
                name: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let keyword: Box<dyn Keyword> = Box::new(TypeKeyword { types });
    Ok(vec![keyword])
}
