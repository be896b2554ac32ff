//! The `required` keyword

use serde_json::{json, Map, Value};

use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

/// Reports each missing property against the object itself, not the member
#[derive(Debug)]
pub struct RequiredKeyword {
    properties: Vec<String>,
}

impl Keyword for RequiredKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(object) = value.as_object() else {
            return;
        };
        for property in &self.properties {
            if !object.contains_key(property) {
                scope.report(
                    "required",
                    json!({ "missingProperty": property }),
                    format!("should have required property '{}'", property),
                );
            }
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let Some(required) = map.get("required") else {
        return Ok(Vec::new());
    };
    let invalid = || SchemaError::InvalidKeyword {
        path: path.to_string(),
        keyword: "required",
        reason: "expected an array of property names".to_string(),
    };
    let properties = required
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|p| p.as_str().map(str::to_string).ok_or_else(invalid))
        .collect::<Result<Vec<_>, _>>()?;

    if properties.is_empty() {
        return Ok(Vec::new());
    }
    let keyword: Box<dyn Keyword> = Box::new(RequiredKeyword { properties });
    Ok(vec![keyword])
}
