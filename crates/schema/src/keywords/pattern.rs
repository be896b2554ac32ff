//! The `pattern` keyword

use regex::Regex;
use serde_json::{json, Map, Value};

use super::read_string;
use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

#[derive(Debug)]
pub struct PatternKeyword {
    source: String,
    regex: Regex,
}

impl Keyword for PatternKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(text) = value.as_str() else {
            return;
        };
        // Unanchored: the pattern may match anywhere in the string
        if !self.regex.is_match(text) {
            scope.report(
                "pattern",
                json!({ "pattern": self.source }),
                format!("should match pattern \"{}\"", self.source),
            );
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let Some(source) = read_string(map, "pattern", path)? else {
        return Ok(Vec::new());
    };
    let regex = Regex::new(source).map_err(|source| SchemaError::InvalidPattern {
        path: path.to_string(),
        source,
    })?;
    let keyword: Box<dyn Keyword> = Box::new(PatternKeyword {
        source: source.to_string(),
        regex,
    });
    Ok(vec![keyword])
}

#[cfg(test)]
mod tests {
    use crate::compile;
    use serde_json::json;

    #[test]
    fn test_pattern() {
        let schema = compile(&json!({"pattern": "^[A-Z][a-zA-Z]*$"})).unwrap();
        assert!(schema.is_valid(&json!("User")));

        let result = schema.validate(&json!("user"));
        assert_eq!(result.errors[0].message, "should match pattern \"^[A-Z][a-zA-Z]*$\"");
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let schema = compile(&json!({"pattern": "ab"})).unwrap();
        assert!(schema.is_valid(&json!("xxabyy")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(compile(&json!({"pattern": "("})).is_err());
    }
}
