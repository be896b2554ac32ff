//! Size keywords for strings, arrays and objects

use serde_json::{json, Map, Value};

use super::read_limit;
use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Characters,
    Items,
    Properties,
}

impl Target {
    /// Size of `value` when it is of this target's type
    fn measure(self, value: &Value) -> Option<u64> {
        match (self, value) {
            // Unicode-aware length
            (Target::Characters, Value::String(s)) => Some(s.chars().count() as u64),
            (Target::Items, Value::Array(items)) => Some(items.len() as u64),
            (Target::Properties, Value::Object(map)) => Some(map.len() as u64),
            _ => None,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Target::Characters => "characters",
            Target::Items => "items",
            Target::Properties => "properties",
        }
    }
}

/// `maxLength`, `minLength`, `maxItems`, `minItems`, `maxProperties`, `minProperties`
#[derive(Debug)]
pub struct LengthKeyword {
    keyword: &'static str,
    target: Target,
    upper: bool,
    limit: u64,
}

impl LengthKeyword {
    fn message(&self) -> String {
        match (self.target, self.upper) {
            (Target::Characters, true) => format!("should NOT be longer than {} characters", self.limit),
            (Target::Characters, false) => format!("should NOT be shorter than {} characters", self.limit),
            (target, true) => format!("should NOT have more than {} {}", self.limit, target.noun()),
            (target, false) => format!("should NOT have fewer than {} {}", self.limit, target.noun()),
        }
    }
}

impl Keyword for LengthKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(size) = self.target.measure(value) else {
            return;
        };
        let violated = if self.upper {
            size > self.limit
        } else {
            size < self.limit
        };
        if violated {
            scope.report(self.keyword, json!({ "limit": self.limit }), self.message());
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let specs = [
        ("maxLength", Target::Characters, true),
        ("minLength", Target::Characters, false),
        ("maxItems", Target::Items, true),
        ("minItems", Target::Items, false),
        ("maxProperties", Target::Properties, true),
        ("minProperties", Target::Properties, false),
    ];

    let mut keywords: Vec<Box<dyn Keyword>> = Vec::new();
    for (keyword, target, upper) in specs {
        if let Some(limit) = read_limit(map, keyword, path)? {
            keywords.push(Box::new(LengthKeyword {
                keyword,
                target,
                upper,
                limit,
            }));
        }
    }
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use crate::compile;
    use serde_json::json;

    #[test]
    fn test_string_length_messages() {
        let schema = compile(&json!({
            "properties": {"name": {"type": "string", "minLength": 6, "maxLength": 12}}
        }))
        .unwrap();

        let result = schema.validate(&json!({"name": "some string that is too long"}));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].data_path, ".name");
        assert_eq!(result.errors[0].message, "should NOT be longer than 12 characters");

        let result = schema.validate(&json!({"name": "boots"}));
        assert_eq!(result.errors[0].message, "should NOT be shorter than 6 characters");
        assert_eq!(result.errors[0].params, json!({"limit": 6}));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let schema = compile(&json!({"maxLength": 3})).unwrap();
        assert!(schema.is_valid(&json!("äöü")));
    }

    #[test]
    fn test_items_and_properties() {
        let schema = compile(&json!({"minItems": 2})).unwrap();
        assert_eq!(
            schema.validate(&json!([1])).errors[0].message,
            "should NOT have fewer than 2 items"
        );

        let schema = compile(&json!({"maxProperties": 1})).unwrap();
        assert_eq!(
            schema.validate(&json!({"a": 1, "b": 2})).errors[0].message,
            "should NOT have more than 1 properties"
        );
    }
}
