//! Document validation against a model's JSON schema

use serde_json::{Map, Value};

use strata_schema::{compile, ValidationResult};

use crate::error::{DocumentError, OrmResult};

/// An open-ended record owned by one write call
pub type Document = Map<String, Value>;

/// Validate `document` against `schema`
///
/// No schema means any document is accepted. The schema is always applied
/// as an object schema, even when it omits `type`.
pub fn validate(document: &Value, schema: Option<&Value>) -> OrmResult<ValidationResult> {
    let Some(schema) = schema else {
        return Ok(ValidationResult::valid());
    };
    let compiled = compile(&object_schema(schema))?;
    Ok(compiled.validate(document))
}

/// Validate a document, turning violations into a [`DocumentError`]
pub fn ensure_valid(document: &Document, schema: Option<&Value>) -> OrmResult<()> {
    if schema.is_none() {
        return Ok(());
    }
    let result = validate(&Value::Object(document.clone()), schema)?;
    if result.valid {
        Ok(())
    } else {
        Err(DocumentError::new(result.errors).into())
    }
}

/// Drop the top-level `required` list; update payloads are partial
pub fn strip_required(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove("required");
            Value::Object(map)
        }
        other => other.clone(),
    }
}

fn object_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut map = map.clone();
            map.insert("type".to_string(), Value::String("object".to_string()));
            Value::Object(map)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrmError;
    use serde_json::json;

    fn user_schema() -> Value {
        json!({
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 6},
                "email": {"type": "string", "format": "email"}
            }
        })
    }

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_no_schema_accepts_anything() {
        let result = validate(&json!({"name": false}), None).unwrap();
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_schema_is_forced_to_object() {
        let schema = json!({"properties": {"name": {"type": "string"}}});
        let result = validate(&json!("not an object"), Some(&schema)).unwrap();
        assert!(!result.valid);
        assert_eq!(result.errors[0].keyword, "type");
        assert_eq!(result.errors[0].message, "should be object");
    }

    #[test]
    fn test_field_violation() {
        let result = validate(&json!({"name": 22}), Some(&json!({"properties": {"name": {"type": "string"}}}))).unwrap();
        assert_eq!(
            serde_json::to_value(&result.errors[0]).unwrap(),
            json!({
                "keyword": "type",
                "dataPath": ".name",
                "schemaPath": "#/properties/name/type",
                "params": {"type": "string"},
                "message": "should be string"
            })
        );
    }

    #[test]
    fn test_ensure_valid_messages() {
        let schema = user_schema();

        let err = ensure_valid(&doc(json!({"email": "mail@email.co"})), Some(&schema)).unwrap_err();
        assert_eq!(err.to_string(), "document should have required property `name`");

        let err = ensure_valid(&doc(json!({"name": "boots", "email": "mail@email.co"})), Some(&schema)).unwrap_err();
        assert_eq!(err.to_string(), "document `name` should NOT be shorter than 6 characters");

        let err = ensure_valid(&doc(json!({"name": "boots and cats", "email": "mail"})), Some(&schema)).unwrap_err();
        assert_eq!(err.to_string(), "document `email` should match format \"email\"");

        assert!(ensure_valid(&doc(json!({"name": "boots and cats", "email": "mail@email.co"})), Some(&schema)).is_ok());
    }

    #[test]
    fn test_ensure_valid_reports_every_violation() {
        let err = ensure_valid(&doc(json!({"name": 1, "email": 2})), Some(&user_schema())).unwrap_err();
        match err {
            OrmError::Document(err) => assert_eq!(err.errors().len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strip_required() {
        let stripped = strip_required(&user_schema());
        assert!(stripped.get("required").is_none());
        assert!(stripped.get("properties").is_some());
        assert!(ensure_valid(&doc(json!({"email": "mail@email.co"})), Some(&stripped)).is_ok());
    }

    #[test]
    fn test_invalid_schema_is_a_schema_error() {
        let err = validate(&json!({}), Some(&json!({"properties": {"name": {"type": "text"}}}))).unwrap_err();
        assert!(matches!(err, OrmError::Schema(_)));
    }
}
