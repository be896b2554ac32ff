//! Model and relationship declaration checks

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use strata_schema::compile;

use super::types::{Relation, RelationshipDefinition, RELATIONSHIP_SCHEMA};
use crate::error::{backtick_quotes, OrmError, OrmResult};
use crate::model::ModelDefinition;

/// Validated relationships of one model, keyed by relationship name
pub type Relationships = BTreeMap<String, RelationshipDefinition>;

/// Outcome of checking a model definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl DefinitionReport {
    /// The first error as a model error
    pub fn into_result(self) -> OrmResult<()> {
        match self.errors.into_iter().next() {
            Some(message) => Err(OrmError::Model(message)),
            None => Ok(()),
        }
    }
}

/// Check a definition's own declaration; every failed check adds one error
pub fn is_valid_definition(definition: &ModelDefinition) -> DefinitionReport {
    let name = definition.name();
    let mut errors = Vec::new();
    let mut fail = |message: &str| errors.push(format!("Model failure, {}: {}", message, name));

    if definition.table_name().map_or(true, str::is_empty) {
        fail("`tableName` is required");
    }
    if !name.chars().next().map_or(false, char::is_uppercase) {
        fail("name must start with an uppercase letter");
    }
    if !name.chars().all(char::is_alphabetic) {
        fail("name must contain letters only");
    }

    DefinitionReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Validate every relationship declared on `definition`
///
/// Entries are checked in name order and the first failure is returned.
/// Success is cached on the definition.
pub fn validate_relationships(definition: &ModelDefinition) -> OrmResult<&Relationships> {
    if let Some(validated) = definition.validated_relationships() {
        return Ok(validated);
    }

    let fail = |message: String| {
        OrmError::Relationship(format!("Relationship error in {}: {}", definition.name(), message))
    };

    if definition.relationships().is_empty() {
        return Err(fail("no relationships defined".to_string()));
    }

    let schema = compile(&RELATIONSHIP_SCHEMA)?;
    let registry = definition.registry();
    let mut relationships = Relationships::new();

    for (name, declaration) in definition.relationships() {
        if let Some(violation) = schema.validate(declaration).first_error() {
            return Err(fail(format!(
                "Invalid schema for `{}`, {}",
                name,
                backtick_quotes(&violation.message)
            )));
        }

        let relation = declaration.get("relation");
        if relation.and_then(Value::as_str).and_then(Relation::parse).is_none() {
            let shown = match relation {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "null".to_string(),
            };
            return Err(fail(format!("Invalid relation for `{}`, `{}`", name, shown)));
        }

        let typed: RelationshipDefinition = serde_json::from_value(declaration.clone())?;
        if !registry.as_ref().map_or(false, |r| r.contains(&typed.model)) {
            return Err(fail(format!(
                "Model `{}` not in registry, for field `{}`",
                typed.model, name
            )));
        }
        relationships.insert(name.clone(), typed);
    }

    debug!(model = definition.name(), count = relationships.len(), "relationships validated");
    Ok(definition.cache_relationships(relationships))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ModelRegistry;
    use serde_json::json;
    use std::sync::Arc;

    fn registered(registry: &ModelRegistry, definition: ModelDefinition) -> Arc<ModelDefinition> {
        let definition = Arc::new(definition);
        definition.register(registry).unwrap();
        definition
    }

    #[test]
    fn test_missing_table_name() {
        let report = is_valid_definition(&ModelDefinition::builder("InvalidModel").build());
        assert!(!report.valid);
        assert_eq!(report.errors[0], "Model failure, `tableName` is required: InvalidModel");
    }

    #[test]
    fn test_errors_accumulate() {
        let report = is_valid_definition(&ModelDefinition::builder("bad_name").build());
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[1], "Model failure, name must start with an uppercase letter: bad_name");
        assert_eq!(report.errors[2], "Model failure, name must contain letters only: bad_name");

        let err = report.into_result().unwrap_err();
        assert!(err.is_model_error());
        assert!(err.to_string().contains("`tableName` is required"));
    }

    #[test]
    fn test_valid_with_only_table_name() {
        let report = is_valid_definition(&ModelDefinition::builder("TestModel").table_name("test_table").build());
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_no_relationships_defined() {
        let definition = ModelDefinition::builder("TestModel").table_name("test_table").build();
        let err = validate_relationships(&definition).unwrap_err();
        assert!(err.is_relationship_error());
        assert_eq!(err.to_string(), "Relationship error in TestModel: no relationships defined");
    }

    #[test]
    fn test_missing_model_field() {
        let registry = ModelRegistry::new();
        let definition = registered(
            &registry,
            ModelDefinition::builder("MissingModel")
                .table_name("test_table")
                .raw_relationship("users", json!({}))
                .build(),
        );
        let err = validate_relationships(&definition).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Relationship error in MissingModel: Invalid schema for `users`, should have required property `model`"
        );
    }

    #[test]
    fn test_relation_outside_enum() {
        let registry = ModelRegistry::new();
        registered(&registry, ModelDefinition::builder("ValidModel").table_name("test_table").build());
        let definition = registered(
            &registry,
            ModelDefinition::builder("InvalidRelation")
                .table_name("test_table2")
                .raw_relationship("valid", json!({"model": "ValidModel", "relation": "cats"}))
                .build(),
        );
        let err = validate_relationships(&definition).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Relationship error in InvalidRelation: Invalid schema for `valid`, should be equal to one of the allowed values"
        );
    }

    #[test]
    fn test_relation_missing() {
        let registry = ModelRegistry::new();
        registered(&registry, ModelDefinition::builder("ValidModel").table_name("test_table").build());
        let definition = registered(
            &registry,
            ModelDefinition::builder("NoRelation")
                .table_name("test_table2")
                .raw_relationship("valid", json!({"model": "ValidModel"}))
                .build(),
        );
        let err = validate_relationships(&definition).unwrap_err();
        assert_eq!(err.to_string(), "Relationship error in NoRelation: Invalid relation for `valid`, `null`");
    }

    #[test]
    fn test_target_not_in_registry() {
        let registry = ModelRegistry::new();
        let definition = registered(
            &registry,
            ModelDefinition::builder("FailingModelRelationship")
                .table_name("test_table")
                .relationship("users", RelationshipDefinition::belongs_to("Nope"))
                .build(),
        );
        let err = validate_relationships(&definition).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Relationship error in FailingModelRelationship: Model `Nope` not in registry, for field `users`"
        );
    }

    #[test]
    fn test_unregistered_definition_fails_membership() {
        let definition = ModelDefinition::builder("Loose")
            .table_name("loose")
            .relationship("users", RelationshipDefinition::has_many("User"))
            .build();
        let err = validate_relationships(&definition).unwrap_err();
        assert!(err.to_string().contains("Model `User` not in registry"));
    }

    #[test]
    fn test_valid_relationship_is_cached() {
        let registry = ModelRegistry::new();
        registered(&registry, ModelDefinition::builder("ValidModel").table_name("test_table").build());
        let definition = registered(
            &registry,
            ModelDefinition::builder("ValidRelation")
                .table_name("test_table2")
                .relationship("valid", RelationshipDefinition::has_many("ValidModel"))
                .build(),
        );

        let relationships = validate_relationships(&definition).unwrap();
        assert_eq!(relationships["valid"].relation, Relation::HasMany);
        assert!(definition.validated_relationships().is_some());

        let again = validate_relationships(&definition).unwrap();
        assert!(std::ptr::eq(relationships, again));
    }

    #[test]
    fn test_first_failure_in_name_order() {
        let registry = ModelRegistry::new();
        let definition = registered(
            &registry,
            ModelDefinition::builder("Ordered")
                .table_name("ordered")
                .raw_relationship("b", json!({}))
                .raw_relationship("a", json!({"model": 3}))
                .build(),
        );
        let err = validate_relationships(&definition).unwrap_err();
        assert_eq!(err.to_string(), "Relationship error in Ordered: Invalid schema for `a`, should be string");
    }
}
