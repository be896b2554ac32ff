//! Model definition - per-table configuration value
//!
//! A definition carries everything the generic model engine needs about one
//! table: its name, primary key, document schema, relationship declarations
//! and hooks. It is built once and then shared behind an `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OrmResult;
use crate::hooks::{ModelHooks, NoHooks};
use crate::registry::{ModelMap, ModelRegistry};
use crate::relationships::{RelationshipDefinition, Relationships};

pub const DEFAULT_PRIMARY_KEY: &str = "id";

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

/// Serializable model declaration, e.g. loaded from a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Value>,
}

pub struct ModelDefinition {
    name: String,
    table_name: Option<String>,
    primary_key: String,
    json_schema: Option<Value>,
    relationships: BTreeMap<String, Value>,
    hooks: Arc<dyn ModelHooks>,
    registry: OnceCell<Weak<ModelMap>>,
    validated_relationships: OnceCell<Relationships>,
}

impl ModelDefinition {
    pub fn builder(name: &str) -> ModelDefinitionBuilder {
        ModelDefinitionBuilder::new(name)
    }

    pub fn from_declaration(declaration: ModelDeclaration) -> Self {
        Self {
            name: declaration.name,
            table_name: declaration.table_name,
            primary_key: declaration.primary_key,
            json_schema: declaration.json_schema,
            relationships: declaration.relationships,
            hooks: Arc::new(NoHooks),
            registry: OnceCell::new(),
            validated_relationships: OnceCell::new(),
        }
    }

    /// Parse a JSON model declaration
    pub fn from_json_str(source: &str) -> OrmResult<Self> {
        let declaration: ModelDeclaration = serde_json::from_str(source)?;
        Ok(Self::from_declaration(declaration))
    }

    /// Attach hooks; only meaningful before the definition is shared
    pub fn with_hooks<H: ModelHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// The serializable part of this definition
    pub fn declaration(&self) -> ModelDeclaration {
        ModelDeclaration {
            name: self.name.clone(),
            table_name: self.table_name.clone(),
            primary_key: self.primary_key.clone(),
            json_schema: self.json_schema.clone(),
            relationships: self.relationships.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn json_schema(&self) -> Option<&Value> {
        self.json_schema.as_ref()
    }

    /// Raw relationship declarations, keyed by relationship name
    pub fn relationships(&self) -> &BTreeMap<String, Value> {
        &self.relationships
    }

    pub fn hooks(&self) -> &Arc<dyn ModelHooks> {
        &self.hooks
    }

    /// Register this definition into `registry`
    pub fn register(self: &Arc<Self>, registry: &ModelRegistry) -> OrmResult<()> {
        registry.register(Arc::clone(self))
    }

    /// The registry this definition was registered into, while it is alive
    pub fn registry(&self) -> Option<ModelRegistry> {
        self.registry
            .get()
            .and_then(Weak::upgrade)
            .map(ModelRegistry::from_shared)
    }

    pub fn is_registered(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Bind to a registry; false if already bound
    pub(crate) fn bind_registry(&self, models: &Arc<ModelMap>) -> bool {
        self.registry.set(Arc::downgrade(models)).is_ok()
    }

    pub(crate) fn validated_relationships(&self) -> Option<&Relationships> {
        self.validated_relationships.get()
    }

    pub(crate) fn cache_relationships(&self, relationships: Relationships) -> &Relationships {
        self.validated_relationships.get_or_init(|| relationships)
    }
}

impl fmt::Debug for ModelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDefinition")
            .field("name", &self.name)
            .field("table_name", &self.table_name)
            .field("primary_key", &self.primary_key)
            .field("json_schema", &self.json_schema)
            .field("relationships", &self.relationships)
            .field("registered", &self.is_registered())
            .finish()
    }
}

/// Builder for [`ModelDefinition`]
pub struct ModelDefinitionBuilder {
    name: String,
    table_name: Option<String>,
    primary_key: String,
    json_schema: Option<Value>,
    relationships: BTreeMap<String, Value>,
    hooks: Arc<dyn ModelHooks>,
}

impl ModelDefinitionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table_name: None,
            primary_key: default_primary_key(),
            json_schema: None,
            relationships: BTreeMap::new(),
            hooks: Arc::new(NoHooks),
        }
    }

    pub fn table_name(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    pub fn primary_key(mut self, primary_key: &str) -> Self {
        self.primary_key = primary_key.to_string();
        self
    }

    pub fn json_schema(mut self, schema: Value) -> Self {
        self.json_schema = Some(schema);
        self
    }

    pub fn relationship(mut self, name: &str, definition: RelationshipDefinition) -> Self {
        self.relationships.insert(name.to_string(), definition.to_declaration());
        self
    }

    /// Declare a relationship from an unchecked declaration value
    pub fn raw_relationship(mut self, name: &str, declaration: Value) -> Self {
        self.relationships.insert(name.to_string(), declaration);
        self
    }

    pub fn hooks<H: ModelHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Share one hook set between several definitions
    pub fn shared_hooks(mut self, hooks: Arc<dyn ModelHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ModelDefinition {
        ModelDefinition {
            name: self.name,
            table_name: self.table_name,
            primary_key: self.primary_key,
            json_schema: self.json_schema,
            relationships: self.relationships,
            hooks: self.hooks,
            registry: OnceCell::new(),
            validated_relationships: OnceCell::new(),
        }
    }

    /// Build straight into the shared form registries and models use
    pub fn build_shared(self) -> Arc<ModelDefinition> {
        Arc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let definition = ModelDefinition::builder("User").table_name("users").build();
        assert_eq!(definition.name(), "User");
        assert_eq!(definition.table_name(), Some("users"));
        assert_eq!(definition.primary_key(), "id");
        assert!(definition.json_schema().is_none());
        assert!(definition.relationships().is_empty());
        assert!(!definition.is_registered());
    }

    #[test]
    fn test_typed_relationship_is_stored_as_declaration() {
        let definition = ModelDefinition::builder("User")
            .table_name("users")
            .relationship("accounts", RelationshipDefinition::has_many("Account"))
            .build();
        assert_eq!(
            definition.relationships()["accounts"],
            json!({"model": "Account", "relation": "HAS_MANY", "joinType": "inner"})
        );
    }

    #[test]
    fn test_from_json_str() {
        let definition = ModelDefinition::from_json_str(
            r#"{
                "name": "User",
                "tableName": "users",
                "jsonSchema": {"required": ["name"]},
                "relationships": {"accounts": {"model": "Account", "relation": "HAS_MANY"}}
            }"#,
        )
        .unwrap();

        assert_eq!(definition.table_name(), Some("users"));
        assert_eq!(definition.primary_key(), "id");
        assert_eq!(definition.json_schema(), Some(&json!({"required": ["name"]})));
        assert_eq!(definition.relationships().len(), 1);
        assert_eq!(definition.declaration().name, "User");
    }

    #[test]
    fn test_from_json_str_rejects_malformed_input() {
        let err = ModelDefinition::from_json_str(r#"{"tableName": "users"}"#).unwrap_err();
        assert!(matches!(err, crate::error::OrmError::Serialization(_)));
    }

    #[test]
    fn test_registry_binding_is_weak() {
        let definition = ModelDefinition::builder("User").table_name("users").build_shared();
        {
            let registry = ModelRegistry::new();
            definition.register(&registry).unwrap();
            assert!(definition.registry().is_some());
        }
        // registry storage is gone, the binding stays
        assert!(definition.registry().is_none());
        assert!(definition.is_registered());
    }
}
