//! Relationship declarations and the closed set of relation kinds

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::query::JoinKind;

/// Cardinality/direction between two models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    /// One remote row points back at the local row
    HasOne,
    /// Many remote rows point back at the local row
    HasMany,
    /// The local row points at one remote row
    BelongsTo,
    /// Rows on both sides are linked through a junction table
    HasAndBelongsToMany,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::HasOne,
        Relation::HasMany,
        Relation::BelongsTo,
        Relation::HasAndBelongsToMany,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::HasOne => "HAS_ONE",
            Relation::HasMany => "HAS_MANY",
            Relation::BelongsTo => "BELONGS_TO",
            Relation::HasAndBelongsToMany => "HAS_AND_BELONGS_TO_MANY",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|relation| relation.as_str() == name)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated relationship from one model to another
///
/// Every key name is optional; the join composer falls back to naming
/// conventions for whatever is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDefinition {
    /// Name of the target model
    pub model: String,
    pub relation: Relation,
    #[serde(default)]
    pub join_type: JoinKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_remote: Option<String>,
}

impl RelationshipDefinition {
    pub fn new(model: &str, relation: Relation) -> Self {
        Self {
            model: model.to_string(),
            relation,
            join_type: JoinKind::default(),
            local: None,
            remote: None,
            join_table: None,
            join_local: None,
            join_remote: None,
        }
    }

    pub fn has_one(model: &str) -> Self {
        Self::new(model, Relation::HasOne)
    }

    pub fn has_many(model: &str) -> Self {
        Self::new(model, Relation::HasMany)
    }

    pub fn belongs_to(model: &str) -> Self {
        Self::new(model, Relation::BelongsTo)
    }

    pub fn has_and_belongs_to_many(model: &str) -> Self {
        Self::new(model, Relation::HasAndBelongsToMany)
    }

    pub fn join_type(mut self, kind: JoinKind) -> Self {
        self.join_type = kind;
        self
    }

    /// Key on the local side of the join
    pub fn local(mut self, key: &str) -> Self {
        self.local = Some(key.to_string());
        self
    }

    /// Key on the remote side of the join
    pub fn remote(mut self, key: &str) -> Self {
        self.remote = Some(key.to_string());
        self
    }

    pub fn join_table(mut self, table: &str) -> Self {
        self.join_table = Some(table.to_string());
        self
    }

    /// Junction column pointing at the local model
    pub fn join_local(mut self, key: &str) -> Self {
        self.join_local = Some(key.to_string());
        self
    }

    /// Junction column pointing at the remote model
    pub fn join_remote(mut self, key: &str) -> Self {
        self.join_remote = Some(key.to_string());
        self
    }

    /// The declaration shape this definition is stored and validated as
    pub fn to_declaration(&self) -> Value {
        json!(self)
    }
}

/// Structural schema every relationship declaration must satisfy
pub static RELATIONSHIP_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let relations: Vec<&str> = Relation::ALL.iter().map(|r| r.as_str()).collect();
    let join_kinds: Vec<&str> = JoinKind::ALL.iter().map(|k| k.as_str()).collect();
    json!({
        "type": "object",
        "required": ["model"],
        "properties": {
            "model": {"type": "string"},
            "relation": {"type": "string", "enum": relations},
            "joinType": {"type": "string", "enum": join_kinds},
            "local": {"type": "string"},
            "remote": {"type": "string"},
            "joinTable": {"type": "string"},
            "joinLocal": {"type": "string"},
            "joinRemote": {"type": "string"}
        }
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_names() {
        for relation in Relation::ALL {
            assert_eq!(Relation::parse(relation.as_str()), Some(relation));
            assert_eq!(serde_json::to_value(relation).unwrap(), json!(relation.as_str()));
        }
        assert_eq!(Relation::parse("HAS_SOME"), None);
    }

    #[test]
    fn test_builder_declaration_shape() {
        let definition = RelationshipDefinition::has_many("Account")
            .join_type(JoinKind::LeftOuter)
            .remote("owner_id");

        assert_eq!(
            definition.to_declaration(),
            json!({
                "model": "Account",
                "relation": "HAS_MANY",
                "joinType": "leftOuter",
                "remote": "owner_id"
            })
        );
    }

    #[test]
    fn test_declaration_deserializes_with_defaults() {
        let definition: RelationshipDefinition =
            serde_json::from_value(json!({"model": "Group", "relation": "HAS_AND_BELONGS_TO_MANY", "joinTable": "memberships"}))
                .unwrap();

        assert_eq!(definition.join_type, JoinKind::Inner);
        assert_eq!(definition.join_table.as_deref(), Some("memberships"));
        assert_eq!(definition.local, None);
    }

    #[test]
    fn test_builder_round_trips_through_declaration() {
        let definition = RelationshipDefinition::has_and_belongs_to_many("Group")
            .join_table("memberships")
            .join_local("member_id")
            .join_remote("team_id");
        let parsed: RelationshipDefinition = serde_json::from_value(definition.to_declaration()).unwrap();
        assert_eq!(parsed, definition);
    }
}
