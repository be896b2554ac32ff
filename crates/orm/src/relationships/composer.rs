//! Join Query Composer - turns relationship names into join clauses
//!
//! Key names come from the relationship's overrides when present and from
//! naming conventions otherwise:
//!
//! - `HAS_ONE`/`HAS_MANY`: `remote.{remote | snake(Local)_id} = local.{local | local pk}`
//! - `BELONGS_TO`: `local.{local | snake(Remote)_id} = remote.{remote | remote pk}`
//! - `HAS_AND_BELONGS_TO_MANY`: through `{joinTable | sorted tables joined by _}`,
//!   `junction.{joinLocal | snake(Local)_id} = local.{local | local pk}` then
//!   `remote.{remote | remote pk} = junction.{joinRemote | snake(Remote)_id}`

use tracing::{debug, trace};

use super::types::{Relation, RelationshipDefinition};
use super::validator::validate_relationships;
use crate::error::{OrmError, OrmResult};
use crate::model::ModelDefinition;
use crate::naming::{foreign_key, junction_table};
use crate::query::QueryBuilder;

/// One relationship name or an ordered chain of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationNames(Vec<String>);

impl RelationNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RelationNames {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for RelationNames {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for RelationNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for RelationNames {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for RelationNames {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RelationNames {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Add one join per relation name to `base`, left to right
///
/// Relationship validation runs first (and is cached after it succeeds).
/// Each join is added on top of the previous ones, so a chain walks several
/// relationships of `local` in one call.
pub fn compose_joins(
    base: QueryBuilder,
    relations: impl Into<RelationNames>,
    local: &ModelDefinition,
) -> OrmResult<QueryBuilder> {
    let relations = relations.into();
    let relationships = validate_relationships(local)?;
    let local_table = table_of(local)?;

    let query = relations.iter().try_fold(base, |query, name| -> OrmResult<QueryBuilder> {
        let relationship = relationships.get(name).ok_or_else(|| {
            OrmError::Relationship(format!("No relation defined from {} in model {}", name, local.name()))
        })?;
        let remote = local
            .registry()
            .and_then(|registry| registry.lookup(&relationship.model))
            .ok_or_else(|| {
                OrmError::Relationship(format!(
                    "Relationship error in {}: Model `{}` not in registry, for field `{}`",
                    local.name(),
                    relationship.model,
                    name
                ))
            })?;

        let sides = JoinSides {
            local,
            local_table,
            remote: &remote,
            remote_table: table_of(&remote)?,
        };
        Ok(sides.join(query, relationship))
    })?;

    debug!(model = local.name(), relations = relations.len(), "composed joins");
    Ok(query)
}

fn table_of(definition: &ModelDefinition) -> OrmResult<&str> {
    definition.table_name().filter(|t| !t.is_empty()).ok_or_else(|| {
        OrmError::Model(format!("Model failure, `tableName` is required: {}", definition.name()))
    })
}

struct JoinSides<'a> {
    local: &'a ModelDefinition,
    local_table: &'a str,
    remote: &'a ModelDefinition,
    remote_table: &'a str,
}

impl JoinSides<'_> {
    fn join(&self, query: QueryBuilder, relationship: &RelationshipDefinition) -> QueryBuilder {
        let kind = relationship.join_type;
        let local_key = relationship.local.as_deref();
        let remote_key = relationship.remote.as_deref();

        match relationship.relation {
            Relation::HasOne | Relation::HasMany => {
                let left = qualify(self.remote_table, remote_key, || foreign_key(self.local.name()));
                let right = qualify(self.local_table, local_key, || self.local.primary_key().to_string());
                self.trace(self.remote_table, &left, &right);
                query.join(kind, self.remote_table, &left, &right)
            }
            Relation::BelongsTo => {
                let left = qualify(self.local_table, local_key, || foreign_key(self.remote.name()));
                let right = qualify(self.remote_table, remote_key, || self.remote.primary_key().to_string());
                self.trace(self.remote_table, &left, &right);
                query.join(kind, self.remote_table, &left, &right)
            }
            Relation::HasAndBelongsToMany => {
                let junction = relationship
                    .join_table
                    .clone()
                    .unwrap_or_else(|| junction_table(self.local_table, self.remote_table));

                let left = qualify(&junction, relationship.join_local.as_deref(), || foreign_key(self.local.name()));
                let right = qualify(self.local_table, local_key, || self.local.primary_key().to_string());
                self.trace(&junction, &left, &right);
                let query = query.join(kind, &junction, &left, &right);

                let left = qualify(self.remote_table, remote_key, || self.remote.primary_key().to_string());
                let right = qualify(&junction, relationship.join_remote.as_deref(), || foreign_key(self.remote.name()));
                self.trace(self.remote_table, &left, &right);
                query.join(kind, self.remote_table, &left, &right)
            }
        }
    }

    fn trace(&self, table: &str, left: &str, right: &str) {
        trace!(model = self.local.name(), table, left, right, "join");
    }
}

fn qualify(table: &str, key: Option<&str>, default: impl FnOnce() -> String) -> String {
    match key {
        Some(key) => format!("{}.{}", table, key),
        None => format!("{}.{}", table, default()),
    }
}
