//! Relationships Module - declarations, validation and join composition

pub mod composer;
pub mod types;
pub mod validator;

pub use composer::{compose_joins, RelationNames};
pub use types::{Relation, RelationshipDefinition, RELATIONSHIP_SCHEMA};
pub use validator::{is_valid_definition, validate_relationships, DefinitionReport, Relationships};
