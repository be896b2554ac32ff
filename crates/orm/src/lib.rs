//! # strata-orm: lightweight model layer
//!
//! Models are plain configuration values ([`ModelDefinition`]) registered in
//! an explicit [`ModelRegistry`]. Relationships between them are validated
//! once and then turned into join clauses on a [`QueryBuilder`]. Every write
//! runs through schema validation and the model's [`ModelHooks`] before it
//! reaches a [`QueryExecutor`].
//!
//! ```ignore
//! let registry = ModelRegistry::new();
//! let account = ModelDefinition::builder("Account").table_name("accounts").build_shared();
//! account.register(&registry)?;
//!
//! let user = ModelDefinition::builder("User")
//!     .table_name("users")
//!     .relationship("accounts", RelationshipDefinition::has_many("Account"))
//!     .build_shared();
//! user.register(&registry)?;
//!
//! let users = Model::new(user, Arc::new(MemoryExecutor::new()));
//! let query = users.query_with("accounts")?;
//! // SELECT * FROM users INNER JOIN accounts ON accounts.user_id = users.id
//! ```

pub mod backends;
pub mod document;
pub mod error;
pub mod hooks;
pub mod model;
pub mod naming;
pub mod query;
pub mod registry;
pub mod relationships;

pub use backends::{MemoryExecutor, QueryExecutor};
pub use document::Document;
pub use error::{DocumentError, OrmError, OrmResult};
pub use hooks::{HookError, HookResult, ModelHooks, NoHooks};
pub use model::{HookPipeline, Model, ModelDeclaration, ModelDefinition, ModelInstance, ModelQuery};
pub use query::{JoinKind, QueryBuilder};
pub use registry::ModelRegistry;
pub use relationships::{
    compose_joins, is_valid_definition, validate_relationships, DefinitionReport, Relation,
    RelationNames, RelationshipDefinition,
};

pub use strata_schema::{ValidationResult, Violation};

/// Implementing [`ModelHooks`] needs this attribute
pub use async_trait::async_trait;
