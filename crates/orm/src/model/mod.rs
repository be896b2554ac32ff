//! Model System - the generic engine every table shares
//!
//! - `definition`: per-table configuration (table, key, schema, relationships, hooks)
//! - `core`: the [`Model`] handle binding a definition to an executor
//! - `instance`: documents constructed through a model, ready to save
//! - `crud_operations`: validated inserts and updates
//! - `query_methods`: table-scoped and relationship-joined queries
//! - `lifecycle`: hook and validation sequencing for writes

pub mod core;
pub mod crud_operations;
pub mod definition;
pub mod instance;
pub mod lifecycle;
pub mod query_methods;

pub use self::core::Model;
pub use definition::{ModelDeclaration, ModelDefinition, ModelDefinitionBuilder, DEFAULT_PRIMARY_KEY};
pub use instance::ModelInstance;
pub use lifecycle::HookPipeline;
pub use query_methods::ModelQuery;
