//! # strata-schema
//!
//! Structural validation of JSON documents against JSON schemas, used by the
//! strata ORM for document writes and relationship declarations.
//!
//! A schema is compiled once into a keyword tree and can then validate any
//! number of documents. Validation never stops at the first failure: every
//! violation is reported in evaluation order, each with a document path, a
//! schema path, the violated keyword and a message.

pub mod compiler;
pub mod error;
pub mod keywords;
pub mod traits;

pub use compiler::{compile, validate, CompiledSchema};
pub use error::{SchemaError, ValidationResult, Violation};
pub use keywords::types::JsonType;
pub use traits::{Keyword, Scope};
