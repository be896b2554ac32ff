//! Error types for the ORM system
//!
//! Every failure raised by the core falls in one of three kinds: the model's own
//! declaration is wrong, a relationship declaration or join request is wrong, or
//! a document failed validation. Hook errors are carried through untouched.

use serde_json::Value;
use thiserror::Error;

use strata_schema::{SchemaError, Violation};

use crate::hooks::HookError;

/// Result type alias for ORM operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for ORM operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// The model declaration is invalid, or the registry was misused
    #[error("{0}")]
    Model(String),

    /// A relationship declaration is invalid or a join was requested for an unknown relation
    #[error("{0}")]
    Relationship(String),

    /// A document failed schema validation
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A lifecycle hook failed; the hook's own error is the source
    #[error("{0}")]
    Hook(#[source] HookError),

    /// A schema could not be compiled
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Record not found in a table
    #[error("Record not found in table '{0}'")]
    NotFound(String),

    /// The query cannot be executed as built
    #[error("Query error: {0}")]
    Query(String),

    /// The executor failed while running a query
    #[error("Executor error: {0}")]
    Executor(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrmError {
    pub fn is_model_error(&self) -> bool {
        matches!(self, OrmError::Model(_))
    }

    pub fn is_relationship_error(&self) -> bool {
        matches!(self, OrmError::Relationship(_))
    }

    pub fn is_document_error(&self) -> bool {
        matches!(self, OrmError::Document(_))
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        OrmError::Serialization(err.to_string())
    }
}

/// A document failed structural validation on save or update
///
/// The message presents the first violation as `document `path` message`,
/// with single quotes in the raw message turned into backticks. All
/// violations stay available through [`DocumentError::errors`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct DocumentError {
    message: String,
    errors: Vec<Violation>,
}

impl DocumentError {
    pub fn new(errors: Vec<Violation>) -> Self {
        let message = match errors.first() {
            Some(first) => present(first),
            None => "document is invalid".to_string(),
        };
        Self { message, errors }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every violation, in evaluation order
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Path of the first violation with the leading `.` stripped; empty for the whole document
    pub fn path(&self) -> &str {
        self.errors
            .first()
            .map(|v| strip_leading_dot(&v.data_path))
            .unwrap_or("")
    }

    /// Keyword parameters of the first violation
    pub fn params(&self) -> Option<&Value> {
        self.errors.first().map(|v| &v.params)
    }
}

fn strip_leading_dot(path: &str) -> &str {
    path.strip_prefix('.').unwrap_or(path)
}

/// Normalize quoting in a raw violation message
pub(crate) fn backtick_quotes(message: &str) -> String {
    message.replace('\'', "`")
}

fn present(violation: &Violation) -> String {
    let path = strip_leading_dot(&violation.data_path);
    let message = backtick_quotes(&violation.message);
    if path.is_empty() {
        format!("document {}", message)
    } else {
        format!("document `{}` {}", path, message)
    }
}
