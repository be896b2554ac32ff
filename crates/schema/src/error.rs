//! Schema compilation errors and validation violations

use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error raised when a schema cannot be compiled
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema (or a nested subschema) is neither an object nor a boolean
    #[error("schema at `{0}` must be an object or a boolean")]
    NotASchema(String),

    /// A keyword carries a value of the wrong shape
    #[error("keyword `{keyword}` at `{path}` is invalid: {reason}")]
    InvalidKeyword {
        path: String,
        keyword: &'static str,
        reason: String,
    },

    /// `type` names something outside the JSON data model
    #[error("unknown type `{name}` at `{path}`")]
    UnknownType { path: String, name: String },

    /// `format` names a format with no registered checker
    #[error("unknown format `{name}` is used in schema at `{path}`")]
    UnknownFormat { path: String, name: String },

    /// `pattern` does not compile
    #[error("invalid pattern at `{path}`: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// A single constraint violation found while validating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Name of the violated keyword (`type`, `required`, `maxLength`, ...)
    pub keyword: String,
    /// Path into the document, `.name` style; empty for the document itself
    pub data_path: String,
    /// JSON pointer fragment into the schema, e.g. `#/properties/name/type`
    pub schema_path: String,
    /// Keyword-specific parameters
    pub params: Value,
    /// Human readable message
    pub message: String,
}

impl Violation {
    pub fn new(
        keyword: impl Into<String>,
        data_path: impl Into<String>,
        schema_path: impl Into<String>,
        params: Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            data_path: data_path.into(),
            schema_path: schema_path.into(),
            params,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.data_path, self.message)
        }
    }
}

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<Violation>,
}

impl ValidationResult {
    /// A passing result with no violations
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from the violations collected during a run
    pub fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// First violation, if any
    pub fn first_error(&self) -> Option<&Violation> {
        self.errors.first()
    }

    /// Convert into a `Result`, keeping the full violation list on failure
    pub fn into_result(self) -> Result<(), Vec<Violation>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
