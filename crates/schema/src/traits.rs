//! Core keyword trait and the scope violations are reported through

use std::fmt::Debug;
use serde_json::Value;

use crate::compiler::SchemaNode;
use crate::error::Violation;

/// A compiled schema keyword that checks one constraint on a value
pub trait Keyword: Send + Sync + Debug {
    /// Check `value`, reporting every violation through `scope`
    fn check(&self, value: &Value, scope: &mut Scope<'_>);
}

/// Position of the current check inside the document and the schema
pub struct Scope<'a> {
    data_path: &'a str,
    schema_path: &'a str,
    violations: &'a mut Vec<Violation>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        data_path: &'a str,
        schema_path: &'a str,
        violations: &'a mut Vec<Violation>,
    ) -> Self {
        Self {
            data_path,
            schema_path,
            violations,
        }
    }

    /// Path of the value being checked
    pub fn data_path(&self) -> &str {
        self.data_path
    }

    /// Record a violation of `keyword` at the current data path
    pub fn report(&mut self, keyword: &str, params: Value, message: impl Into<String>) {
        self.violations.push(Violation::new(
            keyword,
            self.data_path,
            format!("{}/{}", self.schema_path, keyword),
            params,
            message,
        ));
    }

    /// Validate a nested value against a subschema
    pub(crate) fn descend(&mut self, node: &SchemaNode, value: &Value, data_path: &str) {
        node.validate_into(value, data_path, self.violations);
    }
}

/// Data path of an object member, `.key` for identifiers and `['key']` otherwise
pub(crate) fn property_path(parent: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{}.{}", parent, key)
    } else {
        format!("{}['{}']", parent, key.replace('\'', "\\'"))
    }
}

/// Data path of an array element
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// Escape a property name for use inside a schema pointer
pub(crate) fn pointer_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
