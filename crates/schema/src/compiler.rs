//! Schema compilation into a reusable keyword tree

use serde_json::{json, Map, Value};

use crate::error::{SchemaError, ValidationResult, Violation};
use crate::keywords::{array, enumeration, format, length, numeric, object, pattern, required, types};
use crate::traits::{Keyword, Scope};

type CompileFn = fn(&Map<String, Value>, &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError>;

/// Keyword compilers in evaluation order
const COMPILERS: &[CompileFn] = &[
    types::compile,
    enumeration::compile,
    numeric::compile,
    length::compile,
    pattern::compile,
    format::compile,
    array::compile,
    required::compile,
    object::compile,
];

/// One compiled (sub)schema
#[derive(Debug)]
pub(crate) enum SchemaNode {
    Bool {
        accept: bool,
        schema_path: String,
    },
    Rules {
        schema_path: String,
        keywords: Vec<Box<dyn Keyword>>,
    },
}

impl SchemaNode {
    pub(crate) fn compile(schema: &Value, schema_path: String) -> Result<Self, SchemaError> {
        match schema {
            Value::Bool(accept) => Ok(SchemaNode::Bool {
                accept: *accept,
                schema_path,
            }),
            Value::Object(map) => {
                let mut keywords = Vec::new();
                for compile in COMPILERS {
                    keywords.extend(compile(map, &schema_path)?);
                }
                Ok(SchemaNode::Rules {
                    schema_path,
                    keywords,
                })
            }
            _ => Err(SchemaError::NotASchema(schema_path)),
        }
    }

    pub(crate) fn validate_into(&self, value: &Value, data_path: &str, violations: &mut Vec<Violation>) {
        match self {
            SchemaNode::Bool { accept: true, .. } => {}
            SchemaNode::Bool {
                accept: false,
                schema_path,
            } => violations.push(Violation::new(
                "false schema",
                data_path,
                schema_path.clone(),
                json!({}),
                "boolean schema is false",
            )),
            SchemaNode::Rules {
                schema_path,
                keywords,
            } => {
                let mut scope = Scope::new(data_path, schema_path, violations);
                for keyword in keywords {
                    keyword.check(value, &mut scope);
                }
            }
        }
    }
}

/// A compiled schema, ready to validate any number of documents
#[derive(Debug)]
pub struct CompiledSchema {
    source: Value,
    root: SchemaNode,
}

impl CompiledSchema {
    /// The schema this was compiled from
    pub fn schema(&self) -> &Value {
        &self.source
    }

    /// Validate a document, collecting every violation in evaluation order
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let mut violations = Vec::new();
        self.root.validate_into(document, "", &mut violations);
        ValidationResult::from_violations(violations)
    }

    /// Shorthand for `validate(document).valid`
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validate(document).valid
    }
}

/// Compile a schema
pub fn compile(schema: &Value) -> Result<CompiledSchema, SchemaError> {
    let root = SchemaNode::compile(schema, "#".to_string())?;
    Ok(CompiledSchema {
        source: schema.clone(),
        root,
    })
}

/// Compile and validate in one step
pub fn validate(schema: &Value, document: &Value) -> Result<ValidationResult, SchemaError> {
    Ok(compile(schema)?.validate(document))
}
