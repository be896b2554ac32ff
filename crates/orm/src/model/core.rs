//! Model handle - one definition bound to one executor
//!
//! Every table goes through the same engine; what differs between models is
//! only the [`ModelDefinition`] the handle carries.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::definition::ModelDefinition;
use super::instance::ModelInstance;
use super::lifecycle::HookPipeline;
use crate::backends::QueryExecutor;
use crate::document::{self, Document};
use crate::error::{OrmError, OrmResult};
use crate::relationships::is_valid_definition;
use strata_schema::ValidationResult;

#[derive(Clone)]
pub struct Model {
    definition: Arc<ModelDefinition>,
    executor: Arc<dyn QueryExecutor>,
}

impl Model {
    pub fn new(definition: Arc<ModelDefinition>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self { definition, executor }
    }

    pub fn definition(&self) -> &Arc<ModelDefinition> {
        &self.definition
    }

    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn primary_key(&self) -> &str {
        self.definition.primary_key()
    }

    /// The model's table; a model error when the definition has none
    pub fn table_name(&self) -> OrmResult<&str> {
        self.definition
            .table_name()
            .filter(|table| !table.is_empty())
            .ok_or_else(|| {
                OrmError::Model(format!("Model failure, `tableName` is required: {}", self.name()))
            })
    }

    /// Fail with the first problem in the definition, if any
    pub fn check(&self) -> OrmResult<()> {
        is_valid_definition(&self.definition).into_result()
    }

    /// Validate a document; an explicit schema wins over the model's own
    pub fn validate(&self, document: &Value, schema: Option<&Value>) -> OrmResult<ValidationResult> {
        document::validate(document, schema.or_else(|| self.definition.json_schema()))
    }

    /// Construct an instance holding `document`
    ///
    /// The definition is checked first, then `on_create` runs once.
    pub async fn instance(&self, document: Document) -> OrmResult<ModelInstance> {
        self.check()?;
        HookPipeline::new(&self.definition).on_create(&document).await?;
        Ok(ModelInstance::new(self.clone(), document))
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}
