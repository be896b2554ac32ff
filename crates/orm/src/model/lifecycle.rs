//! Write-path sequencing of validation and hooks
//!
//! insert: before_validate -> validate -> before_create -> before_save
//! update: before_validate -> validate (without `required`) -> before_update -> before_save

use serde_json::{Map, Value};
use tracing::trace;

use super::definition::ModelDefinition;
use crate::document::{ensure_valid, strip_required, Document};
use crate::error::{OrmError, OrmResult};

pub struct HookPipeline<'a> {
    definition: &'a ModelDefinition,
}

impl<'a> HookPipeline<'a> {
    pub fn new(definition: &'a ModelDefinition) -> Self {
        Self { definition }
    }

    /// Run `on_create` for a freshly constructed instance
    pub async fn on_create(&self, document: &Document) -> OrmResult<()> {
        self.definition.hooks().on_create(document).await.map_err(OrmError::Hook)
    }

    /// Validate an insert payload and let the hooks adjust it
    pub async fn prepare_insert(&self, mut document: Document) -> OrmResult<Document> {
        let schema = self.resolve_schema(&document).await?;
        ensure_valid(&document, schema.as_ref())?;

        let hooks = self.definition.hooks();
        hooks.before_create(&mut document).await.map_err(OrmError::Hook)?;
        hooks.before_save(&mut document).await.map_err(OrmError::Hook)?;
        trace!(model = self.definition.name(), "insert payload prepared");
        Ok(document)
    }

    /// Validate a partial update payload and let the hooks adjust it
    pub async fn prepare_update(&self, mut payload: Document) -> OrmResult<Document> {
        let schema = self.resolve_schema(&payload).await?.map(|schema| strip_required(&schema));
        ensure_valid(&payload, schema.as_ref())?;

        let hooks = self.definition.hooks();
        hooks.before_update(&mut payload).await.map_err(OrmError::Hook)?;
        hooks.before_save(&mut payload).await.map_err(OrmError::Hook)?;
        trace!(model = self.definition.name(), "update payload prepared");
        Ok(payload)
    }

    /// The schema for one write: the hook's replacement if it returns one, else the model schema
    async fn resolve_schema(&self, document: &Document) -> OrmResult<Option<Value>> {
        let base = self.definition.json_schema();
        let copy = base.cloned().unwrap_or_else(|| Value::Object(Map::new()));
        let replacement = self
            .definition
            .hooks()
            .before_validate(&copy, document)
            .await
            .map_err(OrmError::Hook)?;
        Ok(replacement.or_else(|| base.cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{HookResult, ModelHooks};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl ModelHooks for Recorder {
        async fn before_validate(&self, _schema: &Value, _document: &Document) -> HookResult<Option<Value>> {
            self.calls.lock().unwrap().push("before_validate");
            Ok(None)
        }

        async fn before_create(&self, document: &mut Document) -> HookResult {
            self.calls.lock().unwrap().push("before_create");
            document.insert("created".to_string(), json!(true));
            Ok(())
        }

        async fn before_update(&self, _document: &mut Document) -> HookResult {
            self.calls.lock().unwrap().push("before_update");
            Ok(())
        }

        async fn before_save(&self, _document: &mut Document) -> HookResult {
            self.calls.lock().unwrap().push("before_save");
            Ok(())
        }
    }

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn definition(hooks: Recorder) -> ModelDefinition {
        ModelDefinition::builder("User")
            .table_name("users")
            .json_schema(json!({
                "required": ["name"],
                "properties": {"name": {"type": "string", "maxLength": 12}}
            }))
            .hooks(hooks)
            .build()
    }

    #[tokio::test]
    async fn test_insert_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let definition = definition(Recorder { calls: Arc::clone(&calls) });

        let document = HookPipeline::new(&definition)
            .prepare_insert(doc(json!({"name": "short"})))
            .await
            .unwrap();
        assert_eq!(document["created"], json!(true));
        assert_eq!(*calls.lock().unwrap(), vec!["before_validate", "before_create", "before_save"]);
    }

    #[tokio::test]
    async fn test_update_order_and_partial_payload() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let definition = definition(Recorder { calls: Arc::clone(&calls) });

        let payload = HookPipeline::new(&definition)
            .prepare_update(doc(json!({"nickname": "x"})))
            .await
            .unwrap();
        assert!(payload.get("created").is_none());
        assert_eq!(*calls.lock().unwrap(), vec!["before_validate", "before_update", "before_save"]);
    }

    #[tokio::test]
    async fn test_invalid_document_stops_before_create() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let definition = definition(Recorder { calls: Arc::clone(&calls) });

        let err = HookPipeline::new(&definition)
            .prepare_insert(doc(json!({"name": "a string that is too long"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "document `name` should NOT be longer than 12 characters");
        assert_eq!(*calls.lock().unwrap(), vec!["before_validate"]);
    }
}
