//! Model instances - one document waiting to be saved

use serde_json::Value;

use super::core::Model;
use crate::document::Document;
use crate::error::OrmResult;

/// A document bound to its model
///
/// Built through [`Model::instance`], which has already checked the
/// definition and run `on_create`.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    model: Model,
    document: Document,
}

impl ModelInstance {
    pub(crate) fn new(model: Model, document: Document) -> Self {
        Self { model, document }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.document.get(field)
    }

    pub fn set<T: Into<Value>>(&mut self, field: &str, value: T) {
        self.document.insert(field.to_string(), value.into());
    }

    /// Validate, run the write hooks, insert and return the persisted record
    ///
    /// The document moves into the write; on success the stored row is
    /// fetched back by primary key.
    pub async fn save(self) -> OrmResult<Document> {
        self.model.persist(self.document).await
    }
}
