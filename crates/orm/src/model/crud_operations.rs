//! CRUD Operations - validated, hook-driven writes for models

use serde_json::Value;
use tracing::debug;

use super::core::Model;
use super::lifecycle::HookPipeline;
use crate::document::Document;
use crate::error::{OrmError, OrmResult};
use crate::query::{QueryBuilder, QueryType};

impl Model {
    /// Construct an instance from `document` and save it
    pub async fn insert(&self, document: Document) -> OrmResult<Document> {
        self.instance(document).await?.save().await
    }

    /// Insert an already constructed document and fetch the stored row back
    pub(crate) async fn persist(&self, document: Document) -> OrmResult<Document> {
        let table = self.table_name()?;
        let key = self.primary_key();
        let document = HookPipeline::new(self.definition()).prepare_insert(document).await?;

        let own_id = document.get(key).filter(|id| !id.is_null()).cloned();
        let query = QueryBuilder::table(table).insert(document).returning(key);
        let reported_id = self.executor().insert(&query).await?;
        let id = own_id.unwrap_or(reported_id);
        debug!(model = self.name(), table, id = %id, "inserted document");

        self.find_or_fail(id).await
    }

    /// Update every row `filter` matches with the validated `payload`
    pub(crate) async fn update_where(&self, filter: QueryBuilder, payload: Document) -> OrmResult<u64> {
        if filter.query_type() != QueryType::Select {
            return Err(OrmError::Query("update filter must be a plain query".to_string()));
        }
        if !filter.joins().is_empty() {
            return Err(OrmError::Query("update filter cannot contain joins".to_string()));
        }
        let payload = HookPipeline::new(self.definition()).prepare_update(payload).await?;

        let query = filter.update(payload);
        let affected = self.executor().update(&query).await?;
        debug!(model = self.name(), table = ?query.table_name(), affected, "updated documents");
        Ok(affected)
    }

    /// Update the row with primary key `id`
    pub async fn update_by_id<T: Into<Value>>(&self, id: T, payload: Document) -> OrmResult<u64> {
        let filter = QueryBuilder::table(self.table_name()?).where_eq(self.primary_key(), id);
        self.update_where(filter, payload).await
    }

    /// Fetch the row with primary key `id`, or fail with `NotFound`
    pub async fn find_or_fail<T: Into<Value>>(&self, id: T) -> OrmResult<Document> {
        let table = self.table_name()?;
        self.by_id(id, &[])
            .await?
            .ok_or_else(|| OrmError::NotFound(table.to_string()))
    }
}
