//! Query Methods - table-scoped and relationship-joined queries for models

use serde_json::Value;

use super::core::Model;
use crate::document::Document;
use crate::error::OrmResult;
use crate::query::{JoinKind, QueryBuilder};
use crate::relationships::{compose_joins, RelationNames};

impl Model {
    /// A query scoped to the model's table; the definition is checked first
    pub fn query(&self) -> OrmResult<ModelQuery> {
        self.check()?;
        let builder = QueryBuilder::table(self.table_name()?);
        Ok(ModelQuery::new(self.clone(), builder))
    }

    /// A query joined through one or more of the model's relationships
    pub fn query_with(&self, relations: impl Into<RelationNames>) -> OrmResult<ModelQuery> {
        self.check()?;
        let base = QueryBuilder::table(self.table_name()?);
        let builder = compose_joins(base, relations, self.definition())?;
        Ok(ModelQuery::new(self.clone(), builder))
    }

    /// The row with primary key `id`, restricted to `fields` when given
    pub async fn by_id<T: Into<Value>>(&self, id: T, fields: &[&str]) -> OrmResult<Option<Document>> {
        self.query()?
            .where_eq(self.primary_key(), id)
            .first(fields)
            .await
    }

    /// Every row of the model's table
    pub async fn all(&self) -> OrmResult<Vec<Document>> {
        self.query()?.get().await
    }
}

/// A query bound to its model; writes go through the model's hooks
#[derive(Debug, Clone)]
pub struct ModelQuery {
    model: Model,
    builder: QueryBuilder,
}

impl ModelQuery {
    pub(crate) fn new(model: Model, builder: QueryBuilder) -> Self {
        Self { model, builder }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn into_builder(self) -> QueryBuilder {
        self.builder
    }

    pub fn to_sql(&self) -> String {
        self.builder.to_sql()
    }

    /// Apply an arbitrary builder step
    pub fn map(mut self, f: impl FnOnce(QueryBuilder) -> QueryBuilder) -> Self {
        self.builder = f(self.builder);
        self
    }

    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_eq(column, value))
    }

    /// One equality condition per member of `fields`
    pub fn where_fields(self, fields: &Document) -> Self {
        self.map(|b| b.where_fields(fields))
    }

    pub fn where_ne<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_ne(column, value))
    }

    pub fn where_gt<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_gt(column, value))
    }

    pub fn where_gte<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_gte(column, value))
    }

    pub fn where_lt<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_lt(column, value))
    }

    pub fn where_lte<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.map(|b| b.where_lte(column, value))
    }

    pub fn where_like(self, column: &str, pattern: &str) -> Self {
        self.map(|b| b.where_like(column, pattern))
    }

    pub fn where_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        self.map(|b| b.where_in(column, values))
    }

    pub fn where_null(self, column: &str) -> Self {
        self.map(|b| b.where_null(column))
    }

    pub fn where_not_null(self, column: &str) -> Self {
        self.map(|b| b.where_not_null(column))
    }

    pub fn select(self, fields: &[&str]) -> Self {
        self.map(|b| b.select(fields))
    }

    pub fn join(self, kind: JoinKind, table: &str, left_col: &str, right_col: &str) -> Self {
        self.map(|b| b.join(kind, table, left_col, right_col))
    }

    pub fn order_by(self, column: &str) -> Self {
        self.map(|b| b.order_by(column))
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.map(|b| b.order_by_desc(column))
    }

    pub fn limit(self, count: i64) -> Self {
        self.map(|b| b.limit(count))
    }

    pub fn offset(self, count: i64) -> Self {
        self.map(|b| b.offset(count))
    }

    /// Every matching row
    pub async fn get(self) -> OrmResult<Vec<Document>> {
        self.model.executor().fetch_all(&self.builder).await
    }

    /// The first matching row, restricted to `fields` when given
    pub async fn first(self, fields: &[&str]) -> OrmResult<Option<Document>> {
        let query = self.builder.first(fields);
        self.model.executor().fetch_optional(&query).await
    }

    /// Insert through the model's full write path
    pub async fn insert(self, document: Document) -> OrmResult<Document> {
        self.model.insert(document).await
    }

    /// Update the matching rows with a validated partial payload
    pub async fn update(self, payload: Document) -> OrmResult<u64> {
        self.model.update_where(self.builder, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryExecutor;
    use crate::model::ModelDefinition;
    use crate::registry::ModelRegistry;
    use crate::relationships::RelationshipDefinition;
    use serde_json::json;
    use std::sync::Arc;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_by_id_with_fields() {
        let executor = Arc::new(MemoryExecutor::new());
        let model = Model::new(
            ModelDefinition::builder("User").table_name("users").build_shared(),
            executor,
        );
        model.insert(doc(json!({"name": "ada", "email": "ada@example.com"}))).await.unwrap();

        let row = model.by_id(1, &["name"]).await.unwrap().unwrap();
        assert_eq!(row, doc(json!({"name": "ada"})));
        assert!(model.by_id(2, &[]).await.unwrap().is_none());
        assert_eq!(model.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_query_update_counts_rows() {
        let model = Model::new(
            ModelDefinition::builder("User").table_name("users").build_shared(),
            Arc::new(MemoryExecutor::new()),
        );
        for name in ["a", "b", "c"] {
            model.query().unwrap().insert(doc(json!({"name": name, "active": false}))).await.unwrap();
        }

        let affected = model
            .query()
            .unwrap()
            .where_in("name", vec!["a", "c"])
            .update(doc(json!({"active": true})))
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let active = model.query().unwrap().where_eq("active", true).get().await.unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_queries_check_the_definition() {
        let model = Model::new(
            ModelDefinition::builder("bad_name1").table_name("users").build_shared(),
            Arc::new(MemoryExecutor::new()),
        );

        let err = model.query().unwrap_err();
        assert!(err.is_model_error());
        assert_eq!(
            err.to_string(),
            "Model failure, name must start with an uppercase letter: bad_name1"
        );
        assert!(model.query_with(Vec::<String>::new()).is_err());
        assert!(model.all().await.is_err());
        assert!(model.by_id(1, &[]).await.is_err());
    }

    #[test]
    fn test_query_with_builds_joins() {
        let registry = ModelRegistry::new();
        let account = ModelDefinition::builder("Account").table_name("accounts").build_shared();
        account.register(&registry).unwrap();
        let user = ModelDefinition::builder("User")
            .table_name("users")
            .relationship("accounts", RelationshipDefinition::has_many("Account"))
            .build_shared();
        user.register(&registry).unwrap();

        let model = Model::new(user, Arc::new(MemoryExecutor::new()));
        let sql = model.query_with("accounts").unwrap().where_eq("users.id", 1).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM users INNER JOIN accounts ON accounts.user_id = users.id WHERE users.id = 1"
        );
    }
}
