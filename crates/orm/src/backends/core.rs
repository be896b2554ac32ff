//! Core query execution trait
//!
//! The ORM core never talks to a database itself. It hands finished
//! [`QueryBuilder`] values to a [`QueryExecutor`], which runs them against
//! whatever storage backs the application.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;
use crate::error::{OrmError, OrmResult};
use crate::query::{QueryBuilder, QueryType};

/// Storage engine seam
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run an INSERT and return the value of its RETURNING column
    async fn insert(&self, query: &QueryBuilder) -> OrmResult<Value>;

    /// Run an UPDATE and return the number of affected rows
    async fn update(&self, query: &QueryBuilder) -> OrmResult<u64>;

    /// Run a SELECT and return every matching row
    async fn fetch_all(&self, query: &QueryBuilder) -> OrmResult<Vec<Document>>;

    /// Run a SELECT and return the first matching row
    async fn fetch_optional(&self, query: &QueryBuilder) -> OrmResult<Option<Document>> {
        let query = query.clone().limit(1);
        Ok(self.fetch_all(&query).await?.into_iter().next())
    }
}

/// Reject a query whose type does not match the executor method it was given to
pub fn ensure_query_type(query: &QueryBuilder, expected: QueryType) -> OrmResult<()> {
    if query.query_type() == expected {
        Ok(())
    } else {
        Err(OrmError::Query(format!(
            "expected {:?} query, got {:?}",
            expected,
            query.query_type()
        )))
    }
}

/// The table a query targets
pub fn require_table(query: &QueryBuilder) -> OrmResult<&str> {
    query
        .table_name()
        .ok_or_else(|| OrmError::Query("query has no table".to_string()))
}
