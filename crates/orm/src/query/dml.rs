//! Query Builder DML operations (INSERT, UPDATE)

use super::builder::QueryBuilder;
use super::types::*;
use crate::document::Document;

impl QueryBuilder {
    /// Turn the query into an INSERT of `document` into its table
    pub fn insert(mut self, document: Document) -> Self {
        self.query_type = QueryType::Insert;
        self.set_clauses = document
            .into_iter()
            .map(|(column, value)| SetClause { column, value })
            .collect();
        self
    }

    /// Turn the query into an UPDATE of its table with `payload`, keeping its WHERE conditions
    pub fn update(mut self, payload: Document) -> Self {
        self.query_type = QueryType::Update;
        self.set_clauses = payload
            .into_iter()
            .map(|(column, value)| SetClause { column, value })
            .collect();
        self
    }

    /// Column whose value an INSERT reports back
    pub fn returning(mut self, column: &str) -> Self {
        self.returning = Some(column.to_string());
        self
    }

    /// The INSERT/UPDATE payload as a document
    pub fn payload(&self) -> Document {
        self.set_clauses
            .iter()
            .map(|clause| (clause.column.clone(), clause.value.clone()))
            .collect()
    }
}
