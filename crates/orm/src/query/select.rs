//! Query Builder SELECT operations

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Set the table the query reads from (and writes to)
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Add SELECT fields to the query; `*` or no fields selects everything
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields.extend(
            fields
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty() && *f != "*")
                .map(str::to_string),
        );
        self
    }

    /// Restrict to the first row, optionally selecting `fields`
    pub fn first(self, fields: &[&str]) -> Self {
        self.select(fields).limit(1)
    }
}
