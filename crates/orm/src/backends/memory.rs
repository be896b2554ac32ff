//! In-memory query executor
//!
//! Tables live in a shared concurrent map and rows are plain documents.
//! Primary keys that an insert leaves out are filled from a per-table
//! sequence starting at 1. Joins are not supported.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

use super::core::{ensure_query_type, require_table, QueryExecutor};
use crate::document::Document;
use crate::error::{OrmError, OrmResult};
use crate::query::{OrderDirection, QueryBuilder, QueryOperator, QueryType, WhereCondition};

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<Document>,
    sequence: i64,
}

/// Executor backed by process memory; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    tables: Arc<DashMap<String, MemoryTable>>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row stored in `table`
    pub fn rows(&self, table: &str) -> Vec<Document> {
        self.tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn insert(&self, query: &QueryBuilder) -> OrmResult<Value> {
        ensure_query_type(query, QueryType::Insert)?;
        let table_name = require_table(query)?;
        let key = query.returning_column().unwrap_or("id");
        let mut row = query.payload();

        let mut table = self.tables.entry(table_name.to_string()).or_default();
        let id = match row.get(key) {
            Some(Value::Null) | None => {
                table.sequence += 1;
                let id = Value::from(table.sequence);
                row.insert(key.to_string(), id.clone());
                id
            }
            Some(existing) => {
                if let Some(n) = existing.as_i64() {
                    table.sequence = table.sequence.max(n);
                }
                existing.clone()
            }
        };
        table.rows.push(row);

        trace!(table = table_name, id = %id, "memory insert");
        Ok(id)
    }

    async fn update(&self, query: &QueryBuilder) -> OrmResult<u64> {
        ensure_query_type(query, QueryType::Update)?;
        let table_name = require_table(query)?;
        reject_joins(query)?;
        let payload = query.payload();

        let Some(mut table) = self.tables.get_mut(table_name) else {
            return Ok(0);
        };
        let mut affected = 0;
        for row in table.rows.iter_mut() {
            if matches_all(row, query.where_conditions())? {
                for (column, value) in &payload {
                    row.insert(column.clone(), value.clone());
                }
                affected += 1;
            }
        }

        trace!(table = table_name, affected, "memory update");
        Ok(affected)
    }

    async fn fetch_all(&self, query: &QueryBuilder) -> OrmResult<Vec<Document>> {
        ensure_query_type(query, QueryType::Select)?;
        let table_name = require_table(query)?;
        reject_joins(query)?;

        let mut rows = Vec::new();
        if let Some(table) = self.tables.get(table_name) {
            for row in &table.rows {
                if matches_all(row, query.where_conditions())? {
                    rows.push(row.clone());
                }
            }
        }

        if !query.order_clauses().is_empty() {
            rows.sort_by(|a, b| {
                query
                    .order_clauses()
                    .iter()
                    .map(|(column, direction)| {
                        let column = unqualified(column);
                        let ordering = compare_values(field(a, column), field(b, column))
                            .unwrap_or(Ordering::Equal);
                        match direction {
                            OrderDirection::Asc => ordering,
                            OrderDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let offset = query.offset_value().unwrap_or(0).max(0) as usize;
        let limit = query.limit_count().map(|l| l.max(0) as usize).unwrap_or(usize::MAX);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| project(row, query.select_fields()))
            .collect())
    }
}

fn reject_joins(query: &QueryBuilder) -> OrmResult<()> {
    if query.joins().is_empty() {
        Ok(())
    } else {
        Err(OrmError::Query("joins are not supported by the in-memory executor".to_string()))
    }
}

fn unqualified(column: &str) -> &str {
    column.rsplit('.').next().unwrap_or(column)
}

fn field<'a>(row: &'a Document, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

fn project(row: Document, fields: &[String]) -> Document {
    if fields.is_empty() {
        return row;
    }
    fields
        .iter()
        .filter_map(|f| {
            let column = unqualified(f);
            row.get(column).map(|v| (column.to_string(), v.clone()))
        })
        .collect()
}

fn matches_all(row: &Document, conditions: &[WhereCondition]) -> OrmResult<bool> {
    for condition in conditions {
        if !matches(row, condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches(row: &Document, condition: &WhereCondition) -> OrmResult<bool> {
    let actual = field(row, unqualified(&condition.column));
    let expected = condition.value.as_ref().unwrap_or(&Value::Null);

    let result = match condition.operator {
        QueryOperator::Equal => values_equal(actual, expected),
        QueryOperator::NotEqual => !values_equal(actual, expected),
        QueryOperator::GreaterThan => compare_values(actual, expected) == Some(Ordering::Greater),
        QueryOperator::GreaterThanOrEqual => matches!(
            compare_values(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        QueryOperator::LessThan => compare_values(actual, expected) == Some(Ordering::Less),
        QueryOperator::LessThanOrEqual => matches!(
            compare_values(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        QueryOperator::Like => like(actual, expected)?,
        QueryOperator::In => condition.values.iter().any(|v| values_equal(actual, v)),
        QueryOperator::IsNull => actual.is_null(),
        QueryOperator::IsNotNull => !actual.is_null(),
    };
    Ok(result)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// SQL LIKE: `%` matches any run, `_` one character
fn like(actual: &Value, pattern: &Value) -> OrmResult<bool> {
    let (Value::String(actual), Value::String(pattern)) = (actual, pattern) else {
        return Ok(false);
    };
    let mut expression = String::from("^");
    for c in pattern.chars() {
        match c {
            '%' => expression.push_str(".*"),
            '_' => expression.push('.'),
            other => expression.push_str(&regex::escape(&other.to_string())),
        }
    }
    expression.push('$');
    let regex = Regex::new(&expression)
        .map_err(|e| OrmError::Query(format!("invalid LIKE pattern '{}': {}", pattern, e)))?;
    Ok(regex.is_match(actual))
}
