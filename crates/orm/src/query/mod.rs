//! Query Builder Module - fluent, table-scoped query values
//!
//! A [`QueryBuilder`] only describes a query. Running it is the job of a
//! [`QueryExecutor`](crate::backends::QueryExecutor).

pub mod builder;
pub mod dml;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use types::{
    JoinClause, JoinKind, OrderDirection, QueryOperator, QueryType, SetClause, WhereCondition,
};
