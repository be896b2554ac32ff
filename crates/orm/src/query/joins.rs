//! Query Builder JOIN operations

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Add a join of any kind on `left_col = right_col`
    pub fn join(mut self, kind: JoinKind, table: &str, left_col: &str, right_col: &str) -> Self {
        self.joins.push(JoinClause {
            kind,
            table: table.to_string(),
            on_conditions: vec![(left_col.to_string(), right_col.to_string())],
        });
        self
    }

    /// Add INNER JOIN to the query
    pub fn inner_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::Inner, table, left_col, right_col)
    }

    /// Add LEFT JOIN to the query
    pub fn left_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::Left, table, left_col, right_col)
    }

    /// Add LEFT OUTER JOIN to the query
    pub fn left_outer_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::LeftOuter, table, left_col, right_col)
    }

    /// Add RIGHT JOIN to the query
    pub fn right_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::Right, table, left_col, right_col)
    }

    /// Add RIGHT OUTER JOIN to the query
    pub fn right_outer_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::RightOuter, table, left_col, right_col)
    }

    /// Add FULL OUTER JOIN to the query
    pub fn full_outer_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::FullOuter, table, left_col, right_col)
    }

    /// Add CROSS JOIN to the query
    pub fn cross_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join(JoinKind::Cross, table, left_col, right_col)
    }
}
