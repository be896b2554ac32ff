//! Query Builder SQL generation

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::*;

/// How values reach the rendered SQL
enum Binder {
    /// `$n` placeholders, values collected in order
    Placeholders(Vec<Value>),
    /// Values written in place
    Inline,
}

impl Binder {
    fn bind(&mut self, value: &Value) -> String {
        match self {
            Binder::Placeholders(params) => {
                params.push(value.clone());
                format!("${}", params.len())
            }
            Binder::Inline => format_value(value),
        }
    }
}

impl QueryBuilder {
    /// Generate SQL with `$n` placeholders and return the bound parameters
    pub fn to_sql_with_params(&self) -> (String, Vec<Value>) {
        let mut binder = Binder::Placeholders(Vec::new());
        let sql = self.render(&mut binder);
        let params = match binder {
            Binder::Placeholders(params) => params,
            Binder::Inline => Vec::new(),
        };
        (sql, params)
    }

    /// Generate SQL with parameters inlined (for logging and tests)
    pub fn to_sql(&self) -> String {
        self.render(&mut Binder::Inline)
    }

    fn render(&self, binder: &mut Binder) -> String {
        match self.query_type {
            QueryType::Select => self.build_select_sql(binder),
            QueryType::Insert => self.build_insert_sql(binder),
            QueryType::Update => self.build_update_sql(binder),
        }
    }

    fn table_sql(&self) -> &str {
        self.table.as_deref().unwrap_or("")
    }

    fn build_select_sql(&self, binder: &mut Binder) -> String {
        let mut sql = String::from("SELECT ");

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        if self.table.is_some() {
            sql.push_str(" FROM ");
            sql.push_str(self.table_sql());
        }

        for join in &self.joins {
            sql.push_str(&format!(" {} {}", join.kind, join.table));
            // CROSS JOIN takes no join condition
            if join.kind != JoinKind::Cross && !join.on_conditions.is_empty() {
                let conditions: Vec<String> = join
                    .on_conditions
                    .iter()
                    .map(|(left, right)| format!("{} = {}", left, right))
                    .collect();
                sql.push_str(" ON ");
                sql.push_str(&conditions.join(" AND "));
            }
        }

        self.build_where_clause(&mut sql, binder);
        self.build_order_limit_clause(&mut sql);
        sql
    }

    fn build_insert_sql(&self, binder: &mut Binder) -> String {
        let mut sql = format!("INSERT INTO {}", self.table_sql());

        if self.set_clauses.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            let columns: Vec<&str> = self.set_clauses.iter().map(|c| c.column.as_str()).collect();
            let values: Vec<String> = self
                .set_clauses
                .iter()
                .map(|clause| binder.bind(&clause.value))
                .collect();
            sql.push_str(&format!(" ({}) VALUES ({})", columns.join(", "), values.join(", ")));
        }

        if let Some(column) = &self.returning {
            sql.push_str(&format!(" RETURNING {}", column));
        }
        sql
    }

    fn build_update_sql(&self, binder: &mut Binder) -> String {
        let mut sql = format!("UPDATE {}", self.table_sql());

        if !self.set_clauses.is_empty() {
            let assignments: Vec<String> = self
                .set_clauses
                .iter()
                .map(|clause| format!("{} = {}", clause.column, binder.bind(&clause.value)))
                .collect();
            sql.push_str(" SET ");
            sql.push_str(&assignments.join(", "));
        }

        self.build_where_clause(&mut sql, binder);
        sql
    }

    /// Helper method to build WHERE clauses
    fn build_where_clause(&self, sql: &mut String, binder: &mut Binder) {
        if self.where_conditions.is_empty() {
            return;
        }
        let conditions: Vec<String> = self
            .where_conditions
            .iter()
            .map(|condition| match condition.operator {
                QueryOperator::IsNull | QueryOperator::IsNotNull => {
                    format!("{} {}", condition.column, condition.operator)
                }
                QueryOperator::In => {
                    let values: Vec<String> =
                        condition.values.iter().map(|value| binder.bind(value)).collect();
                    format!("{} {} ({})", condition.column, condition.operator, values.join(", "))
                }
                _ => {
                    let value = condition.value.clone().unwrap_or(Value::Null);
                    format!("{} {} {}", condition.column, condition.operator, binder.bind(&value))
                }
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    /// Helper method to build ORDER BY and LIMIT clauses
    fn build_order_limit_clause(&self, sql: &mut String) {
        if !self.order_by.is_empty() {
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_clauses.join(", "));
        }

        if let Some(limit) = self.limit_count {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
    }
}

/// Format a value for inline SQL
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "''")), // Escape single quotes
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_with_join() {
        let sql = QueryBuilder::table("users")
            .inner_join("accounts", "accounts.user_id", "users.id")
            .to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM users INNER JOIN accounts ON accounts.user_id = users.id"
        );
    }

    #[test]
    fn test_select_with_params() {
        let (sql, params) = QueryBuilder::table("users")
            .where_eq("id", 7)
            .where_in("role", vec!["admin", "owner"])
            .first(&["name"])
            .to_sql_with_params();
        assert_eq!(sql, "SELECT name FROM users WHERE id = $1 AND role IN ($2, $3) LIMIT 1");
        assert_eq!(params, vec![json!(7), json!("admin"), json!("owner")]);
    }

    #[test]
    fn test_insert_sql() {
        let document = json!({"name": "O'Brien"}).as_object().cloned().unwrap();
        let query = QueryBuilder::table("users").insert(document).returning("id");
        let (sql, params) = query.to_sql_with_params();
        assert_eq!(sql, "INSERT INTO users (name) VALUES ($1) RETURNING id");
        assert_eq!(params, vec![json!("O'Brien")]);
        assert_eq!(query.to_sql(), "INSERT INTO users (name) VALUES ('O''Brien') RETURNING id");
    }

    #[test]
    fn test_update_sql() {
        let payload = json!({"name": "just right"}).as_object().cloned().unwrap();
        let sql = QueryBuilder::table("users").where_eq("id", 1).update(payload).to_sql();
        assert_eq!(sql, "UPDATE users SET name = 'just right' WHERE id = 1");
    }

    #[test]
    fn test_inline_placeholders_do_not_collide() {
        let query = (1..=10).fold(QueryBuilder::table("t"), |q, i| q.where_eq(&format!("c{}", i), i));
        let sql = query.to_sql();
        assert!(sql.ends_with("c10 = 10"));
        assert!(sql.contains("c1 = 1 AND"));
    }

    #[test]
    fn test_inline_values_keep_dollar_text() {
        let sql = QueryBuilder::table("t").where_eq("a", 1).where_eq("b", "cost $1").to_sql();
        assert_eq!(sql, "SELECT * FROM t WHERE a = 1 AND b = 'cost $1'");

        let payload = json!({"note": "$2 off", "price": 3}).as_object().cloned().unwrap();
        let sql = QueryBuilder::table("t").where_eq("id", "$1").update(payload).to_sql();
        assert_eq!(sql, "UPDATE t SET note = '$2 off', price = 3 WHERE id = '$1'");
    }

    #[test]
    fn test_cross_join_has_no_condition() {
        let sql = QueryBuilder::table("users")
            .cross_join("accounts", "accounts.user_id", "users.id")
            .where_eq("accounts.id", 2)
            .to_sql();
        assert_eq!(sql, "SELECT * FROM users CROSS JOIN accounts WHERE accounts.id = 2");
    }
}
