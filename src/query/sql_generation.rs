//! Query Builder SQL generation

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::*;

/// How literal values are emitted into the SQL text
enum Binder<'a> {
    /// Inline literals (test and inspection output)
    Inline,
    /// `$n` placeholders with parameters collected in order of appearance
    Params {
        params: &'a mut Vec<String>,
        counter: &'a mut i32,
    },
}

impl Binder<'_> {
    fn bind(&mut self, value: &Value) -> String {
        match self {
            Binder::Inline => format_value(value),
            Binder::Params { params, counter } => {
                let placeholder = format!("${}", counter);
                params.push(match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
                **counter += 1;
                placeholder
            }
        }
    }
}

impl QueryBuilder {
    /// Convert the query to SQL with literals inlined
    pub fn to_sql(&self) -> String {
        self.build_select_sql(&mut Binder::Inline)
    }

    /// Generate SQL with `$n` placeholders and the parameters to bind
    ///
    /// Placeholders are numbered left to right across the whole query tree,
    /// including nested subqueries and trailing default scopes.
    pub fn to_sql_with_params(&self) -> (String, Vec<String>) {
        let mut params = Vec::new();
        let mut counter = 1;
        let sql = self.build_select_sql(&mut Binder::Params {
            params: &mut params,
            counter: &mut counter,
        });
        (sql, params)
    }

    fn build_select_sql(&self, binder: &mut Binder) -> String {
        let mut sql = String::new();

        sql.push_str("SELECT ");
        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        if !self.from_tables.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.from_tables.join(", "));
        }

        for join in &self.joins {
            sql.push_str(&format!(" {} {}", join.join_type, join.table));
            if !join.on_conditions.is_empty() {
                sql.push_str(" ON ");
                let conditions: Vec<String> = join
                    .on_conditions
                    .iter()
                    .map(|(left, right)| format!("{} = {}", left, right))
                    .collect();
                sql.push_str(&conditions.join(" AND "));
            }
        }

        // User conditions first, default scopes last, matching the order the
        // host ORM applies global scopes when compiling a query.
        let conditions: Vec<&WhereCondition> = self
            .where_conditions
            .iter()
            .chain(self.scope_conditions.iter())
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&render_conditions(&conditions, binder));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(&order_clauses.join(", "));
        }

        if let Some(limit) = self.limit_count {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}

fn render_conditions(conditions: &[&WhereCondition], binder: &mut Binder) -> String {
    let mut sql = String::new();
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            sql.push_str(&format!(" {} ", condition.connector));
        }
        sql.push_str(&render_predicate(&condition.predicate, binder));
    }
    sql
}

fn render_predicate(predicate: &Predicate, binder: &mut Binder) -> String {
    match predicate {
        Predicate::Compare {
            column,
            operator,
            value,
        } => format!("{} {} {}", column, operator, binder.bind(value)),
        Predicate::Null { column, negated } => {
            if *negated {
                format!("{} IS NOT NULL", column)
            } else {
                format!("{} IS NULL", column)
            }
        }
        Predicate::InList {
            column,
            negated,
            values,
        } => {
            let operator = if *negated {
                QueryOperator::NotIn
            } else {
                QueryOperator::In
            };
            let rendered: Vec<String> = values.iter().map(|v| binder.bind(v)).collect();
            format!("{} {} ({})", column, operator, rendered.join(", "))
        }
        Predicate::InSubquery {
            column,
            negated,
            subquery,
        } => {
            let operator = if *negated {
                QueryOperator::NotIn
            } else {
                QueryOperator::In
            };
            format!("{} {} ({})", column, operator, subquery.build_select_sql(binder))
        }
        Predicate::Grouped(conditions) => {
            let refs: Vec<&WhereCondition> = conditions.iter().collect();
            format!("({})", render_conditions(&refs, binder))
        }
    }
}

/// Format a value for inline SQL
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        _ => "NULL".to_string(), // Arrays and objects are not valid literals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subquery_rendering() {
        let inner = QueryBuilder::new()
            .from("posts")
            .select_only("posts.id")
            .where_eq("posts.published", true);
        let query = QueryBuilder::new()
            .from("comments")
            .where_in_subquery("comments.post_id", inner);
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM comments WHERE comments.post_id IN \
             (SELECT posts.id FROM posts WHERE posts.published = true)"
        );
    }

    #[test]
    fn test_params_number_across_subqueries() {
        let inner = QueryBuilder::new()
            .from("posts")
            .select_only("posts.id")
            .where_eq("posts.kind", "news");
        let query = QueryBuilder::new()
            .from("comments")
            .where_eq("comments.approved", true)
            .where_in_subquery("comments.post_id", inner)
            .where_eq("comments.author", "mpyw");

        let (sql, params) = query.to_sql_with_params();
        assert_eq!(
            sql,
            "SELECT * FROM comments WHERE comments.approved = $1 AND comments.post_id IN \
             (SELECT posts.id FROM posts WHERE posts.kind = $2) AND comments.author = $3"
        );
        assert_eq!(params, vec!["true", "news", "mpyw"]);
    }

    #[test]
    fn test_string_values_escape_quotes() {
        let query = QueryBuilder::new()
            .from("tags")
            .where_eq("tags.name", "it's");
        assert_eq!(query.to_sql(), "SELECT * FROM tags WHERE tags.name = 'it''s'");
    }
}
