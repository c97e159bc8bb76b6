//! Query Builder SELECT operations

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Add SELECT fields to the query
    pub fn select(mut self, fields: &str) -> Self {
        if fields == "*" {
            self.select_fields.push("*".to_string());
        } else {
            self.select_fields.extend(
                fields
                    .split(',')
                    .map(|f| f.trim().to_string())
                    .collect::<Vec<String>>(),
            );
        }
        self
    }

    /// Replace the SELECT list with a single column
    pub fn select_only(mut self, column: &str) -> Self {
        self.select_fields = vec![column.to_string()];
        self
    }

    /// Set the FROM table
    pub fn from(mut self, table: &str) -> Self {
        self.from_tables = vec![table.to_string()];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_splits_fields() {
        let query = QueryBuilder::new().from("users").select("id, name");
        assert_eq!(query.to_sql(), "SELECT id, name FROM users");
    }

    #[test]
    fn test_select_only_replaces_fields() {
        let query = QueryBuilder::new()
            .from("posts")
            .select("*")
            .select_only("posts.id");
        assert_eq!(query.to_sql(), "SELECT posts.id FROM posts");
    }
}
