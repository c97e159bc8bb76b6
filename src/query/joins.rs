//! Query Builder JOIN operations

use super::builder::QueryBuilder;
use super::types::{JoinClause, JoinType};

impl QueryBuilder {
    /// Add an INNER JOIN
    pub fn inner_join(mut self, table: &str, left_column: &str, right_column: &str) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Inner,
            table: table.to_string(),
            on_conditions: vec![(left_column.to_string(), right_column.to_string())],
        });
        self
    }

    /// Add a LEFT JOIN
    pub fn left_join(mut self, table: &str, left_column: &str, right_column: &str) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Left,
            table: table.to_string(),
            on_conditions: vec![(left_column.to_string(), right_column.to_string())],
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_join_sql() {
        let query = QueryBuilder::new()
            .from("tags")
            .inner_join("tag_references", "tags.id", "tag_references.tag_id");
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM tags INNER JOIN tag_references ON tags.id = tag_references.tag_id"
        );
    }

    #[test]
    fn test_left_join_sql() {
        let query = QueryBuilder::new()
            .from("posts")
            .left_join("users", "users.id", "posts.author_id");
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM posts LEFT JOIN users ON users.id = posts.author_id"
        );
    }
}
