//! Query Builder ORDER BY, LIMIT and OFFSET operations

use super::builder::QueryBuilder;
use super::types::OrderDirection;

impl QueryBuilder {
    /// Add ORDER BY ascending
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), OrderDirection::Asc));
        self
    }

    /// Add ORDER BY descending
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), OrderDirection::Desc));
        self
    }

    /// Set LIMIT
    pub fn limit(mut self, count: i64) -> Self {
        self.limit_count = Some(count);
        self
    }

    /// Set OFFSET
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset_value = Some(offset);
        self
    }
}
