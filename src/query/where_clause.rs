//! Query Builder WHERE clause operations

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Add WHERE condition with equality
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Compare {
                column: column.to_string(),
                operator: QueryOperator::Equal,
                value: value.into(),
            },
        )
    }

    /// Add WHERE condition with not equal
    pub fn where_ne<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Compare {
                column: column.to_string(),
                operator: QueryOperator::NotEqual,
                value: value.into(),
            },
        )
    }

    /// Add WHERE condition with greater than
    pub fn where_gt<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Compare {
                column: column.to_string(),
                operator: QueryOperator::GreaterThan,
                value: value.into(),
            },
        )
    }

    /// Add WHERE condition with less than
    pub fn where_lt<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Compare {
                column: column.to_string(),
                operator: QueryOperator::LessThan,
                value: value.into(),
            },
        )
    }

    /// Add WHERE condition with LIKE
    pub fn where_like(self, column: &str, pattern: &str) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Compare {
                column: column.to_string(),
                operator: QueryOperator::Like,
                value: Value::String(pattern.to_string()),
            },
        )
    }

    /// Add WHERE condition with IN
    pub fn where_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        self.push_where(
            Connector::And,
            Predicate::InList {
                column: column.to_string(),
                negated: false,
                values: values.into_iter().map(|v| v.into()).collect(),
            },
        )
    }

    /// Add WHERE condition with IS NULL
    pub fn where_null(self, column: &str) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Null {
                column: column.to_string(),
                negated: false,
            },
        )
    }

    /// Add WHERE condition with IS NOT NULL
    pub fn where_not_null(self, column: &str) -> Self {
        self.push_where(
            Connector::And,
            Predicate::Null {
                column: column.to_string(),
                negated: true,
            },
        )
    }

    /// Add `column IN (subquery)` combined with AND
    pub fn where_in_subquery(self, column: &str, subquery: QueryBuilder) -> Self {
        self.push_where(Connector::And, Self::subquery_predicate(column, false, subquery))
    }

    /// Add `column IN (subquery)` combined with OR
    pub fn or_where_in_subquery(self, column: &str, subquery: QueryBuilder) -> Self {
        self.push_where(Connector::Or, Self::subquery_predicate(column, false, subquery))
    }

    /// Add `column NOT IN (subquery)` combined with AND
    pub fn where_not_in_subquery(self, column: &str, subquery: QueryBuilder) -> Self {
        self.push_where(Connector::And, Self::subquery_predicate(column, true, subquery))
    }

    /// Add `column NOT IN (subquery)` combined with OR
    pub fn or_where_not_in_subquery(self, column: &str, subquery: QueryBuilder) -> Self {
        self.push_where(Connector::Or, Self::subquery_predicate(column, true, subquery))
    }

    fn subquery_predicate(column: &str, negated: bool, subquery: QueryBuilder) -> Predicate {
        Predicate::InSubquery {
            column: column.to_string(),
            negated,
            subquery: Box::new(subquery),
        }
    }

    /// Append a predicate with the given connector.
    ///
    /// An OR-connected predicate folds the prior conditions and the new one
    /// into a single parenthesized group, so default scopes appended after
    /// the WHERE list cannot change its precedence.
    pub(crate) fn push_where(mut self, connector: Connector, predicate: Predicate) -> Self {
        if connector == Connector::Or && !self.where_conditions.is_empty() {
            let mut grouped = std::mem::take(&mut self.where_conditions);
            grouped.push(WhereCondition::or(predicate));
            self.where_conditions
                .push(WhereCondition::and(Predicate::Grouped(grouped)));
        } else {
            self.where_conditions.push(WhereCondition::and(predicate));
        }
        self
    }
}
