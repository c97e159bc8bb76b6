//! Query Builder Types - Core types and enums for query building

use serde_json::Value;
use std::fmt;

/// Query operator types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    In,
    NotIn,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::NotEqual => write!(f, "!="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::Like => write!(f, "LIKE"),
            QueryOperator::In => write!(f, "IN"),
            QueryOperator::NotIn => write!(f, "NOT IN"),
        }
    }
}

/// Boolean connector joining a WHERE condition to the conditions before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::And => write!(f, "AND"),
            Connector::Or => write!(f, "OR"),
        }
    }
}

/// A single WHERE predicate shape
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `column <op> value`
    Compare {
        column: String,
        operator: QueryOperator,
        value: Value,
    },
    /// `column IS [NOT] NULL`
    Null { column: String, negated: bool },
    /// `column [NOT] IN (v1, v2, ...)`
    InList {
        column: String,
        negated: bool,
        values: Vec<Value>,
    },
    /// `column [NOT] IN (SELECT ...)` over a fully built subquery
    InSubquery {
        column: String,
        negated: bool,
        subquery: Box<super::builder::QueryBuilder>,
    },
    /// Parenthesized group of conditions
    Grouped(Vec<WhereCondition>),
}

/// Where clause condition
#[derive(Debug, Clone)]
pub struct WhereCondition {
    pub connector: Connector,
    pub predicate: Predicate,
}

impl WhereCondition {
    pub fn and(predicate: Predicate) -> Self {
        Self {
            connector: Connector::And,
            predicate,
        }
    }

    pub fn or(predicate: Predicate) -> Self {
        Self {
            connector: Connector::Or,
            predicate,
        }
    }
}

/// Join types
#[derive(Debug, Clone, PartialEq)]
pub enum JoinType {
    Inner,
    Left,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
        }
    }
}

/// Join clause
#[derive(Debug, Clone)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: String,
    pub on_conditions: Vec<(String, String)>, // (left_column, right_column)
}

/// Order by direction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}
