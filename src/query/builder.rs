//! Query Builder - Core builder implementation

use std::sync::Arc;

use super::types::*;
use crate::model::ModelDefinition;

/// Query builder for constructing SELECT queries
///
/// Holds an optional reference to the model definition it was created from,
/// which is what relation names on the query are resolved against.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) select_fields: Vec<String>,
    pub(crate) from_tables: Vec<String>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    /// Default scopes (e.g. soft-delete exclusion), rendered after
    /// user-supplied conditions the way the host ORM appends global scopes.
    pub(crate) scope_conditions: Vec<WhereCondition>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<i64>,
    pub(crate) offset_value: Option<i64>,
    pub(crate) model: Option<Arc<ModelDefinition>>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query builder bound to a model definition
    pub fn for_model(model: Arc<ModelDefinition>) -> Self {
        let mut query = Self::new().from(&model.table);
        if let Some(column) = model.soft_delete_column.as_deref() {
            let qualified = model.qualified_column(column);
            query.scope_conditions.push(WhereCondition::and(Predicate::Null {
                column: qualified,
                negated: false,
            }));
        }
        query.model = Some(model);
        query
    }

    /// The model definition this query was built for, if any
    pub fn model(&self) -> Option<&Arc<ModelDefinition>> {
        self.model.as_ref()
    }
}
