//! Query Builder default-scope operations
//!
//! Default scopes are conditions the model applies to every query, the main
//! one being soft-delete exclusion. They render after user conditions, so a
//! query can accumulate predicates without interleaving with its scopes.

use super::builder::QueryBuilder;
use super::types::{Predicate, WhereCondition};

impl QueryBuilder {
    /// Drop all default scopes, including soft-deleted rows in results
    pub fn with_trashed(mut self) -> Self {
        self.scope_conditions.clear();
        self
    }

    /// Restrict the query to soft-deleted rows only
    ///
    /// Has no effect when the query's model does not use soft deletes.
    pub fn only_trashed(mut self) -> Self {
        let Some(column) = self
            .model
            .as_ref()
            .and_then(|model| model.qualified_soft_delete_column())
        else {
            return self;
        };
        self.scope_conditions = vec![WhereCondition::and(Predicate::Null {
            column,
            negated: true,
        })];
        self
    }
}
