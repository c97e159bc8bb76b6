//! Relation instances - a named relationship resolved against a model
//!
//! A `Relation` pairs the relationship metadata with both model definitions
//! and owns the relation's scoped query: a builder pre-targeted at the
//! related table, with pivot/through joins and the related model's default
//! scopes already applied. Constraint callbacks receive this object (or its
//! underlying plain query) to add their own filtering.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use crate::model::ModelDefinition;
use crate::query::QueryBuilder;
use crate::relationships::metadata::{RelationshipMetadata, RelationshipType};
use crate::relationships::registry::ModelRegistry;

/// A relationship instance bound to a parent model
#[derive(Debug, Clone)]
pub struct Relation {
    metadata: RelationshipMetadata,
    parent: Arc<ModelDefinition>,
    related: Arc<ModelDefinition>,
    query: QueryBuilder,
}

impl Relation {
    /// Resolve a relation by name against a parent model.
    ///
    /// Fails with `UnsupportedRelation` for a polymorphic-owner relation
    /// that does not pin a concrete owner model, since no single related
    /// table exists to query.
    pub fn resolve(
        parent: &Arc<ModelDefinition>,
        name: &str,
        registry: &ModelRegistry,
    ) -> ModelResult<Self> {
        let metadata = parent
            .relationship(name)
            .cloned()
            .ok_or_else(|| {
                ModelError::Relationship(format!(
                    "Relationship '{}' is not defined on model '{}'",
                    name, parent.name
                ))
            })?;

        if metadata.relationship_type == RelationshipType::MorphTo
            && metadata.related_model.is_empty()
        {
            return Err(ModelError::UnsupportedRelation(format!(
                "'{}' on '{}' is a polymorphic-owner relation without a pinned owner model",
                name, parent.name
            )));
        }

        let related = registry.get(&metadata.related_model)?;
        let query = Self::scoped_query(&metadata, &related)?;

        tracing::debug!(
            "Resolved relation '{}' on '{}' ({:?} -> '{}')",
            name,
            parent.name,
            metadata.relationship_type,
            related.name
        );

        Ok(Self {
            metadata,
            parent: Arc::clone(parent),
            related,
            query,
        })
    }

    /// Build the relation's scoped query: FROM the related table, pivot or
    /// through joins applied, related model's default scopes active.
    fn scoped_query(
        metadata: &RelationshipMetadata,
        related: &Arc<ModelDefinition>,
    ) -> ModelResult<QueryBuilder> {
        let query = QueryBuilder::for_model(Arc::clone(related));

        Ok(match metadata.relationship_type {
            RelationshipType::ManyToMany | RelationshipType::MorphToMany => {
                let pivot = metadata.pivot_config.as_ref().ok_or_else(|| {
                    ModelError::Configuration(format!(
                        "Relationship '{}' is missing pivot configuration",
                        metadata.name
                    ))
                })?;
                query.inner_join(
                    &pivot.table,
                    &related.qualified_key(),
                    &pivot.qualified_column(&pivot.foreign_key),
                )
            }
            RelationshipType::HasManyThrough => {
                let through = metadata.through_config.as_ref().ok_or_else(|| {
                    ModelError::Configuration(format!(
                        "Relationship '{}' is missing through configuration",
                        metadata.name
                    ))
                })?;
                query.inner_join(
                    &through.through_table,
                    &through.qualified_column(&through.second_local_key),
                    &related.qualified_column(&through.second_key),
                )
            }
            _ => query,
        })
    }

    /// The relationship metadata
    pub fn metadata(&self) -> &RelationshipMetadata {
        &self.metadata
    }

    /// The parent (outer) model definition
    pub fn parent(&self) -> &Arc<ModelDefinition> {
        &self.parent
    }

    /// The related (inner) model definition
    pub fn related(&self) -> &Arc<ModelDefinition> {
        &self.related
    }

    /// The relation's scoped query
    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    /// Apply an arbitrary transformation to the underlying query
    pub fn modify_query(mut self, f: impl FnOnce(QueryBuilder) -> QueryBuilder) -> Self {
        self.query = f(self.query);
        self
    }

    /// Include soft-deleted related rows
    pub fn with_trashed(self) -> Self {
        self.modify_query(QueryBuilder::with_trashed)
    }

    /// Restrict to soft-deleted related rows only
    pub fn only_trashed(self) -> Self {
        self.modify_query(QueryBuilder::only_trashed)
    }

    /// Add an equality filter on the related table
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        let column = self.related.qualified_column(column);
        self.modify_query(|q| q.where_eq(&column, value))
    }

    /// Add an IS NULL filter on the related table
    pub fn where_null(self, column: &str) -> Self {
        let column = self.related.qualified_column(column);
        self.modify_query(|q| q.where_null(&column))
    }

    /// Add an IS NOT NULL filter on the related table
    pub fn where_not_null(self, column: &str) -> Self {
        let column = self.related.qualified_column(column);
        self.modify_query(|q| q.where_not_null(&column))
    }

    /// Add an IN filter on the related table
    pub fn where_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        let column = self.related.qualified_column(column);
        self.modify_query(|q| q.where_in(&column, values))
    }

    /// Add an equality filter on the pivot table.
    /// Fails on relations that have no pivot table.
    pub fn where_pivot_eq<T: Into<Value>>(self, column: &str, value: T) -> ModelResult<Self> {
        let pivot = self.metadata.pivot_config.as_ref().ok_or_else(|| {
            ModelError::Configuration(format!(
                "Relationship '{}' has no pivot table to constrain",
                self.metadata.name
            ))
        })?;
        let column = pivot.qualified_column(column);
        Ok(self.modify_query(|q| q.where_eq(&column, value)))
    }

    /// Detach the underlying query (used for nested rewrites)
    pub(crate) fn take_query(&mut self) -> QueryBuilder {
        std::mem::take(&mut self.query)
    }

    /// Reattach the underlying query after a nested rewrite
    pub(crate) fn restore_query(&mut self, query: QueryBuilder) {
        self.query = query;
    }

    /// Consume the relation, yielding the underlying query
    pub(crate) fn into_query(self) -> QueryBuilder {
        self.query
    }
}
