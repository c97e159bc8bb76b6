//! Relationship-existence rewrites as non-dependent subqueries
//!
//! `has`/`doesnt_have` constraints are usually compiled as correlated
//! EXISTS subqueries, which many planners re-execute per outer row. These
//! operations express the same check as `key [NOT] IN (SELECT ...)` with a
//! subquery that never references the outer row, so the planner can run it
//! once. Dot-chained paths nest one IN subquery per segment.

use std::collections::VecDeque;

use crate::error::{ModelError, ModelResult};
use crate::query::builder::QueryBuilder;
use crate::query::path::{contains_alias_directive, RelationPath};
use crate::query::types::{Connector, Predicate, WhereCondition};
use crate::relationships::constraint::Constraint;
use crate::relationships::keys::RelationKeys;
use crate::relationships::registry::global_registry;
use crate::relationships::relation::Relation;

impl QueryBuilder {
    /// Constrain the query to rows having a related record on `path`,
    /// combined with AND
    pub fn has(
        self,
        path: impl Into<RelationPath>,
        constraints: Vec<Constraint>,
    ) -> ModelResult<Self> {
        self.apply_has(path.into(), constraints, false, Connector::And)
    }

    /// Constrain the query to rows having a related record on `path`,
    /// combined with OR
    pub fn or_has(
        self,
        path: impl Into<RelationPath>,
        constraints: Vec<Constraint>,
    ) -> ModelResult<Self> {
        self.apply_has(path.into(), constraints, false, Connector::Or)
    }

    /// Constrain the query to rows having no related record on `path`,
    /// combined with AND
    pub fn doesnt_have(
        self,
        path: impl Into<RelationPath>,
        constraints: Vec<Constraint>,
    ) -> ModelResult<Self> {
        self.apply_has(path.into(), constraints, true, Connector::And)
    }

    /// Constrain the query to rows having no related record on `path`,
    /// combined with OR
    pub fn or_doesnt_have(
        self,
        path: impl Into<RelationPath>,
        constraints: Vec<Constraint>,
    ) -> ModelResult<Self> {
        self.apply_has(path.into(), constraints, true, Connector::Or)
    }

    /// Rewrite the first path segment as an IN/NOT-IN subquery predicate,
    /// recursing into the remaining segments against the inner query.
    ///
    /// Only the outermost level uses the caller's connector and negation;
    /// nested levels always combine with AND/IN. Constraints align
    /// positionally with segments; missing trailing entries mean "no
    /// constraint" and surplus entries are ignored. Nothing is attached to
    /// the outer query until the whole subquery is built.
    fn apply_has(
        self,
        path: RelationPath,
        constraints: Vec<Constraint>,
        negated: bool,
        connector: Connector,
    ) -> ModelResult<Self> {
        let mut segments = path.segments;
        let mut constraints = VecDeque::from(constraints);

        let Some(current) = segments.pop_front() else {
            return Ok(self);
        };
        // An empty leading segment means there is no relation to apply.
        if current.is_empty() {
            return Ok(self);
        }

        if contains_alias_directive(&current) {
            return Err(ModelError::AliasNotSupported(current));
        }

        let model = self.model.clone().ok_or_else(|| {
            ModelError::Configuration(
                "query has no model to resolve relationships against".to_string(),
            )
        })?;

        let relation = Relation::resolve(&model, &current, global_registry())?;
        let keys = RelationKeys::resolve(&relation)?;

        let constraint = constraints.pop_front().unwrap_or_default();
        let mut relation = constraint.apply(relation)?;

        if !segments.is_empty() {
            let inner = relation.take_query().apply_has(
                RelationPath::from_segments(segments),
                Vec::from(constraints),
                false,
                Connector::And,
            )?;
            relation.restore_query(inner);
        }

        let mut subquery = relation.into_query().select_only(&keys.related_key);
        if let Some(morph) = keys.morph.as_ref().filter(|_| keys.morph_constrains_related()) {
            subquery = subquery.where_eq(&morph.type_column, morph.alias.clone());
        }

        tracing::debug!(
            "Rewriting relation '{}' on '{}' as a non-dependent {} subquery",
            current,
            model.name,
            if negated { "NOT IN" } else { "IN" }
        );

        let membership = Predicate::InSubquery {
            column: keys.source_key.clone(),
            negated,
            subquery: Box::new(subquery),
        };

        // A pinned polymorphic-owner relation also has to match the outer
        // row's type column, grouped with the membership test so OR
        // attachment cannot split them.
        let predicate = match keys.morph.as_ref().filter(|_| keys.morph_constrains_source()) {
            Some(morph) => Predicate::Grouped(vec![
                WhereCondition::and(Predicate::Compare {
                    column: morph.type_column.clone(),
                    operator: crate::query::types::QueryOperator::Equal,
                    value: morph.alias.clone().into(),
                }),
                WhereCondition::and(membership),
            ]),
            None => membership,
        };

        Ok(self.push_where(connector, predicate))
    }
}
