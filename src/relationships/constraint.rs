//! Constraint callbacks and view selection
//!
//! User constraints on a rewritten relation can be written against either of
//! two abstractions: the relation itself (with pivot and soft-delete
//! helpers) or the plain query underneath it. The callback declares which
//! view it accepts and the engine hands it exactly that object, unwrapping
//! and re-wrapping the underlying query when the plain view is chosen.

use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::query::QueryBuilder;
use crate::relationships::relation::Relation;

/// The abstraction a constraint callback receives
pub enum ConstraintTarget {
    Relation(Relation),
    Query(QueryBuilder),
}

/// The view a callback declares it accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredView {
    /// No declaration; gets the relation view, the richer default
    Untyped,
    /// Declared against the relation abstraction
    Relation,
    /// Declared against the plain query abstraction
    Query,
    /// Declared against a union of views
    Union { relation: bool, query: bool },
}

/// The view actually handed to the callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedView {
    Relation,
    Query,
}

impl DeclaredView {
    /// Pick the view to hand over. The relation view wins whenever the
    /// declaration allows it; only an explicit plain-query declaration
    /// (or a union excluding the relation view) downgrades.
    pub fn selected(self) -> SelectedView {
        match self {
            DeclaredView::Untyped | DeclaredView::Relation => SelectedView::Relation,
            DeclaredView::Query => SelectedView::Query,
            DeclaredView::Union { relation: true, .. } => SelectedView::Relation,
            DeclaredView::Union {
                relation: false,
                query: true,
            } => SelectedView::Query,
            DeclaredView::Union {
                relation: false,
                query: false,
            } => SelectedView::Relation,
        }
    }
}

type Callback = Box<dyn FnOnce(ConstraintTarget) -> ModelResult<ConstraintTarget>>;

/// An optional, positionally supplied constraint for one path segment
pub struct Constraint {
    declared: DeclaredView,
    callback: Option<Callback>,
}

impl Constraint {
    /// The explicit "no constraint" marker
    pub fn skip() -> Self {
        Self {
            declared: DeclaredView::Untyped,
            callback: None,
        }
    }

    /// General constructor pairing a declared view with a callback
    pub fn declared(
        declared: DeclaredView,
        callback: impl FnOnce(ConstraintTarget) -> ModelResult<ConstraintTarget> + 'static,
    ) -> Self {
        Self {
            declared,
            callback: Some(Box::new(callback)),
        }
    }

    /// Constraint written against the relation view
    pub fn on_relation(f: impl FnOnce(Relation) -> ModelResult<Relation> + 'static) -> Self {
        Self::declared(DeclaredView::Relation, move |target| match target {
            ConstraintTarget::Relation(relation) => f(relation).map(ConstraintTarget::Relation),
            other => Ok(other),
        })
    }

    /// Constraint written against the plain query view
    pub fn on_query(f: impl FnOnce(QueryBuilder) -> ModelResult<QueryBuilder> + 'static) -> Self {
        Self::declared(DeclaredView::Query, move |target| match target {
            ConstraintTarget::Query(query) => f(query).map(ConstraintTarget::Query),
            other => Ok(other),
        })
    }

    /// Constraint accepting either view; the relation view is preferred
    pub fn on_any(
        f: impl FnOnce(ConstraintTarget) -> ModelResult<ConstraintTarget> + 'static,
    ) -> Self {
        Self::declared(
            DeclaredView::Union {
                relation: true,
                query: true,
            },
            f,
        )
    }

    /// The view this constraint will receive
    pub fn selected_view(&self) -> SelectedView {
        self.declared.selected()
    }

    /// Run the callback against the matching view of the relation.
    /// Errors from the callback propagate unchanged.
    pub(crate) fn apply(self, mut relation: Relation) -> ModelResult<Relation> {
        let Some(callback) = self.callback else {
            return Ok(relation);
        };

        match self.declared.selected() {
            SelectedView::Relation => match callback(ConstraintTarget::Relation(relation))? {
                ConstraintTarget::Relation(relation) => Ok(relation),
                ConstraintTarget::Query(_) => Err(ModelError::Constraint(
                    "constraint callback returned the plain query view for a relation".to_string(),
                )),
            },
            SelectedView::Query => {
                let query = relation.take_query();
                match callback(ConstraintTarget::Query(query))? {
                    ConstraintTarget::Query(query) => {
                        relation.restore_query(query);
                        Ok(relation)
                    }
                    ConstraintTarget::Relation(_) => Err(ModelError::Constraint(
                        "constraint callback returned the relation view for a plain query"
                            .to_string(),
                    )),
                }
            }
        }
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::skip()
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("declared", &self.declared)
            .field("present", &self.callback.is_some())
            .finish()
    }
}
