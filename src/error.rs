//! Error types for the subquery rewriter
//!
//! Provides error handling for relation resolution, key extraction,
//! and query rewriting. All failures are immediate and synchronous;
//! nothing is retried and user-callback errors pass through unchanged.

use std::fmt;

/// Result type alias for model and rewrite operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for relation resolution and query rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Relation is not one of the supported kinds
    UnsupportedRelation(String),
    /// A relation key resolved to more than one physical column
    CompositeKey(String),
    /// A relation path segment carries a table alias directive
    AliasNotSupported(String),
    /// Relation name is not defined on the model
    Relationship(String),
    /// Model or relationship metadata is inconsistent
    Configuration(String),
    /// Error raised inside a user-supplied constraint callback
    Constraint(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnsupportedRelation(msg) => write!(f, "Unsupported relation: {}", msg),
            ModelError::CompositeKey(msg) => {
                write!(f, "Multi-column relationships are not supported: {}", msg)
            }
            ModelError::AliasNotSupported(segment) => {
                write!(f, "Table aliases are not supported: '{}'", segment)
            }
            ModelError::Relationship(msg) => write!(f, "Relationship error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::Constraint(msg) => write!(f, "Constraint error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}
