//! Relationship system - metadata, resolution, key extraction and constraints

pub mod constraint;
pub mod keys;
pub mod metadata;
pub mod registry;
pub mod relation;

pub use constraint::{Constraint, ConstraintTarget, DeclaredView, SelectedView};
pub use keys::{MorphKeys, RelationKeys, RelationKind};
pub use metadata::{
    ForeignKeyConfig, PivotConfig, PolymorphicConfig, RelationshipMetadata, RelationshipType,
    ThroughConfig,
};
pub use registry::{global_registry, ModelRegistry};
pub use relation::Relation;
