//! # has-subquery: relationship-existence checks as non-dependent subqueries
//!
//! Rewrites "has a related record" constraints (`has`, `or_has`,
//! `doesnt_have`, `or_doesnt_have`) so the related-table check compiles to
//! `key [NOT] IN (SELECT ...)` instead of a correlated EXISTS subquery.
//! The inner query never references the outer row, so the database can plan
//! and execute it once instead of per row.
//!
//! Relationships are described by [`ModelDefinition`]s registered in a
//! [`relationships::ModelRegistry`]; direct, inverse, many-to-many, through
//! and polymorphic relations are supported, and dot-chained paths nest one
//! subquery per segment.
//!
//! ```
//! use has_subquery::{ModelDefinition, QueryBuilder};
//! use has_subquery::relationships::{
//!     global_registry, ForeignKeyConfig, RelationshipMetadata, RelationshipType,
//! };
//!
//! # fn main() -> has_subquery::ModelResult<()> {
//! global_registry().register(ModelDefinition::new("Country", "countries"))?;
//! global_registry().register(
//!     ModelDefinition::new("City", "cities").with_relationship(RelationshipMetadata::new(
//!         RelationshipType::BelongsTo,
//!         "country",
//!         "Country",
//!         ForeignKeyConfig::simple("country_id"),
//!     )),
//! )?;
//!
//! let query = global_registry().query("City")?.has("country", vec![])?;
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT * FROM cities WHERE cities.country_id IN (SELECT countries.id FROM countries)"
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod query;
pub mod relationships;

pub use error::{ModelError, ModelResult};
pub use model::ModelDefinition;
pub use query::{QueryBuilder, RelationPath};
pub use relationships::Constraint;
