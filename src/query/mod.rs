//! Query Builder - SELECT builder and the subquery rewrite operations

pub mod builder;
pub mod has;
pub mod joins;
pub mod ordering;
pub mod path;
pub mod scopes;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use path::RelationPath;
pub use types::{Connector, JoinClause, JoinType, OrderDirection, Predicate, QueryOperator, WhereCondition};
