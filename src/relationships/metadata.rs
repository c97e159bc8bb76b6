//! Relationship Metadata - definitions describing how two models relate

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Defines the type of relationship between models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// One-to-one relationship (hasOne)
    HasOne,
    /// One-to-many relationship (hasMany)
    HasMany,
    /// Many-to-one relationship (belongsTo)
    BelongsTo,
    /// Many-to-many relationship through a pivot table
    ManyToMany,
    /// One-to-many traversing one intermediate table
    HasManyThrough,
    /// Polymorphic one-to-one relationship
    MorphOne,
    /// Polymorphic one-to-many relationship
    MorphMany,
    /// Inverse polymorphic relationship
    MorphTo,
    /// Polymorphic many-to-many through a pivot table
    MorphToMany,
}

impl RelationshipType {
    /// Returns true if this relationship type is polymorphic
    pub fn is_polymorphic(self) -> bool {
        matches!(
            self,
            Self::MorphOne | Self::MorphMany | Self::MorphTo | Self::MorphToMany
        )
    }

    /// Returns true if this relationship type requires a pivot table
    pub fn requires_pivot(self) -> bool {
        matches!(self, Self::ManyToMany | Self::MorphToMany)
    }
}

/// Relationship metadata carrying the key configuration for one relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// The type of relationship
    pub relationship_type: RelationshipType,

    /// Name of the relationship (field name on the model)
    pub name: String,

    /// The related model's registered name. Empty only for a MorphTo
    /// relation whose owner model is not pinned.
    pub related_model: String,

    /// Foreign key configuration. Lives on the related table for has-side
    /// relations and on this model's own table for belongs-to relations.
    pub foreign_key: ForeignKeyConfig,

    /// Key on the owning side of the relation: the parent key for has-side
    /// relations, the owner key for belongs-to relations. Defaults to "id".
    pub local_key: String,

    /// Pivot table configuration for many-to-many relationships
    pub pivot_config: Option<PivotConfig>,

    /// Polymorphic configuration
    pub polymorphic_config: Option<PolymorphicConfig>,

    /// Intermediate-table configuration for through relationships
    pub through_config: Option<ThroughConfig>,
}

impl RelationshipMetadata {
    /// Create a new RelationshipMetadata instance
    pub fn new(
        relationship_type: RelationshipType,
        name: &str,
        related_model: &str,
        foreign_key: ForeignKeyConfig,
    ) -> Self {
        Self {
            relationship_type,
            name: name.to_string(),
            related_model: related_model.to_string(),
            foreign_key,
            local_key: "id".to_string(),
            pivot_config: None,
            polymorphic_config: None,
            through_config: None,
        }
    }

    /// Set the key on the owning side of the relation
    pub fn with_local_key(mut self, local_key: &str) -> Self {
        self.local_key = local_key.to_string();
        self
    }

    /// Set pivot table configuration
    pub fn with_pivot(mut self, pivot_config: PivotConfig) -> Self {
        self.pivot_config = Some(pivot_config);
        self
    }

    /// Set polymorphic configuration
    pub fn with_polymorphic(mut self, polymorphic_config: PolymorphicConfig) -> Self {
        self.polymorphic_config = Some(polymorphic_config);
        self
    }

    /// Set intermediate-table configuration
    pub fn with_through(mut self, through_config: ThroughConfig) -> Self {
        self.through_config = Some(through_config);
        self
    }

    /// Validate the relationship metadata for consistency
    pub fn validate(&self) -> ModelResult<()> {
        if self.relationship_type.requires_pivot() && self.pivot_config.is_none() {
            return Err(ModelError::Configuration(format!(
                "Relationship '{}' of type {:?} requires pivot configuration",
                self.name, self.relationship_type
            )));
        }

        if self.relationship_type.is_polymorphic() && self.polymorphic_config.is_none() {
            return Err(ModelError::Configuration(format!(
                "Relationship '{}' of type {:?} requires polymorphic configuration",
                self.name, self.relationship_type
            )));
        }

        if self.relationship_type == RelationshipType::HasManyThrough
            && self.through_config.is_none()
        {
            return Err(ModelError::Configuration(format!(
                "Relationship '{}' of type HasManyThrough requires through configuration",
                self.name
            )));
        }

        if self.related_model.is_empty() && self.relationship_type != RelationshipType::MorphTo {
            return Err(ModelError::Configuration(format!(
                "Relationship '{}' must name a related model",
                self.name
            )));
        }

        self.foreign_key.validate()?;

        if let Some(ref pivot) = self.pivot_config {
            pivot.validate()?;
        }

        if let Some(ref poly) = self.polymorphic_config {
            poly.validate()?;
        }

        if let Some(ref through) = self.through_config {
            through.validate()?;
        }

        Ok(())
    }
}

/// Foreign key configuration for relationships
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyConfig {
    /// The foreign key column name(s)
    pub columns: Vec<String>,

    /// Whether this is a composite foreign key
    pub is_composite: bool,
}

impl ForeignKeyConfig {
    /// Create a simple foreign key configuration
    pub fn simple(column: &str) -> Self {
        Self {
            columns: vec![column.to_string()],
            is_composite: false,
        }
    }

    /// Create a composite foreign key configuration
    pub fn composite(columns: Vec<&str>) -> Self {
        Self {
            columns: columns.into_iter().map(str::to_string).collect(),
            is_composite: true,
        }
    }

    /// Get the primary foreign key column (first in composite keys)
    pub fn primary_column(&self) -> &str {
        self.columns.first().map(|s| s.as_str()).unwrap_or("")
    }

    /// Validate the foreign key configuration
    pub fn validate(&self) -> ModelResult<()> {
        if self.columns.is_empty() {
            return Err(ModelError::Configuration(
                "Foreign key configuration must have at least one column".to_string(),
            ));
        }

        if self.is_composite && self.columns.len() < 2 {
            return Err(ModelError::Configuration(
                "Composite foreign key must have at least 2 columns".to_string(),
            ));
        }

        Ok(())
    }
}

/// Pivot table configuration for many-to-many relationships
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotConfig {
    /// The pivot table name
    pub table: String,

    /// The pivot column referencing the local model
    pub local_key: String,

    /// The pivot column referencing the related model
    pub foreign_key: String,
}

impl PivotConfig {
    /// Create a new pivot configuration
    pub fn new(table: &str, local_key: &str, foreign_key: &str) -> Self {
        Self {
            table: table.to_string(),
            local_key: local_key.to_string(),
            foreign_key: foreign_key.to_string(),
        }
    }

    /// Qualify a column with the pivot table
    pub fn qualified_column(&self, column: &str) -> String {
        format!("{}.{}", self.table, column)
    }

    /// Validate the pivot configuration
    pub fn validate(&self) -> ModelResult<()> {
        if self.table.is_empty() {
            return Err(ModelError::Configuration(
                "Pivot table name cannot be empty".to_string(),
            ));
        }

        if self.local_key.is_empty() || self.foreign_key.is_empty() {
            return Err(ModelError::Configuration(
                "Pivot keys cannot be empty".to_string(),
            ));
        }

        if self.local_key == self.foreign_key {
            return Err(ModelError::Configuration(
                "Pivot local key and foreign key must be different".to_string(),
            ));
        }

        Ok(())
    }
}

/// Polymorphic relationship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolymorphicConfig {
    /// The name/namespace for this polymorphic relationship
    pub name: String,

    /// The morph type column name (stores the model alias)
    pub type_column: String,

    /// The morph id column name (stores the foreign key)
    pub id_column: String,
}

impl PolymorphicConfig {
    /// Create a new polymorphic configuration
    pub fn new(name: &str, type_column: &str, id_column: &str) -> Self {
        Self {
            name: name.to_string(),
            type_column: type_column.to_string(),
            id_column: id_column.to_string(),
        }
    }

    /// Validate the polymorphic configuration
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.is_empty() {
            return Err(ModelError::Configuration(
                "Polymorphic relationship name cannot be empty".to_string(),
            ));
        }

        if self.type_column.is_empty() || self.id_column.is_empty() {
            return Err(ModelError::Configuration(
                "Polymorphic columns cannot be empty".to_string(),
            ));
        }

        if self.type_column == self.id_column {
            return Err(ModelError::Configuration(
                "Polymorphic type column and ID column must be different".to_string(),
            ));
        }

        Ok(())
    }
}

/// Intermediate-table configuration for through relationships
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughConfig {
    /// The intermediate table name
    pub through_table: String,

    /// Column on the intermediate table referencing the parent
    pub first_key: String,

    /// Column on the far table referencing the intermediate table
    pub second_key: String,

    /// Key on the parent the intermediate table points at
    pub local_key: String,

    /// Key on the intermediate table the far table points at
    pub second_local_key: String,
}

impl ThroughConfig {
    /// Create a new through configuration with "id" local keys
    pub fn new(through_table: &str, first_key: &str, second_key: &str) -> Self {
        Self {
            through_table: through_table.to_string(),
            first_key: first_key.to_string(),
            second_key: second_key.to_string(),
            local_key: "id".to_string(),
            second_local_key: "id".to_string(),
        }
    }

    /// Qualify a column with the intermediate table
    pub fn qualified_column(&self, column: &str) -> String {
        format!("{}.{}", self.through_table, column)
    }

    /// Validate the through configuration
    pub fn validate(&self) -> ModelResult<()> {
        if self.through_table.is_empty() {
            return Err(ModelError::Configuration(
                "Through table name cannot be empty".to_string(),
            ));
        }

        if self.first_key.is_empty() || self.second_key.is_empty() {
            return Err(ModelError::Configuration(
                "Through keys cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_properties() {
        assert!(RelationshipType::MorphOne.is_polymorphic());
        assert!(RelationshipType::MorphMany.is_polymorphic());
        assert!(RelationshipType::MorphTo.is_polymorphic());
        assert!(RelationshipType::MorphToMany.is_polymorphic());
        assert!(!RelationshipType::HasOne.is_polymorphic());

        assert!(RelationshipType::ManyToMany.requires_pivot());
        assert!(RelationshipType::MorphToMany.requires_pivot());
        assert!(!RelationshipType::HasMany.requires_pivot());
    }

    #[test]
    fn test_metadata_validation() {
        let valid = RelationshipMetadata::new(
            RelationshipType::HasMany,
            "posts",
            "Post",
            ForeignKeyConfig::simple("user_id"),
        );
        assert!(valid.validate().is_ok());

        // Many-to-many without pivot config
        let invalid = RelationshipMetadata::new(
            RelationshipType::ManyToMany,
            "roles",
            "Role",
            ForeignKeyConfig::simple("role_id"),
        );
        assert!(invalid.validate().is_err());

        // Through without through config
        let invalid = RelationshipMetadata::new(
            RelationshipType::HasManyThrough,
            "comments",
            "Comment",
            ForeignKeyConfig::simple("post_id"),
        );
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_morph_to_may_leave_related_model_open() {
        let pinned = RelationshipMetadata::new(
            RelationshipType::MorphTo,
            "commentable",
            "Post",
            ForeignKeyConfig::simple("commentable_id"),
        )
        .with_polymorphic(PolymorphicConfig::new(
            "commentable",
            "commentable_type",
            "commentable_id",
        ));
        assert!(pinned.validate().is_ok());

        let bare = RelationshipMetadata::new(
            RelationshipType::MorphTo,
            "commentable",
            "",
            ForeignKeyConfig::simple("commentable_id"),
        )
        .with_polymorphic(PolymorphicConfig::new(
            "commentable",
            "commentable_type",
            "commentable_id",
        ));
        assert!(bare.validate().is_ok());
    }

    #[test]
    fn test_foreign_key_config() {
        let simple = ForeignKeyConfig::simple("user_id");
        assert!(!simple.is_composite);
        assert_eq!(simple.primary_column(), "user_id");
        assert!(simple.validate().is_ok());

        let composite = ForeignKeyConfig::composite(vec!["user_id", "company_id"]);
        assert!(composite.is_composite);
        assert!(composite.validate().is_ok());
    }

    #[test]
    fn test_pivot_config_validation() {
        let pivot = PivotConfig::new("tag_references", "post_id", "tag_id");
        assert!(pivot.validate().is_ok());
        assert_eq!(pivot.qualified_column("post_id"), "tag_references.post_id");

        let broken = PivotConfig::new("tag_references", "tag_id", "tag_id");
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_polymorphic_config_validation() {
        let poly = PolymorphicConfig::new("commentable", "commentable_type", "commentable_id");
        assert!(poly.validate().is_ok());

        let broken = PolymorphicConfig::new("commentable", "commentable_id", "commentable_id");
        assert!(broken.validate().is_err());
    }
}
