//! Relation key resolution
//!
//! Classifies a relation instance into one of the supported kinds and
//! extracts the two key columns an IN-subquery rewrite needs: the key on
//! the outer table and the key the inner query must select. Polymorphic
//! kinds also carry the discriminator column and the alias it must equal.

use crate::error::{ModelError, ModelResult};
use crate::relationships::metadata::{ForeignKeyConfig, RelationshipType};
use crate::relationships::relation::Relation;

/// The closed set of relation kinds the rewrite supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasOneOrMany,
    BelongsTo,
    BelongsToMany,
    HasManyThrough,
    MorphOneOrMany,
    MorphTo,
    MorphToMany,
}

/// Discriminator column and the alias value it must match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphKeys {
    pub type_column: String,
    pub alias: String,
}

/// The key columns for one relation, both fully table-qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationKeys {
    pub kind: RelationKind,
    /// Key on the outer table the membership test filters
    pub source_key: String,
    /// Key the inner query selects
    pub related_key: String,
    /// Present only for polymorphic kinds
    pub morph: Option<MorphKeys>,
}

impl RelationKeys {
    /// Resolve the keys for a relation instance.
    ///
    /// Fails with `CompositeKey` when a key spans more than one physical
    /// column; a partial match on the first column would silently filter
    /// wrong, so composite relations are refused outright.
    pub fn resolve(relation: &Relation) -> ModelResult<Self> {
        let metadata = relation.metadata();
        let parent = relation.parent();
        let related = relation.related();

        let keys = match metadata.relationship_type {
            RelationshipType::HasOne | RelationshipType::HasMany => Self {
                kind: RelationKind::HasOneOrMany,
                source_key: parent.qualified_column(&metadata.local_key),
                related_key: related
                    .qualified_column(single_column(&metadata.foreign_key, &metadata.name)?),
                morph: None,
            },
            RelationshipType::MorphOne | RelationshipType::MorphMany => {
                let poly = polymorphic_config(relation)?;
                Self {
                    kind: RelationKind::MorphOneOrMany,
                    source_key: parent.qualified_column(&metadata.local_key),
                    related_key: related.qualified_column(&poly.id_column),
                    morph: Some(MorphKeys {
                        type_column: related.qualified_column(&poly.type_column),
                        alias: parent.morph_alias.clone(),
                    }),
                }
            }
            RelationshipType::BelongsTo => Self {
                kind: RelationKind::BelongsTo,
                source_key: parent
                    .qualified_column(single_column(&metadata.foreign_key, &metadata.name)?),
                related_key: related.qualified_column(&metadata.local_key),
                morph: None,
            },
            RelationshipType::MorphTo => {
                let poly = polymorphic_config(relation)?;
                Self {
                    kind: RelationKind::MorphTo,
                    source_key: parent.qualified_column(&poly.id_column),
                    related_key: related.qualified_column(&metadata.local_key),
                    morph: Some(MorphKeys {
                        type_column: parent.qualified_column(&poly.type_column),
                        alias: related.morph_alias.clone(),
                    }),
                }
            }
            RelationshipType::ManyToMany => {
                let pivot = pivot_config(relation)?;
                Self {
                    kind: RelationKind::BelongsToMany,
                    source_key: parent.qualified_column(&metadata.local_key),
                    related_key: pivot.qualified_column(&pivot.local_key),
                    morph: None,
                }
            }
            RelationshipType::MorphToMany => {
                let pivot = pivot_config(relation)?;
                let poly = polymorphic_config(relation)?;
                Self {
                    kind: RelationKind::MorphToMany,
                    source_key: parent.qualified_column(&metadata.local_key),
                    related_key: pivot.qualified_column(&pivot.local_key),
                    morph: Some(MorphKeys {
                        type_column: pivot.qualified_column(&poly.type_column),
                        alias: parent.morph_alias.clone(),
                    }),
                }
            }
            RelationshipType::HasManyThrough => {
                let through = metadata.through_config.as_ref().ok_or_else(|| {
                    ModelError::Configuration(format!(
                        "Relationship '{}' is missing through configuration",
                        metadata.name
                    ))
                })?;
                Self {
                    kind: RelationKind::HasManyThrough,
                    source_key: parent.qualified_column(&through.local_key),
                    related_key: through.qualified_column(&through.first_key),
                    morph: None,
                }
            }
        };

        tracing::trace!(
            "Resolved keys for '{}': {:?}, {} -> {}",
            metadata.name,
            keys.kind,
            keys.source_key,
            keys.related_key
        );

        Ok(keys)
    }

    /// Whether the discriminator filters rows of the inner query
    pub fn morph_constrains_related(&self) -> bool {
        self.morph.is_some() && self.kind != RelationKind::MorphTo
    }

    /// Whether the discriminator filters rows of the outer query
    pub fn morph_constrains_source(&self) -> bool {
        self.morph.is_some() && self.kind == RelationKind::MorphTo
    }
}

fn single_column<'a>(config: &'a ForeignKeyConfig, relation_name: &str) -> ModelResult<&'a str> {
    if config.is_composite || config.columns.len() != 1 {
        return Err(ModelError::CompositeKey(format!(
            "relation '{}' resolves to columns [{}]",
            relation_name,
            config.columns.join(", ")
        )));
    }
    Ok(config.primary_column())
}

fn polymorphic_config(
    relation: &Relation,
) -> ModelResult<&crate::relationships::metadata::PolymorphicConfig> {
    relation
        .metadata()
        .polymorphic_config
        .as_ref()
        .ok_or_else(|| {
            ModelError::Configuration(format!(
                "Relationship '{}' is missing polymorphic configuration",
                relation.metadata().name
            ))
        })
}

fn pivot_config(relation: &Relation) -> ModelResult<&crate::relationships::metadata::PivotConfig> {
    relation.metadata().pivot_config.as_ref().ok_or_else(|| {
        ModelError::Configuration(format!(
            "Relationship '{}' is missing pivot configuration",
            relation.metadata().name
        ))
    })
}
