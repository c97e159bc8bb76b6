//! Model definitions - runtime metadata the rewriter resolves relations against

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::relationships::metadata::RelationshipMetadata;

/// Runtime description of a model: its table, keys, morph alias,
/// soft-delete column and named relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model name, the key it is registered under (e.g. "Post")
    pub name: String,

    /// Backing table name
    pub table: String,

    /// Primary key column, defaults to "id"
    pub primary_key: String,

    /// Alias stored in morph type columns referring to this model
    pub morph_alias: String,

    /// Column driving soft-delete scoping, when the model uses it
    pub soft_delete_column: Option<String>,

    /// Relationships keyed by name
    pub relationships: HashMap<String, RelationshipMetadata>,
}

impl ModelDefinition {
    /// Create a model definition for a table
    pub fn new(name: &str, table: &str) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            primary_key: "id".to_string(),
            morph_alias: name.to_lowercase(),
            soft_delete_column: None,
            relationships: HashMap::new(),
        }
    }

    /// Set the primary key column
    pub fn with_primary_key(mut self, primary_key: &str) -> Self {
        self.primary_key = primary_key.to_string();
        self
    }

    /// Set the morph alias stored in discriminator columns
    pub fn with_morph_alias(mut self, alias: &str) -> Self {
        self.morph_alias = alias.to_string();
        self
    }

    /// Enable soft deletes on the conventional "deleted_at" column
    pub fn with_soft_deletes(self) -> Self {
        self.with_soft_delete_column("deleted_at")
    }

    /// Enable soft deletes on a custom column
    pub fn with_soft_delete_column(mut self, column: &str) -> Self {
        self.soft_delete_column = Some(column.to_string());
        self
    }

    /// Add a relationship, keyed by its name
    pub fn with_relationship(mut self, metadata: RelationshipMetadata) -> Self {
        self.relationships.insert(metadata.name.clone(), metadata);
        self
    }

    /// Look up a relationship by name
    pub fn relationship(&self, name: &str) -> Option<&RelationshipMetadata> {
        self.relationships.get(name)
    }

    /// Qualify a column with this model's table
    pub fn qualified_column(&self, column: &str) -> String {
        format!("{}.{}", self.table, column)
    }

    /// The table-qualified primary key
    pub fn qualified_key(&self) -> String {
        self.qualified_column(&self.primary_key)
    }

    /// The table-qualified soft-delete column, when soft deletes are enabled
    pub fn qualified_soft_delete_column(&self) -> Option<String> {
        self.soft_delete_column
            .as_deref()
            .map(|column| self.qualified_column(column))
    }
}
