//! Model Registry - runtime storage for model definitions
//!
//! Relation resolution needs to hop from a relationship's `related_model`
//! name to that model's own definition (table, keys, scopes, further
//! relationships), so definitions live in a shared registry keyed by name.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{ModelError, ModelResult};
use crate::model::ModelDefinition;
use crate::query::QueryBuilder;

/// Thread-safe registry of model definitions
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Arc<DashMap<String, Arc<ModelDefinition>>>,
}

impl ModelRegistry {
    /// Create a new empty model registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model definition, validating its relationships first.
    /// Re-registering a name replaces the previous definition.
    pub fn register(&self, model: ModelDefinition) -> ModelResult<Arc<ModelDefinition>> {
        for metadata in model.relationships.values() {
            metadata.validate().map_err(|e| {
                ModelError::Configuration(format!(
                    "Validation failed for relationship '{}' in model '{}': {}",
                    metadata.name, model.name, e
                ))
            })?;
        }

        let model = Arc::new(model);
        self.models.insert(model.name.clone(), Arc::clone(&model));
        Ok(model)
    }

    /// Get a model definition by name
    pub fn get(&self, name: &str) -> ModelResult<Arc<ModelDefinition>> {
        self.models
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                ModelError::Configuration(format!("Model '{}' is not registered", name))
            })
    }

    /// Check whether a model is registered
    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Start a query for a registered model, with its default scopes applied
    pub fn query(&self, name: &str) -> ModelResult<QueryBuilder> {
        Ok(QueryBuilder::for_model(self.get(name)?))
    }

    /// Remove all registered models
    pub fn clear(&self) {
        self.models.clear();
    }
}

/// Global registry instance for the application
static GLOBAL_REGISTRY: std::sync::OnceLock<ModelRegistry> = std::sync::OnceLock::new();

/// Get the global model registry
pub fn global_registry() -> &'static ModelRegistry {
    GLOBAL_REGISTRY.get_or_init(ModelRegistry::new)
}
