//! Catalog of models built from type configuration

use super::error::{ModelError, ModelResult};
use super::field_type::FieldTypeRegistry;
use super::model::Model;
use super::store::RecordStore;
use crate::config::TypesConfig;
use indexmap::IndexMap;
use std::sync::Arc;

/// All models of an application, keyed by type name
#[derive(Clone, Default)]
pub struct Catalog {
    models: IndexMap<String, Arc<Model>>,
}

impl Catalog {
    /// Build one model per configured type, sharing the registry and store
    pub fn from_config(
        config: &TypesConfig,
        registry: Arc<dyn FieldTypeRegistry>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let models = config
            .types
            .iter()
            .map(|(name, schema)| {
                let model = Model::new(name.clone(), schema.clone(), registry.clone(), store.clone());
                (name.clone(), Arc::new(model))
            })
            .collect();

        Self { models }
    }

    /// Add or replace a model
    pub fn insert(&mut self, model: Model) {
        self.models.insert(model.type_name().to_string(), Arc::new(model));
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<Model>> {
        self.models.get(type_name)
    }

    /// Get a model or fail with [`ModelError::UnknownType`]
    pub fn model(&self, type_name: &str) -> ModelResult<&Arc<Model>> {
        self.get(type_name).ok_or_else(|| ModelError::UnknownType {
            type_name: type_name.to_string(),
        })
    }

    /// Registered type names, in declaration order
    pub fn type_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.values()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
