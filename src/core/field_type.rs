//! Field-type plugins and the registry resolving them
//!
//! Each declared field names a field type (`text`, `number`, ...). The
//! validation engine looks the type up in a [`FieldTypeRegistry`] and, if the
//! type exposes a [`FieldValidator`], asks it to check the record.

use super::record::Record;
use super::schema::FieldContext;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Outcome of a field check that did not fail at the application level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Valid,
    Invalid(String),
}

impl FieldCheck {
    pub fn invalid(message: impl Into<String>) -> Self {
        FieldCheck::Invalid(message.into())
    }

    /// Build a check from a validator function result
    pub fn from_result(result: std::result::Result<(), String>) -> Self {
        match result {
            Ok(()) => FieldCheck::Valid,
            Err(message) => FieldCheck::Invalid(message),
        }
    }
}

/// Validation capability of a field type
#[async_trait]
pub trait FieldValidator: Send + Sync {
    /// Check the field described by `field` within `record`
    ///
    /// Return `Err` only for application failures; a bad value is reported
    /// as [`FieldCheck::Invalid`].
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck>;
}

/// A pluggable field type
pub trait FieldType: Send + Sync {
    /// Identifier referenced by `FieldSettings::field_type`
    fn name(&self) -> &str;

    /// The validation capability, if this type has one
    ///
    /// Types without a validator accept any value.
    fn validator(&self) -> Option<&dyn FieldValidator> {
        None
    }
}

/// Resolves field-type identifiers to field types
#[async_trait]
pub trait FieldTypeRegistry: Send + Sync {
    /// Load the field type registered under `name`
    ///
    /// `Ok(None)` means nothing is registered under that name. `Err` is an
    /// application failure of the registry itself.
    async fn load(&self, name: &str) -> Result<Option<Arc<dyn FieldType>>>;
}

/// In-memory field type registry
///
/// Uses RwLock so types can be registered after the registry is shared.
#[derive(Clone, Default)]
pub struct FieldTypes {
    types: Arc<RwLock<HashMap<String, Arc<dyn FieldType>>>>,
}

impl FieldTypes {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `types` keyed by the name they answer to
    pub fn from_types(types: HashMap<String, Arc<dyn FieldType>>) -> Self {
        Self {
            types: Arc::new(RwLock::new(types)),
        }
    }

    /// Register a field type under its own name
    pub fn register(&self, field_type: impl FieldType + 'static) -> Result<()> {
        let field_type: Arc<dyn FieldType> = Arc::new(field_type);
        let name = field_type.name().to_string();
        self.register_as(name, field_type)
    }

    /// Register a field type under an explicit name (aliases)
    pub fn register_as(&self, name: impl Into<String>, field_type: Arc<dyn FieldType>) -> Result<()> {
        let mut types = self
            .types
            .write()
            .map_err(|e| anyhow::anyhow!("Failed to acquire write lock: {}", e))?;

        types.insert(name.into(), field_type);
        Ok(())
    }

    /// Names of all registered field types
    pub fn names(&self) -> Vec<String> {
        self.types
            .read()
            .map(|types| types.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FieldTypeRegistry for FieldTypes {
    async fn load(&self, name: &str) -> Result<Option<Arc<dyn FieldType>>> {
        let types = self
            .types
            .read()
            .map_err(|e| anyhow::anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(types.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;

    impl FieldType for Opaque {
        fn name(&self) -> &str {
            "opaque"
        }
    }

    struct AlwaysValid;

    #[async_trait]
    impl FieldValidator for AlwaysValid {
        async fn validate(&self, _: &FieldContext, _: &Record) -> Result<FieldCheck> {
            Ok(FieldCheck::Valid)
        }
    }

    impl FieldType for AlwaysValid {
        fn name(&self) -> &str {
            "valid"
        }

        fn validator(&self) -> Option<&dyn FieldValidator> {
            Some(self)
        }
    }

    #[tokio::test]
    async fn test_load_registered_type() {
        let registry = FieldTypes::new();
        registry.register(AlwaysValid).unwrap();

        let loaded = registry.load("valid").await.unwrap();
        assert!(loaded.is_some());
        assert!(loaded.unwrap().validator().is_some());
    }

    #[tokio::test]
    async fn test_load_unknown_type_is_none() {
        let registry = FieldTypes::new();
        assert!(registry.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_type_without_validator() {
        let registry = FieldTypes::new();
        registry.register(Opaque).unwrap();

        let loaded = registry.load("opaque").await.unwrap().unwrap();
        assert!(loaded.validator().is_none());
    }

    #[tokio::test]
    async fn test_register_alias() {
        let registry = FieldTypes::new();
        registry.register_as("alias", Arc::new(Opaque)).unwrap();

        assert!(registry.load("alias").await.unwrap().is_some());
        assert!(registry.load("opaque").await.unwrap().is_none());
        assert_eq!(registry.names(), vec!["alias".to_string()]);
    }

    #[test]
    fn test_field_check_from_result() {
        assert_eq!(FieldCheck::from_result(Ok(())), FieldCheck::Valid);
        assert_eq!(
            FieldCheck::from_result(Err("bad".into())),
            FieldCheck::invalid("bad")
        );
    }
}
