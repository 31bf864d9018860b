//! Configuration loading and management
//!
//! Record types are declared in YAML:
//!
//! ```yaml
//! types:
//!   person:
//!     fields:
//!       name: { title: Name, type: text, required: true, max_length: 80 }
//!       email: { title: Email, type: email }
//!   content:
//!     polymorphic: true
//!     subtypes:
//!       article:
//!         fields:
//!           title: { title: Title, type: text, required: true }
//!       block:
//!         standalone: false
//!         fields:
//!           body: { title: Body, type: text }
//! ```

use crate::core::error::ConfigError;
use crate::core::schema::TypeSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Record type declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypesConfig {
    /// Schemas keyed by type name
    #[serde(default)]
    pub types: IndexMap<String, TypeSchema>,
}

impl TypesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Merge several configurations
    ///
    /// A type declared in more than one configuration takes the schema of the
    /// last one.
    pub fn merge(configs: Vec<TypesConfig>) -> Self {
        let mut merged = TypesConfig::default();
        for config in configs {
            for (name, schema) in config.types {
                if merged.types.contains_key(&name) {
                    tracing::debug!(type_name = %name, "type redeclared, later declaration wins");
                }
                merged.types.insert(name, schema);
            }
        }
        merged
    }

    /// Get the schema of a type
    pub fn get(&self, type_name: &str) -> Option<&TypeSchema> {
        self.types.get(type_name)
    }

    /// Reject declarations the engine cannot interpret
    fn check(&self) -> Result<(), ConfigError> {
        for (name, schema) in &self.types {
            check_schema(name, schema)?;
        }
        Ok(())
    }
}

fn check_schema(name: &str, schema: &TypeSchema) -> Result<(), ConfigError> {
    if schema.polymorphic && schema.subtypes.is_empty() {
        return Err(ConfigError::InvalidType {
            type_name: name.to_string(),
            message: "polymorphic types must declare subtypes".to_string(),
        });
    }

    if !schema.polymorphic && !schema.subtypes.is_empty() {
        return Err(ConfigError::InvalidType {
            type_name: name.to_string(),
            message: "subtypes require polymorphic: true".to_string(),
        });
    }

    for (subtype_name, subtype) in &schema.subtypes {
        if subtype.polymorphic {
            return Err(ConfigError::InvalidType {
                type_name: format!("{}.{}", name, subtype_name),
                message: "subtypes cannot be polymorphic".to_string(),
            });
        }
    }

    Ok(())
}
