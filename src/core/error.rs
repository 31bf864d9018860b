//! Typed error handling for schema validation and persistence
//!
//! Two kinds of failure flow out of the engine:
//!
//! - **Validation errors** are expected outcomes. They are returned as plain
//!   messages (`Vec<String>`) so callers can re-present a record with them.
//! - **Application errors** ([`ModelError`]) are infrastructure failures:
//!   a field type that cannot be loaded, a handler that fails internally, a
//!   store that rejects a save. They abort the current operation.
//!
//! # Example
//!
//! ```rust,ignore
//! match model.validate_and_save(record).await {
//!     Ok(SaveOutcome::Saved(stored)) => println!("saved {}", stored.id),
//!     Ok(SaveOutcome::Invalid { errors, .. }) => println!("rejected: {:?}", errors),
//!     Ok(SaveOutcome::Validated(_)) => println!("valid, not persisted"),
//!     Err(ModelError::Storage { message, .. }) => eprintln!("store failed: {}", message),
//!     Err(e) => eprintln!("application error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Application-level failure of a model operation
#[derive(Debug, Error)]
pub enum ModelError {
    /// The field-type registry failed to load a type
    #[error("Failed to load field type '{field_type}': {message}")]
    FieldTypeLoad { field_type: String, message: String },

    /// A field-type handler failed while validating a field
    #[error("Field '{field}' could not be validated: {message}")]
    FieldValidation { field: String, message: String },

    /// The record store failed to persist or read records
    #[error("Storage error for {type_name}: {message}")]
    Storage { type_name: String, message: String },

    /// No model is registered for the requested type
    #[error("Unknown record type: {type_name}")]
    UnknownType { type_name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal failure (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ModelError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ModelError::FieldTypeLoad { .. } => "FIELD_TYPE_LOAD_ERROR",
            ModelError::FieldValidation { .. } => "FIELD_VALIDATION_ERROR",
            ModelError::Storage { .. } => "STORAGE_ERROR",
            ModelError::UnknownType { .. } => "UNKNOWN_RECORD_TYPE",
            ModelError::Config(_) => "CONFIG_ERROR",
            ModelError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Errors raised while loading type configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read configuration: {message}")]
    IoError { message: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid type '{type_name}': {message}")]
    InvalidType { type_name: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_load_display() {
        let err = ModelError::FieldTypeLoad {
            field_type: "text".to_string(),
            message: "registry offline".to_string(),
        };
        assert!(err.to_string().contains("text"));
        assert!(err.to_string().contains("registry offline"));
        assert_eq!(err.error_code(), "FIELD_TYPE_LOAD_ERROR");
    }

    #[test]
    fn test_storage_error_display() {
        let err = ModelError::Storage {
            type_name: "article".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Storage error for article: disk full");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ModelError = ConfigError::FileNotFound {
            path: "/etc/types.yaml".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("/etc/types.yaml"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ConfigError::ParseError {
            file: Some("types.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse configuration: bad indent");
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }
}
