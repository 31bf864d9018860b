//! Field types shipped with the crate
//!
//! | name      | validates                          | options                                       |
//! |-----------|------------------------------------|-----------------------------------------------|
//! | `text`    | strings (alias `string`)           | `min_length`, `max_length`, `pattern`, `allowed` |
//! | `number`  | numbers                            | `min`, `max`, `integer`                       |
//! | `boolean` | booleans                           |                                               |
//! | `email`   | email addresses                    |                                               |
//! | `date`    | dates stored as text               | `format`                                      |
//! | `json`    | nothing, any value is accepted     |                                               |

pub mod builtin;

pub use builtin::{BooleanField, DateField, EmailField, JsonField, NumberField, TextField};

use crate::core::field_type::{FieldType, FieldTypes};
use std::collections::HashMap;
use std::sync::Arc;

impl FieldTypes {
    /// Create a registry holding every built-in field type
    pub fn with_builtins() -> Self {
        let text: Arc<dyn FieldType> = Arc::new(TextField);

        let builtins: [Arc<dyn FieldType>; 6] = [
            text.clone(),
            Arc::new(NumberField),
            Arc::new(BooleanField),
            Arc::new(EmailField),
            Arc::new(DateField),
            Arc::new(JsonField),
        ];

        let mut types: HashMap<String, Arc<dyn FieldType>> = builtins
            .into_iter()
            .map(|field_type| (field_type.name().to_string(), field_type))
            .collect();
        types.insert("string".to_string(), text);

        Self::from_types(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field_type::FieldTypeRegistry;

    #[tokio::test]
    async fn test_with_builtins_registers_all_types() {
        let registry = FieldTypes::with_builtins();
        for name in ["text", "string", "number", "boolean", "email", "date", "json"] {
            assert!(
                registry.load(name).await.unwrap().is_some(),
                "{} should be registered",
                name
            );
        }
    }

    #[test]
    fn test_with_builtins_names() {
        let mut names = FieldTypes::with_builtins().names();
        names.sort();
        assert_eq!(
            names,
            vec!["boolean", "date", "email", "json", "number", "string", "text"]
        );
    }

    #[tokio::test]
    async fn test_builtins_registry_accepts_more_types() {
        let registry = FieldTypes::with_builtins();
        registry.register_as("alias", Arc::new(JsonField)).unwrap();
        assert!(registry.load("alias").await.unwrap().is_some());
        assert!(registry.load("text").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_string_is_alias_of_text() {
        let registry = FieldTypes::with_builtins();
        let string = registry.load("string").await.unwrap().unwrap();
        assert_eq!(string.name(), "text");
    }
}
