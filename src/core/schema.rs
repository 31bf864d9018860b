//! Declarative type schemas
//!
//! A [`TypeSchema`] describes which fields a record of a given type may carry
//! and which field type validates each of them. Polymorphic schemas carry one
//! nested schema per subtype, selected by the record's `type` discriminator.

use super::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field declarations keyed by field name, in declaration order
pub type FieldMap = IndexMap<String, FieldSettings>;

/// Schema of a record type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Whether records of this type may be persisted on their own
    ///
    /// Only an explicit `false` marks the type as validate-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,

    /// Whether the record's `type` field selects one of `subtypes`
    #[serde(default)]
    pub polymorphic: bool,

    /// Declared fields, `None` for a fieldless type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,

    /// Nested schemas of a polymorphic type
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub subtypes: IndexMap<String, TypeSchema>,
}

impl TypeSchema {
    /// Create a schema declaring the given fields
    pub fn with_fields(fields: FieldMap) -> Self {
        Self {
            fields: Some(fields),
            ..Self::default()
        }
    }

    /// Create a polymorphic schema over the given subtypes
    pub fn polymorphic(subtypes: IndexMap<String, TypeSchema>) -> Self {
        Self {
            polymorphic: true,
            subtypes,
            ..Self::default()
        }
    }

    /// Mark the schema as standalone or validate-only
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = Some(standalone);
        self
    }

    /// `false` only when the schema explicitly opts out of standalone persistence
    pub fn is_standalone(&self) -> bool {
        self.standalone != Some(false)
    }

    /// Whether any record of this type can be persisted
    ///
    /// False when the type opts out, or when every subtype of a polymorphic
    /// type does.
    pub fn stores_records(&self) -> bool {
        self.is_standalone()
            && (!self.polymorphic || self.subtypes.values().any(TypeSchema::is_standalone))
    }

    /// A non-polymorphic schema without any `fields` declaration
    pub fn is_fieldless(&self) -> bool {
        !self.polymorphic && self.fields.is_none()
    }

    /// Names of the declared fields, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|fields| fields.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Settings of a single declared field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Human-readable label used in messages
    #[serde(default)]
    pub title: String,

    /// Identifier of the field type validating this field
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    /// Field-type specific options (`max_length`, `min`, `format`, ...)
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl FieldSettings {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Label for messages about field `name`, its title when set
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        if self.title.is_empty() { name } else { &self.title }
    }
}

/// A field's settings paired with its name for one validation call
///
/// Built per dispatch so the shared schema is never annotated in place.
#[derive(Debug, Clone)]
pub struct FieldContext {
    pub name: String,
    pub settings: FieldSettings,
}

impl FieldContext {
    pub fn new(name: impl Into<String>, settings: &FieldSettings) -> Self {
        Self {
            name: name.into(),
            settings: settings.clone(),
        }
    }

    /// Label for messages, falling back to the field name
    pub fn label(&self) -> &str {
        self.settings.label(&self.name)
    }

    /// The value of this field in `record`
    pub fn value<'r>(&self, record: &'r Record) -> Option<&'r Value> {
        record.get(&self.name)
    }

    /// A type-specific option
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.settings.options.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_fieldless_schema() {
        let schema: TypeSchema = serde_json::from_value(json!({"polymorphic": false})).unwrap();
        assert!(schema.is_fieldless());
        assert!(schema.is_standalone());
        assert!(schema.subtypes.is_empty());
    }

    #[test]
    fn test_deserialize_field_settings_with_options() {
        let schema: TypeSchema = serde_json::from_value(json!({
            "fields": {
                "name": {"title": "Name", "type": "text", "required": true, "max_length": 20}
            }
        }))
        .unwrap();

        let name = &schema.fields.as_ref().unwrap()["name"];
        assert_eq!(name.title, "Name");
        assert_eq!(name.field_type, "text");
        assert!(name.required);
        assert_eq!(name.options.get("max_length"), Some(&json!(20)));
    }

    #[test]
    fn test_deserialize_polymorphic_schema() {
        let schema: TypeSchema = serde_json::from_value(json!({
            "polymorphic": true,
            "subtypes": {
                "article": {"fields": {"title": {"type": "string"}}},
                "page": {"standalone": false}
            }
        }))
        .unwrap();

        assert!(schema.polymorphic);
        assert!(!schema.is_fieldless());
        assert_eq!(schema.subtypes["article"].field_names(), vec!["title"]);
        assert!(!schema.subtypes["page"].is_standalone());
    }

    #[test]
    fn test_field_names_preserve_declaration_order() {
        let mut fields = FieldMap::new();
        fields.insert("zeta".into(), FieldSettings::new("text"));
        fields.insert("alpha".into(), FieldSettings::new("text"));
        fields.insert("mid".into(), FieldSettings::new("text"));

        let schema = TypeSchema::with_fields(fields);
        assert_eq!(schema.field_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_standalone_only_false_when_explicit() {
        assert!(TypeSchema::default().is_standalone());
        assert!(TypeSchema::default().standalone(true).is_standalone());
        assert!(!TypeSchema::default().standalone(false).is_standalone());
    }

    #[test]
    fn test_stores_records() {
        assert!(TypeSchema::default().stores_records());
        assert!(!TypeSchema::default().standalone(false).stores_records());

        let mut subtypes = IndexMap::new();
        subtypes.insert("block".to_string(), TypeSchema::default().standalone(false));
        assert!(!TypeSchema::polymorphic(subtypes.clone()).stores_records());

        subtypes.insert("page".to_string(), TypeSchema::default());
        assert!(TypeSchema::polymorphic(subtypes.clone()).stores_records());
        assert!(!TypeSchema::polymorphic(subtypes).standalone(false).stores_records());
    }

    #[test]
    fn test_field_settings_label() {
        assert_eq!(FieldSettings::new("text").label("slug"), "slug");
        assert_eq!(FieldSettings::new("text").title("Slug").label("slug"), "Slug");
    }

    #[test]
    fn test_field_context_label_falls_back_to_name() {
        let untitled = FieldContext::new("slug", &FieldSettings::new("text"));
        assert_eq!(untitled.label(), "slug");

        let titled = FieldContext::new("slug", &FieldSettings::new("text").title("Slug"));
        assert_eq!(titled.label(), "Slug");
    }

    #[test]
    fn test_field_context_is_independent_copy() {
        let settings = FieldSettings::new("text").title("Name");
        let mut context = FieldContext::new("name", &settings);
        context.settings.title = "Changed".into();
        assert_eq!(settings.title, "Name");
    }
}
