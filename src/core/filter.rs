//! Record projection onto the fields a schema permits

use super::record::{DISCRIMINATOR, Record};
use super::resolver::resolve_subtype;
use super::schema::TypeSchema;
use std::borrow::Cow;

/// Reduce `record` to the fields permitted by `schema`
///
/// `fields` overrides the declared field set. Fieldless, non-polymorphic
/// schemas return the record itself. Polymorphic schemas always keep the
/// discriminator; when the subtype cannot be resolved and no override is
/// given, only the discriminator is kept.
pub fn project<'r>(record: &'r Record, schema: &TypeSchema, fields: Option<&[&str]>) -> Cow<'r, Record> {
    if schema.is_fieldless() {
        return Cow::Borrowed(record);
    }

    let mut keep: Vec<&str> = match fields {
        Some(fields) => fields.to_vec(),
        None if schema.polymorphic => match resolve_subtype(schema, record) {
            Ok(Some((_, subtype))) => subtype.field_names(),
            _ => Vec::new(),
        },
        None => schema.field_names(),
    };

    if schema.polymorphic && !keep.contains(&DISCRIMINATOR) {
        keep.insert(0, DISCRIMINATOR);
    }

    let projected = keep
        .into_iter()
        .filter_map(|field| {
            record
                .get_key_value(field)
                .map(|(key, value)| (key.clone(), value.clone()))
        })
        .collect();

    Cow::Owned(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{FieldMap, FieldSettings};
    use indexmap::IndexMap;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn fields(names: &[&str]) -> FieldMap {
        names
            .iter()
            .map(|name| (name.to_string(), FieldSettings::new("text")))
            .collect()
    }

    fn article_schema() -> TypeSchema {
        let mut subtypes = IndexMap::new();
        subtypes.insert("article".to_string(), TypeSchema::with_fields(fields(&["title"])));
        subtypes.insert("gallery".to_string(), TypeSchema::with_fields(fields(&["images", "caption"])));
        TypeSchema::polymorphic(subtypes)
    }

    #[test]
    fn test_fieldless_schema_is_identity() {
        let input = record(json!({"a": 1, "b": 2}));
        let projected = project(&input, &TypeSchema::default(), None);

        assert!(matches!(projected, Cow::Borrowed(_)));
        assert_eq!(projected.as_ref(), &input);
    }

    #[test]
    fn test_fieldless_schema_ignores_explicit_fields() {
        let input = record(json!({"a": 1, "b": 2}));
        let projected = project(&input, &TypeSchema::default(), Some(&["a"]));
        assert_eq!(projected.as_ref(), &input);
    }

    #[test]
    fn test_declared_fields_only() {
        let schema = TypeSchema::with_fields(fields(&["name", "email"]));
        let input = record(json!({"name": "Ada", "email": "ada@example.com", "admin": true}));

        let projected = project(&input, &schema, None);
        assert_eq!(
            projected.into_owned(),
            record(json!({"name": "Ada", "email": "ada@example.com"}))
        );
        assert!(input.contains_key("admin"));
    }

    #[test]
    fn test_missing_declared_fields_are_not_added() {
        let schema = TypeSchema::with_fields(fields(&["name", "email"]));
        let input = record(json!({"name": "Ada"}));
        let projected = project(&input, &schema, None);
        assert_eq!(projected.into_owned(), record(json!({"name": "Ada"})));
    }

    #[test]
    fn test_explicit_fields_override_declared() {
        let schema = TypeSchema::with_fields(fields(&["name", "email"]));
        let input = record(json!({"name": "Ada", "email": "ada@example.com", "admin": true}));

        let projected = project(&input, &schema, Some(&["admin"]));
        assert_eq!(projected.into_owned(), record(json!({"admin": true})));
    }

    #[test]
    fn test_polymorphic_keeps_discriminator_and_subtype_fields() {
        let input = record(json!({"type": "article", "title": "Hi", "images": []}));
        let projected = project(&input, &article_schema(), None);
        assert_eq!(
            projected.into_owned(),
            record(json!({"type": "article", "title": "Hi"}))
        );
    }

    #[test]
    fn test_polymorphic_explicit_fields_still_keep_discriminator() {
        let input = record(json!({"type": "gallery", "images": [], "caption": "c"}));
        let projected = project(&input, &article_schema(), Some(&["caption"]));
        assert_eq!(
            projected.into_owned(),
            record(json!({"type": "gallery", "caption": "c"}))
        );
    }

    #[test]
    fn test_polymorphic_explicit_fields_with_discriminator_not_duplicated() {
        let input = record(json!({"type": "article", "title": "Hi"}));
        let projected = project(&input, &article_schema(), Some(&["type", "title"]));
        assert_eq!(projected.len(), 2);
    }

    #[test]
    fn test_polymorphic_unresolved_subtype_keeps_only_discriminator() {
        let input = record(json!({"type": "bogus", "title": "Hi"}));
        let projected = project(&input, &article_schema(), None);
        assert_eq!(projected.into_owned(), record(json!({"type": "bogus"})));
    }

    #[test]
    fn test_polymorphic_fieldless_subtype() {
        let mut subtypes = IndexMap::new();
        subtypes.insert("divider".to_string(), TypeSchema::default());
        let schema = TypeSchema::polymorphic(subtypes);

        let input = record(json!({"type": "divider", "color": "red"}));
        let projected = project(&input, &schema, None);
        assert_eq!(projected.into_owned(), record(json!({"type": "divider"})));
    }
}
