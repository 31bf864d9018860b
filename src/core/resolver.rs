//! Effective field resolution under polymorphism

use super::record::{Record, record_type};
use super::schema::{FieldMap, TypeSchema};
use thiserror::Error;

/// Failure to select a subtype of a polymorphic schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscriminatorError {
    #[error("type is required")]
    Missing,

    #[error("unrecognized type: {0}")]
    Unknown(String),
}

impl DiscriminatorError {
    /// The message reported as a validation error
    pub fn to_message(&self) -> String {
        format!("Error: {}.", self)
    }
}

/// Select the subtype schema a polymorphic record refers to
///
/// Returns `Ok(None)` for non-polymorphic schemas.
pub fn resolve_subtype<'s>(
    schema: &'s TypeSchema,
    record: &Record,
) -> Result<Option<(&'s str, &'s TypeSchema)>, DiscriminatorError> {
    if !schema.polymorphic {
        return Ok(None);
    }

    let type_name = record_type(record).ok_or(DiscriminatorError::Missing)?;
    schema
        .subtypes
        .get_key_value(type_name)
        .map(|(name, subtype)| Some((name.as_str(), subtype)))
        .ok_or_else(|| DiscriminatorError::Unknown(type_name.to_string()))
}

/// Determine the fields that apply to `record`
///
/// For polymorphic schemas only the matched subtype's own fields count; the
/// parent's `fields` never contribute. `Ok(None)` means no fields are declared.
pub fn resolve_fields<'s>(
    schema: &'s TypeSchema,
    record: &Record,
) -> Result<Option<&'s FieldMap>, DiscriminatorError> {
    match resolve_subtype(schema, record)? {
        Some((_, subtype)) => Ok(subtype.fields.as_ref()),
        None => Ok(schema.fields.as_ref()),
    }
}
