//! Built-in field types
//!
//! Options are read from the field settings on every check. A malformed option
//! (a `max_length` that is not a number, an invalid `pattern`) is a schema
//! error and fails the validation at the application level.

use crate::core::field_type::{FieldCheck, FieldType, FieldValidator};
use crate::core::record::Record;
use crate::core::schema::FieldContext;
use crate::core::validation::validators;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

/// Run validators in order, stopping at the first failure
fn first_failure(
    label: &str,
    value: &Value,
    checks: &[&dyn Fn(&str, &Value) -> std::result::Result<(), String>],
) -> FieldCheck {
    let failure = checks.iter().find_map(|check| check(label, value).err());
    match failure {
        Some(message) => FieldCheck::Invalid(message),
        None => FieldCheck::Valid,
    }
}

fn usize_option(field: &FieldContext, key: &str) -> Result<Option<usize>> {
    match field.option(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| anyhow!("option '{}' of field '{}' must be a positive integer", key, field.name)),
    }
}

fn f64_option(field: &FieldContext, key: &str) -> Result<Option<f64>> {
    match field.option(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| anyhow!("option '{}' of field '{}' must be a number", key, field.name)),
    }
}

fn str_option<'f>(field: &'f FieldContext, key: &str) -> Result<Option<&'f str>> {
    match field.option(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| anyhow!("option '{}' of field '{}' must be a string", key, field.name)),
    }
}

fn strings_option(field: &FieldContext, key: &str) -> Result<Option<Vec<String>>> {
    match field.option(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    anyhow!("option '{}' of field '{}' must list strings", key, field.name)
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(anyhow!("option '{}' of field '{}' must be a list", key, field.name)),
    }
}

fn bool_option(field: &FieldContext, key: &str) -> bool {
    field.option(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Free text
///
/// Options: `min_length`, `max_length`, `pattern`, `allowed`.
pub struct TextField;

#[async_trait]
impl FieldValidator for TextField {
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck> {
        let Some(value) = field.value(record) else {
            return Ok(FieldCheck::Valid);
        };

        let length = validators::string_length(
            usize_option(field, "min_length")?,
            usize_option(field, "max_length")?,
        );
        let pattern = str_option(field, "pattern")?
            .map(|p| Regex::new(p).map_err(|e| anyhow!("invalid pattern for field '{}': {}", field.name, e)))
            .transpose()?
            .map(validators::pattern);
        let allowed = strings_option(field, "allowed")?.map(validators::in_list);

        let kind = validators::string();
        let mut checks: Vec<&dyn Fn(&str, &Value) -> std::result::Result<(), String>> =
            vec![&kind, &length];
        if let Some(pattern) = &pattern {
            checks.push(pattern);
        }
        if let Some(allowed) = &allowed {
            checks.push(allowed);
        }

        Ok(first_failure(field.label(), value, &checks))
    }
}

impl FieldType for TextField {
    fn name(&self) -> &str {
        "text"
    }

    fn validator(&self) -> Option<&dyn FieldValidator> {
        Some(self)
    }
}

/// Numeric value
///
/// Options: `min`, `max`, `integer`.
pub struct NumberField;

#[async_trait]
impl FieldValidator for NumberField {
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck> {
        let Some(value) = field.value(record) else {
            return Ok(FieldCheck::Valid);
        };

        let kind = validators::number();
        let range = validators::value_range(f64_option(field, "min")?, f64_option(field, "max")?);
        let integer = validators::integer();

        let mut checks: Vec<&dyn Fn(&str, &Value) -> std::result::Result<(), String>> =
            vec![&kind];
        if bool_option(field, "integer") {
            checks.push(&integer);
        }
        checks.push(&range);

        Ok(first_failure(field.label(), value, &checks))
    }
}

impl FieldType for NumberField {
    fn name(&self) -> &str {
        "number"
    }

    fn validator(&self) -> Option<&dyn FieldValidator> {
        Some(self)
    }
}

pub struct BooleanField;

#[async_trait]
impl FieldValidator for BooleanField {
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck> {
        Ok(match field.value(record) {
            Some(value) => FieldCheck::from_result(validators::boolean()(field.label(), value)),
            None => FieldCheck::Valid,
        })
    }
}

impl FieldType for BooleanField {
    fn name(&self) -> &str {
        "boolean"
    }

    fn validator(&self) -> Option<&dyn FieldValidator> {
        Some(self)
    }
}

pub struct EmailField;

#[async_trait]
impl FieldValidator for EmailField {
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck> {
        let Some(value) = field.value(record) else {
            return Ok(FieldCheck::Valid);
        };

        let kind = validators::string();
        let email = validators::email();
        Ok(first_failure(field.label(), value, &[&kind, &email]))
    }
}

impl FieldType for EmailField {
    fn name(&self) -> &str {
        "email"
    }

    fn validator(&self) -> Option<&dyn FieldValidator> {
        Some(self)
    }
}

/// Calendar date stored as text
///
/// Options: `format` (chrono syntax, defaults to `%Y-%m-%d`).
pub struct DateField;

#[async_trait]
impl FieldValidator for DateField {
    async fn validate(&self, field: &FieldContext, record: &Record) -> Result<FieldCheck> {
        let Some(value) = field.value(record) else {
            return Ok(FieldCheck::Valid);
        };

        let format = str_option(field, "format")?.unwrap_or("%Y-%m-%d");
        let kind = validators::string();
        let date = validators::date_format(format.to_string());
        Ok(first_failure(field.label(), value, &[&kind, &date]))
    }
}

impl FieldType for DateField {
    fn name(&self) -> &str {
        "date"
    }

    fn validator(&self) -> Option<&dyn FieldValidator> {
        Some(self)
    }
}

/// Arbitrary JSON, accepted as is
pub struct JsonField;

impl FieldType for JsonField {
    fn name(&self) -> &str {
        "json"
    }
}
