//! Record validation against a type schema
//!
//! [`RecordValidator`] resolves the fields that apply to a record and checks
//! each present field concurrently through its field type. Bad values are
//! collected as messages; application failures abort the whole validation.
//!
//! ```text
//! record ──▶ resolve_fields ──▶ one task per present field ──▶ JoinSet ──▶ Vec<String>
//!                 │                       │
//!                 └─ discriminator error  └─ FieldTypeRegistry::load + FieldValidator::validate
//! ```
//!
//! Tasks have no timeout: a field type that never completes stalls the
//! validation that dispatched it.

pub mod validators;

use crate::core::error::{ModelError, ModelResult};
use crate::core::field_type::{FieldCheck, FieldTypeRegistry};
use crate::core::record::Record;
use crate::core::resolver::resolve_fields;
use crate::core::schema::{FieldContext, FieldSettings, TypeSchema};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Validates records of one type
#[derive(Clone)]
pub struct RecordValidator {
    schema: Arc<TypeSchema>,
    registry: Arc<dyn FieldTypeRegistry>,
}

impl RecordValidator {
    pub fn new(schema: Arc<TypeSchema>, registry: Arc<dyn FieldTypeRegistry>) -> Self {
        Self { schema, registry }
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// Validate `record`, returning the validation messages
    ///
    /// An unresolvable discriminator is reported as the only message and no
    /// field is checked. On the first application error the remaining field
    /// tasks are detached: they run to completion but their results are
    /// discarded.
    pub async fn validate(&self, record: &Record) -> ModelResult<Vec<String>> {
        let fields = match resolve_fields(&self.schema, record) {
            Ok(Some(fields)) => fields,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => return Ok(vec![err.to_message()]),
        };

        let mut errors = Vec::new();
        let mut tasks = JoinSet::new();
        let shared = Arc::new(record.clone());

        for (name, settings) in fields {
            if !record.contains_key(name) {
                if settings.required {
                    errors.push(required_message(name, settings));
                }
                continue;
            }

            let field = FieldContext::new(name, settings);
            let registry = self.registry.clone();
            let record = shared.clone();

            tracing::debug!(field = %field.name, field_type = %field.settings.field_type, "dispatching field validation");
            tasks.spawn(async move { check_field(registry.as_ref(), &field, &record).await });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| ModelError::Internal(format!("field validation task failed: {}", e)));

            match outcome.and_then(|result| result) {
                Ok(Some(message)) => errors.push(message),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(error = %err, pending = tasks.len(), "aborting record validation");
                    tasks.detach_all();
                    return Err(err);
                }
            }
        }

        Ok(errors)
    }
}

/// Message reported for a required field missing from the record
fn required_message(name: &str, settings: &FieldSettings) -> String {
    format!("{} is required.", settings.label(name))
}

/// Check one present field, returning its validation message if any
async fn check_field(
    registry: &dyn FieldTypeRegistry,
    field: &FieldContext,
    record: &Record,
) -> ModelResult<Option<String>> {
    let field_type_name = &field.settings.field_type;

    let loaded = registry
        .load(field_type_name)
        .await
        .map_err(|e| ModelError::FieldTypeLoad {
            field_type: field_type_name.clone(),
            message: e.to_string(),
        })?;

    let Some(field_type) = loaded else {
        tracing::warn!(field = %field.name, field_type = %field_type_name, "unrecognized field type, skipping validation");
        return Ok(None);
    };

    let Some(validator) = field_type.validator() else {
        return Ok(None);
    };

    let check = validator
        .validate(field, record)
        .await
        .map_err(|e| ModelError::FieldValidation {
            field: field.name.clone(),
            message: e.to_string(),
        })?;

    Ok(match check {
        FieldCheck::Valid => None,
        FieldCheck::Invalid(message) => Some(message),
    })
}
