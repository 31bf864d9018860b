//! Record types bound to their schema, field types and store
//!
//! A [`Model`] is the entry point callers use for one record type: it
//! validates records, projects them onto their permitted fields and persists
//! the valid ones.

use super::error::{ModelError, ModelResult};
use super::field_type::FieldTypeRegistry;
use super::filter::project;
use super::record::Record;
use super::resolver::resolve_subtype;
use super::schema::TypeSchema;
use super::store::{RecordStore, StoredRecord};
use super::validation::RecordValidator;
use std::borrow::Cow;
use std::sync::Arc;

/// Result of [`Model::validate_and_save`] when no application error occurred
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The projected record was persisted
    Saved(StoredRecord),

    /// The record is valid but its type is not standalone, nothing was persisted
    Validated(Record),

    /// The record failed validation, nothing was persisted
    Invalid { record: Record, errors: Vec<String> },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    /// Validation messages, empty unless the record was invalid
    pub fn errors(&self) -> &[String] {
        match self {
            SaveOutcome::Invalid { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// A record type with everything needed to validate and persist its records
#[derive(Clone)]
pub struct Model {
    type_name: String,
    schema: Arc<TypeSchema>,
    validator: RecordValidator,
    store: Arc<dyn RecordStore>,
}

impl Model {
    pub fn new(
        type_name: impl Into<String>,
        schema: TypeSchema,
        registry: Arc<dyn FieldTypeRegistry>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let schema = Arc::new(schema);
        Self {
            type_name: type_name.into(),
            validator: RecordValidator::new(schema.clone(), registry),
            schema,
            store,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Validate a record, see [`RecordValidator::validate`]
    pub async fn validate(&self, record: &Record) -> ModelResult<Vec<String>> {
        self.validator.validate(record).await
    }

    /// Project a record onto its permitted fields, see [`project`]
    pub fn filter<'r>(&self, record: &'r Record, fields: Option<&[&str]>) -> Cow<'r, Record> {
        project(record, &self.schema, fields)
    }

    /// Whether `record` may be persisted on its own
    ///
    /// A type with `standalone: false` is never persisted. Otherwise a
    /// polymorphic record is persisted unless its subtype opts out.
    pub fn is_standalone(&self, record: &Record) -> bool {
        if !self.schema.is_standalone() {
            return false;
        }

        match resolve_subtype(&self.schema, record) {
            Ok(Some((_, subtype))) => subtype.is_standalone(),
            _ => true,
        }
    }

    /// Validate a record and persist its projection when valid
    ///
    /// Invalid records and valid records of non-standalone types are returned
    /// without touching the store.
    pub async fn validate_and_save(&self, record: Record) -> ModelResult<SaveOutcome> {
        let errors = self.validate(&record).await?;

        if !errors.is_empty() {
            tracing::debug!(type_name = %self.type_name, errors = errors.len(), "record failed validation");
            return Ok(SaveOutcome::Invalid { record, errors });
        }

        if !self.is_standalone(&record) {
            tracing::debug!(type_name = %self.type_name, "record validated, type is not standalone");
            return Ok(SaveOutcome::Validated(record));
        }

        let projected = self.filter(&record, None).into_owned();
        let stored = self
            .store
            .save(&self.type_name, projected)
            .await
            .map_err(|e| ModelError::Storage {
                type_name: self.type_name.clone(),
                message: e.to_string(),
            })?;

        tracing::info!(type_name = %self.type_name, id = %stored.id, "record saved");
        Ok(SaveOutcome::Saved(stored))
    }
}
