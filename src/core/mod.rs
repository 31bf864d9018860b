//! Core module containing the validation and projection engine

pub mod catalog;
pub mod error;
pub mod field_type;
pub mod filter;
pub mod model;
pub mod record;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod validation;

pub use catalog::Catalog;
pub use error::{ConfigError, ModelError, ModelResult};
pub use field_type::{FieldCheck, FieldType, FieldTypeRegistry, FieldTypes, FieldValidator};
pub use filter::project;
pub use model::{Model, SaveOutcome};
pub use record::{DISCRIMINATOR, Record};
pub use resolver::{DiscriminatorError, resolve_fields, resolve_subtype};
pub use schema::{FieldContext, FieldMap, FieldSettings, TypeSchema};
pub use store::{RecordStore, StoredRecord};
pub use validation::RecordValidator;
