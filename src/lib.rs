//! # This-Schema
//!
//! Schema-driven validation and projection of records before persistence.
//!
//! ## Features
//!
//! - **Polymorphic Types**: A `type` field selects the subtype whose fields apply
//! - **Concurrent Validation**: Every field is checked at once
//! - **Pluggable Field Types**: Field handlers are looked up by name in a registry
//! - **Projection**: Only declared fields reach the store
//! - **Configuration-Based**: Declare record types in YAML
//! - **Route Controllers**: Access-checked routes answering with a status envelope
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_schema::prelude::*;
//!
//! let config = TypesConfig::from_yaml_str(r#"
//! types:
//!   person:
//!     fields:
//!       name: { title: Name, type: text, required: true }
//! "#)?;
//!
//! let catalog = Catalog::from_config(
//!     &config,
//!     Arc::new(FieldTypes::with_builtins()),
//!     Arc::new(InMemoryRecordStore::new()),
//! );
//!
//! let person = catalog.model("person")?;
//! let outcome = person.validate_and_save(record).await?;
//! ```

pub mod config;
pub mod core;
pub mod fields;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Catalog, DISCRIMINATOR, FieldCheck, FieldContext, FieldSettings, FieldType,
        FieldTypeRegistry, FieldTypes, FieldValidator, Model, ModelError, ModelResult, Record,
        RecordStore, RecordValidator, SaveOutcome, StoredRecord, TypeSchema, project,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordStore;

    // === Config ===
    pub use crate::config::TypesConfig;

    // === Server ===
    pub use crate::server::{
        Access, AccessCheck, Envelope, RouteCallback, RouteReply, RouteRequest, RouteSettings,
        ServerBuilder,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
