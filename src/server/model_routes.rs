//! Routes exposing a model over HTTP
//!
//! | Method | Path               | Route                              |
//! |--------|--------------------|------------------------------------|
//! | POST   | `/{type}`          | validate and save a record         |
//! | GET    | `/{type}`          | list stored records (standalone)   |
//! | GET    | `/{type}/{id}`     | load a stored record (standalone)  |

use super::route::{Access, RouteCallback, RouteReply, RouteRequest, RouteSettings};
use crate::core::error::{ModelError, ModelResult};
use crate::core::model::{Model, SaveOutcome};
use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Validates the request body and saves it when valid
pub struct SaveRecordCallback {
    model: Arc<Model>,
}

impl SaveRecordCallback {
    pub fn new(model: Arc<Model>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RouteCallback for SaveRecordCallback {
    async fn call(&self, request: &RouteRequest) -> ModelResult<Option<RouteReply>> {
        let record = match &request.body {
            Some(Value::Object(record)) => record.clone(),
            _ => {
                return Ok(Some(
                    RouteReply::new(json!({
                        "title": "Bad request",
                        "description": "Request body must be a JSON object."
                    }))
                    .with_code(StatusCode::BAD_REQUEST),
                ));
            }
        };

        let reply = match self.model.validate_and_save(record).await? {
            SaveOutcome::Saved(stored) => RouteReply::new(to_value(&stored)?),
            SaveOutcome::Validated(record) => RouteReply::new(Value::Object(record)),
            SaveOutcome::Invalid { record, errors } => RouteReply::new(Value::Object(record))
                .with_code(StatusCode::BAD_REQUEST)
                .with_alerts("error", errors),
        };

        Ok(Some(reply))
    }
}

/// Loads a stored record by the `id` path parameter
pub struct LoadRecordCallback {
    model: Arc<Model>,
}

impl LoadRecordCallback {
    pub fn new(model: Arc<Model>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RouteCallback for LoadRecordCallback {
    async fn call(&self, request: &RouteRequest) -> ModelResult<Option<RouteReply>> {
        let Some(id) = request.param("id").and_then(|id| Uuid::parse_str(id).ok()) else {
            return Ok(None);
        };

        let type_name = self.model.type_name();
        let stored = self
            .model
            .store()
            .get(type_name, &id)
            .await
            .map_err(|e| storage_error(type_name, e))?;

        stored
            .map(|stored| to_value(&stored).map(RouteReply::new))
            .transpose()
    }
}

/// Lists every stored record of the model's type
pub struct ListRecordsCallback {
    model: Arc<Model>,
}

impl ListRecordsCallback {
    pub fn new(model: Arc<Model>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RouteCallback for ListRecordsCallback {
    async fn call(&self, _request: &RouteRequest) -> ModelResult<Option<RouteReply>> {
        let type_name = self.model.type_name();
        let records = self
            .model
            .store()
            .list(type_name)
            .await
            .map_err(|e| storage_error(type_name, e))?;

        Ok(Some(RouteReply::new(to_value(&records)?)))
    }
}

/// Route settings for a model
///
/// Read routes are only registered for types that can persist records.
pub fn model_routes(model: Arc<Model>, access: Access) -> Vec<RouteSettings> {
    let path = format!("/{}", model.type_name());

    let mut routes = vec![
        RouteSettings::new(path.clone())
            .method(Method::POST)
            .access(access.clone())
            .callback(SaveRecordCallback::new(model.clone())),
    ];

    if model.schema().stores_records() {
        routes.push(
            RouteSettings::new(path.clone())
                .method(Method::GET)
                .access(access.clone())
                .callback(ListRecordsCallback::new(model.clone())),
        );
        routes.push(
            RouteSettings::new(format!("{}/{{id}}", path))
                .method(Method::GET)
                .access(access)
                .callback(LoadRecordCallback::new(model)),
        );
    }

    routes
}

fn storage_error(type_name: &str, err: anyhow::Error) -> ModelError {
    ModelError::Storage {
        type_name: type_name.to_string(),
        message: err.to_string(),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> ModelResult<Value> {
    serde_json::to_value(value).map_err(|e| ModelError::Internal(e.to_string()))
}
