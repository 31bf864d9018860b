//! Response envelope shared by every route
//!
//! ```json
//! { "status": { "code": 200 }, "alerts": { "error": ["Name is required."] }, "data": { ... } }
//! ```

use crate::core::error::ModelError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Alert messages grouped by level (`error`, `info`, ...)
pub type Alerts = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Alerts>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Build an envelope, omitting empty alerts and null data
    pub fn new(code: StatusCode, data: Option<Value>, alerts: Alerts) -> Self {
        Self {
            status: Status {
                code: code.as_u16(),
            },
            alerts: (!alerts.is_empty()).then_some(alerts),
            data: data.filter(|d| !d.is_null()),
        }
    }

    pub fn ok(data: Value) -> Self {
        Self::new(StatusCode::OK, Some(data), Alerts::new())
    }

    /// Envelope for a route whose callback produced no content
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            Some(json!({
                "title": "Page not found",
                "description": "The page you're looking for wasn't found."
            })),
            Alerts::new(),
        )
    }

    /// Envelope for a request denied by the route's access check
    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            Some(json!({
                "title": "Forbidden",
                "description": "You don't have permission to access this page."
            })),
            Alerts::new(),
        )
    }

    /// Envelope for a malformed request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            Some(json!({
                "title": "Bad request",
                "description": message.into()
            })),
            Alerts::new(),
        )
    }

    /// Envelope for an application error
    pub fn from_error(err: &ModelError) -> Self {
        Self::new(
            status_code(err),
            Some(json!({
                "title": "Error",
                "code": err.error_code(),
                "description": err.to_string()
            })),
            Alerts::new(),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Get the HTTP status code for an application error
pub fn status_code(err: &ModelError) -> StatusCode {
    match err {
        ModelError::UnknownType { .. } => StatusCode::NOT_FOUND,
        ModelError::FieldTypeLoad { .. }
        | ModelError::FieldValidation { .. }
        | ModelError::Storage { .. }
        | ModelError::Config(_)
        | ModelError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl IntoResponse for ModelError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        Envelope::from_error(&self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_serialization() {
        let value = serde_json::to_value(Envelope::ok(json!({"a": 1}))).unwrap();
        assert_eq!(value, json!({"status": {"code": 200}, "data": {"a": 1}}));
    }

    #[test]
    fn test_empty_alerts_and_null_data_are_omitted() {
        let envelope = Envelope::new(StatusCode::OK, Some(Value::Null), Alerts::new());
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value, json!({"status": {"code": 200}}));
    }

    #[test]
    fn test_alerts_are_serialized() {
        let mut alerts = Alerts::new();
        alerts.insert("error".into(), vec!["Name is required.".into()]);
        let value =
            serde_json::to_value(Envelope::new(StatusCode::BAD_REQUEST, None, alerts)).unwrap();
        assert_eq!(value["alerts"]["error"][0], "Name is required.");
        assert_eq!(value["status"]["code"], 400);
    }

    #[test]
    fn test_not_found_and_forbidden() {
        assert_eq!(Envelope::not_found().status.code, 404);
        assert_eq!(Envelope::not_found().data.unwrap()["title"], "Page not found");
        assert_eq!(Envelope::forbidden().status.code, 403);
        assert_eq!(Envelope::forbidden().data.unwrap()["title"], "Forbidden");
    }

    #[test]
    fn test_error_status_codes() {
        let err = ModelError::UnknownType {
            type_name: "ghost".into(),
        };
        assert_eq!(status_code(&err), StatusCode::NOT_FOUND);

        let err = ModelError::Storage {
            type_name: "person".into(),
            message: "down".into(),
        };
        let envelope = Envelope::from_error(&err);
        assert_eq!(envelope.status.code, 500);
        assert_eq!(envelope.data.unwrap()["code"], "STORAGE_ERROR");
    }

    #[test]
    fn test_into_response_uses_envelope_code() {
        let response = Envelope::forbidden().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
