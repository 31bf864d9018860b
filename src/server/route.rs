//! Route controllers
//!
//! A route is a path plus settings exposing either static `content` or a
//! `callback` producing content. An `access` setting gates dispatch; routes
//! without one deny every request.
//!
//! - access denied → 403
//! - content, or callback producing content → 200 (or the callback's code)
//! - callback producing nothing → 404

use super::envelope::{Alerts, Envelope};
use crate::core::error::ModelResult;
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::extract::{FromRequestParts, Path, Query, Request};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter, any, on};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Transport-independent view of a request handed to access checks and callbacks
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub method: Method,
    pub path: String,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RouteRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// A path parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Content produced by a route callback
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReply {
    pub content: Value,

    /// Defaults to 200
    pub code: Option<StatusCode>,

    pub alerts: Alerts,
}

impl RouteReply {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            code: None,
            alerts: Alerts::new(),
        }
    }

    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_alerts(mut self, level: impl Into<String>, messages: Vec<String>) -> Self {
        self.alerts.entry(level.into()).or_default().extend(messages);
        self
    }
}

/// Dynamic route handler
#[async_trait]
pub trait RouteCallback: Send + Sync {
    /// Produce the route's content, `None` when there is nothing to show
    async fn call(&self, request: &RouteRequest) -> ModelResult<Option<RouteReply>>;
}

/// Dynamic access check
#[async_trait]
pub trait AccessCheck: Send + Sync {
    async fn allow(&self, request: &RouteRequest) -> bool;
}

/// Access setting of a route
#[derive(Clone)]
pub enum Access {
    Granted(bool),
    Check(Arc<dyn AccessCheck>),
}

impl Access {
    pub fn allow_all() -> Self {
        Access::Granted(true)
    }

    pub fn deny_all() -> Self {
        Access::Granted(false)
    }

    pub fn check(check: impl AccessCheck + 'static) -> Self {
        Access::Check(Arc::new(check))
    }
}

/// What a route serves
#[derive(Clone)]
pub enum RouteHandler {
    Content(Value),
    Callback(Arc<dyn RouteCallback>),
}

/// Settings of one route
#[derive(Clone)]
pub struct RouteSettings {
    pub path: String,

    /// Methods the route answers, every method when empty
    pub methods: Vec<Method>,

    pub access: Option<Access>,

    pub handler: Option<RouteHandler>,
}

impl RouteSettings {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            methods: Vec::new(),
            access: None,
            handler: None,
        }
    }

    /// Add a method the route answers
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Whether both routes would answer some request
    pub fn overlaps(&self, other: &RouteSettings) -> bool {
        self.path == other.path
            && (self.methods.is_empty()
                || other.methods.is_empty()
                || self.methods.iter().any(|method| other.methods.contains(method)))
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    pub fn content(mut self, content: Value) -> Self {
        self.handler = Some(RouteHandler::Content(content));
        self
    }

    pub fn callback(mut self, callback: impl RouteCallback + 'static) -> Self {
        self.handler = Some(RouteHandler::Callback(Arc::new(callback)));
        self
    }
}

/// Serves one route according to its settings
pub struct RouteController {
    settings: RouteSettings,
}

impl RouteController {
    pub fn new(settings: RouteSettings) -> Self {
        Self { settings }
    }

    pub fn path(&self) -> &str {
        &self.settings.path
    }

    /// Run the route's access check
    pub async fn access(&self, request: &RouteRequest) -> bool {
        match &self.settings.access {
            Some(Access::Granted(allow)) => *allow,
            Some(Access::Check(check)) => check.allow(request).await,
            None => false,
        }
    }

    /// Handle a request and build its response envelope
    pub async fn handle(&self, request: RouteRequest) -> Envelope {
        if !self.access(&request).await {
            tracing::debug!(path = %request.path, "access denied");
            return Envelope::forbidden();
        }

        match &self.settings.handler {
            Some(RouteHandler::Content(content)) => Envelope::ok(content.clone()),
            Some(RouteHandler::Callback(callback)) => match callback.call(&request).await {
                Ok(Some(reply)) => Envelope::new(
                    reply.code.unwrap_or(StatusCode::OK),
                    Some(reply.content),
                    reply.alerts,
                ),
                Ok(None) => Envelope::not_found(),
                Err(err) => {
                    tracing::error!(path = %request.path, error = %err, "route callback failed");
                    Envelope::from_error(&err)
                }
            },
            None => Envelope::not_found(),
        }
    }

    /// Convert an HTTP request and handle it
    pub async fn serve(&self, request: Request) -> Response {
        let (mut parts, body) = request.into_parts();

        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        let body = match read_json_body(body).await {
            Ok(body) => body,
            Err(message) => return Envelope::bad_request(message).into_response(),
        };

        let request = RouteRequest {
            method: parts.method,
            path: parts.uri.path().to_string(),
            params,
            query,
            headers: parts.headers,
            body,
        };

        self.handle(request).await.into_response()
    }

    /// Method router serving this route
    pub fn method_router(self: Arc<Self>) -> MethodRouter {
        let any_method = self.settings.methods.is_empty();
        let filter = self
            .settings
            .methods
            .iter()
            .filter_map(|method| match MethodFilter::try_from(method.clone()) {
                Ok(filter) => Some(filter),
                Err(_) => {
                    tracing::warn!(path = %self.settings.path, %method, "unsupported method ignored");
                    None
                }
            })
            .reduce(MethodFilter::or);

        let handler = move |request: Request| async move { self.serve(request).await };

        match filter {
            _ if any_method => any(handler),
            Some(filter) => on(filter, handler),
            None => MethodRouter::new(),
        }
    }
}

async fn read_json_body(body: Body) -> Result<Option<Value>, String> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| format!("Failed to read request body: {}", e))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| format!("Invalid JSON: {}", e))
}
