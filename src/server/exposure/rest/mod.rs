//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`
//! serving every route controller of the host.

use super::super::host::ServerHost;
use anyhow::Result;
use axum::routing::MethodRouter;
use axum::{Json, Router, routing::get};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Route controllers of the host, grouped by path
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes().merge(Self::controller_routes(&host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build one method router per path out of the host's controllers
    fn controller_routes(host: &ServerHost) -> Router {
        let mut paths: IndexMap<String, MethodRouter> = IndexMap::new();

        for controller in &host.routes {
            let path = controller.path().to_string();
            let method_router = controller.clone().method_router();
            let merged = match paths.shift_remove(&path) {
                Some(existing) => existing.merge(method_router),
                None => method_router,
            };
            paths.insert(path, merged);
        }

        paths
            .into_iter()
            .fold(Router::new(), |router, (path, method_router)| {
                router.route(&path, method_router)
            })
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "this-schema"
        }))
    }
}
