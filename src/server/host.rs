//! Server host for transport-agnostic API exposure
//!
//! The host holds the configured types, their models and the route
//! controllers. It is the single source of truth for application state and
//! knows nothing about the transport serving it.

use super::model_routes::model_routes;
use super::route::{Access, RouteController, RouteSettings};
use crate::config::TypesConfig;
use crate::core::catalog::Catalog;
use crate::core::model::Model;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(config, catalog, model_access, routes);
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Merged type configuration
    pub config: Arc<TypesConfig>,

    /// Models keyed by type name
    pub catalog: Arc<Catalog>,

    /// Controllers for every route, custom routes first
    pub routes: Vec<Arc<RouteController>>,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Custom routes take precedence: a model route whose path and method are
    /// already served by a custom route is not registered. Among custom
    /// routes sharing a path and method, the first one wins.
    pub fn from_builder_components(
        config: TypesConfig,
        catalog: Catalog,
        model_access: Access,
        custom_routes: Vec<RouteSettings>,
    ) -> Self {
        let mut settings: Vec<RouteSettings> = Vec::new();

        for route in custom_routes {
            if settings.iter().any(|existing| existing.overlaps(&route)) {
                tracing::warn!(path = %route.path, "duplicate route ignored");
                continue;
            }
            settings.push(route);
        }

        for model in catalog.models() {
            for route in model_routes(model.clone(), model_access.clone()) {
                if settings.iter().any(|existing| existing.overlaps(&route)) {
                    tracing::debug!(path = %route.path, "model route overridden by custom route");
                    continue;
                }
                settings.push(route);
            }
        }

        let routes = settings
            .into_iter()
            .map(|route| Arc::new(RouteController::new(route)))
            .collect();

        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            routes,
        }
    }

    /// Get the record types served by the host
    pub fn type_names(&self) -> Vec<&str> {
        self.catalog.type_names()
    }

    /// Get the model of a record type
    pub fn model(&self, type_name: &str) -> Option<&Arc<Model>> {
        self.catalog.get(type_name)
    }

    /// Check if host serves any record type
    pub fn is_ready(&self) -> bool {
        !self.catalog.is_empty()
    }
}
