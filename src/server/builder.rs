//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use super::route::{Access, RouteSettings};
use crate::config::TypesConfig;
use crate::core::catalog::Catalog;
use crate::core::field_type::{FieldTypeRegistry, FieldTypes};
use crate::core::store::RecordStore;
use anyhow::Result;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with one set of routes per record type
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryRecordStore::new())
///     .with_types_file("types.yaml")?
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RecordStore>>,
    field_types: Option<Arc<dyn FieldTypeRegistry>>,
    configs: Vec<TypesConfig>,
    model_access: Access,
    routes: Vec<RouteSettings>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            field_types: None,
            configs: Vec::new(),
            model_access: Access::allow_all(),
            routes: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the field type registry
    ///
    /// Defaults to [`FieldTypes::with_builtins`].
    pub fn with_field_types(mut self, registry: impl FieldTypeRegistry + 'static) -> Self {
        self.field_types = Some(Arc::new(registry));
        self
    }

    /// Add type declarations
    ///
    /// Declarations are merged in the order they are added, a type declared
    /// twice takes the later schema.
    pub fn with_types_config(mut self, config: TypesConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Add type declarations from a YAML file
    pub fn with_types_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = TypesConfig::from_yaml_file(path)?;
        Ok(self.with_types_config(config))
    }

    /// Set the access setting of every model route
    ///
    /// Model routes are open by default.
    pub fn with_model_access(mut self, access: Access) -> Self {
        self.model_access = access;
        self
    }

    /// Add a route served through a [`RouteController`](super::route::RouteController)
    ///
    /// A route sharing path and method with a model route replaces it.
    pub fn with_route(mut self, route: RouteSettings) -> Self {
        self.routes.push(route);
        self
    }

    /// Add custom axum routes to the server
    ///
    /// Use this for endpoints that don't fit the envelope pattern, such as
    /// webhooks or file downloads.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RecordStore is required. Call .with_store()"))?;

        let field_types = self
            .field_types
            .take()
            .unwrap_or_else(|| Arc::new(FieldTypes::with_builtins()));

        let config = TypesConfig::merge(std::mem::take(&mut self.configs));
        let catalog = Catalog::from_config(&config, field_types, store);

        tracing::debug!(types = ?catalog.type_names(), "building server host");

        Ok(ServerHost::from_builder_components(
            config,
            catalog,
            self.model_access,
            self.routes,
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
