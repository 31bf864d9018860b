//! Server module for building HTTP servers around record types
//!
//! This module provides a `ServerBuilder` that registers:
//! - Save, list and load routes for every configured record type
//! - Custom routes served through route controllers
//! - Health check routes

pub mod builder;
pub mod envelope;
pub mod exposure;
pub mod host;
pub mod model_routes;
pub mod route;

pub use builder::ServerBuilder;
pub use envelope::{Alerts, Envelope};
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use model_routes::model_routes;
pub use route::{
    Access, AccessCheck, RouteCallback, RouteController, RouteHandler, RouteReply, RouteRequest,
    RouteSettings,
};
