//! Resource API: CRUD REST backend for a single resource entity.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{Config, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{CreateResource, ListFilter, NewResource, Resource, ResourceFilter, ResourceStatus, UpdateResource};
pub use openapi::ApiDoc;
pub use routes::{app, common_routes, resource_routes, RESOURCES_PATH};
pub use service::ResourceService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_resource_table, InMemoryStore, PgResourceStore, ResourceStore};
pub use telemetry::init_tracing;
