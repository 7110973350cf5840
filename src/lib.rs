//! Resource API: CRUD REST service for a single resource table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{CreateResource, Resource, ResourceFilter, UpdateResource};
pub use routes::{app, common_routes_with_ready, resource_routes};
pub use service::ResourceService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryResourceStore, PgResourceStore, ResourceStore};
