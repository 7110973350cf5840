//! Data store adapters for the resource table.

mod memory;
mod postgres;

pub use memory::MemoryResourceStore;
pub use postgres::{ensure_database_exists, PgResourceStore};

use crate::error::AppError;
use crate::model::{NewResource, Resource, ResourceChanges, ResourceFilter};
use async_trait::async_trait;

/// Single-table operations over resources. Absence is reported as `None`, never as an error.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Insert a row; the store assigns id and timestamps.
    async fn create(&self, new: NewResource) -> Result<Resource, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Resource>, AppError>;

    /// Matching rows ordered by id.
    async fn find_all(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, AppError>;

    /// Apply changes to the row if it exists. Returns `None` when no row matched.
    async fn update(&self, id: i64, changes: ResourceChanges) -> Result<Option<Resource>, AppError>;

    /// Remove the row if it exists, returning it.
    async fn delete(&self, id: i64) -> Result<Option<Resource>, AppError>;

    async fn count(&self, filter: &ResourceFilter) -> Result<i64, AppError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    fn backend(&self) -> &'static str;
}
