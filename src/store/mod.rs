//! Persistence for resources: a capability trait plus Postgres and in-memory backends.

mod memory;
mod postgres;
mod schema;

pub use memory::InMemoryStore;
pub use postgres::PgResourceStore;
pub use schema::{ensure_database_exists, ensure_resource_table};

use crate::error::AppError;
use crate::model::{ListFilter, NewResource, Resource, UpdateResource};
use async_trait::async_trait;

/// Create/find/update/delete against the single resources table.
/// Ids, `createdAt` and `updatedAt` are owned by the store.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn insert(&self, data: NewResource) -> Result<Resource, AppError>;

    /// Rows matching every supplied filter, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Resource>, AppError>;

    async fn find(&self, id: &str) -> Result<Option<Resource>, AppError>;

    /// Applies only the supplied fields and refreshes `updatedAt`. `None` when the id is absent.
    async fn update(&self, id: &str, changes: &UpdateResource) -> Result<Option<Resource>, AppError>;

    /// Hard delete. Returns the removed row, `None` when the id is absent.
    async fn delete(&self, id: &str) -> Result<Option<Resource>, AppError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// Release connections at shutdown.
    async fn close(&self) {}
}
