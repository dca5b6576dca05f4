//! Resource accessor: domain operations mapped onto a `ResourceStore`.

use crate::error::AppError;
use crate::model::{ListFilter, NewResource, Resource, UpdateResource};
use crate::store::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        ResourceService { store }
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    pub async fn create(&self, data: NewResource) -> Result<Resource, AppError> {
        let resource = self.store.insert(data).await?;
        tracing::info!(id = %resource.id, "resource created");
        Ok(resource)
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Resource>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Resource>, AppError> {
        self.store.find(id).await
    }

    /// An empty change set still refreshes `updatedAt`.
    pub async fn update(&self, id: &str, changes: &UpdateResource) -> Result<Option<Resource>, AppError> {
        if changes.is_empty() {
            tracing::debug!(id = %id, "update without fields");
        }
        let resource = self.store.update(id, changes).await?;
        if resource.is_some() {
            tracing::info!(id = %id, "resource updated");
        }
        Ok(resource)
    }

    pub async fn delete(&self, id: &str) -> Result<Option<Resource>, AppError> {
        let resource = self.store.delete(id).await?;
        if resource.is_some() {
            tracing::info!(id = %id, "resource deleted");
        }
        Ok(resource)
    }
}
