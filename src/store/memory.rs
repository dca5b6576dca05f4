//! Process-local store. Backs the test suite and `RESOURCE_STORE=memory`.

use super::ResourceStore;
use crate::error::AppError;
use crate::model::{ListFilter, NewResource, Resource, UpdateResource};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

/// Rows kept in insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<Resource>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn insert(&self, data: NewResource) -> Result<Resource, AppError> {
        let now = Utc::now();
        let resource = Resource {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            description: data.description,
            category: data.category,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(resource.clone());
        Ok(resource)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Resource>, AppError> {
        let rows = self.rows.read().await;
        // Reverse first so the stable sort keeps later inserts ahead on equal timestamps.
        let mut out: Vec<Resource> = rows.iter().rev().filter(|r| filter.matches(r)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn find(&self, id: &str) -> Result<Option<Resource>, AppError> {
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: &str, changes: &UpdateResource) -> Result<Option<Resource>, AppError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(description) = &changes.description {
            row.description = description.clone();
        }
        if let Some(category) = &changes.category {
            row.category = category.clone();
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        // Strictly later than the previous stamp even when the clock has not advanced.
        let now = Utc::now();
        row.updated_at = if now > row.updated_at {
            now
        } else {
            row.updated_at + Duration::microseconds(1)
        };
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Resource>, AppError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter().position(|r| r.id == id).map(|i| rows.remove(i)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
