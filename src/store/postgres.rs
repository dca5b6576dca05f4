//! PostgreSQL backend over a shared `PgPool`.

use super::ResourceStore;
use crate::error::AppError;
use crate::model::{ListFilter, NewResource, Resource, ResourceStatus, UpdateResource};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        PgResourceStore { pool }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Resource>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_resource).transpose()
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Resource>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_resource).collect()
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn insert(&self, data: NewResource) -> Result<Resource, AppError> {
        let q = sql::insert(&data);
        self.fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no row".into()))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Resource>, AppError> {
        self.fetch_all(&sql::select_list(filter)).await
    }

    async fn find(&self, id: &str) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::select_by_id(id)).await
    }

    async fn update(&self, id: &str, changes: &UpdateResource) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::update(id, changes)).await
    }

    async fn delete(&self, id: &str) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::delete(id)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_resource(row: &PgRow) -> Result<Resource, AppError> {
    let status: String = row.try_get("status")?;
    let status: ResourceStatus = status.parse().map_err(AppError::Internal)?;
    Ok(Resource {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        status,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
