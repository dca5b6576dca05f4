//! Startup DDL: create the database and the resources table when missing.
//! Idempotent; there is no versioned migration history.

use crate::error::AppError;
use crate::sql::{quoted, RESOURCE_TABLE};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Create the database named in `database_url` if it does not exist, via the `postgres` maintenance db.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::Internal("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}

/// Create the resources table and its indexes if they do not exist.
pub async fn ensure_resource_table(pool: &PgPool) -> Result<(), AppError> {
    let table = quoted(RESOURCE_TABLE);
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            "name" TEXT NOT NULL CHECK ("name" <> ''),
            "description" TEXT,
            "category" TEXT,
            "status" TEXT NOT NULL DEFAULT 'active' CHECK ("status" IN ('active', 'inactive')),
            "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        table
    );
    sqlx::query(&ddl).execute(pool).await?;

    for (name, column) in [
        ("resources_created_at_idx", "\"created_at\" DESC"),
        ("resources_category_idx", "\"category\""),
        ("resources_status_idx", "\"status\""),
    ] {
        let sql = format!("CREATE INDEX IF NOT EXISTS {} ON {} ({})", quoted(name), table, column);
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(table = RESOURCE_TABLE, "resource table ready");
    Ok(())
}
