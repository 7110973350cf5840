//! PostgreSQL adapter: parameterized statements from `crate::sql` run against a `PgPool`.

use super::ResourceStore;
use crate::error::{AppError, ConfigError};
use crate::model::{NewResource, Resource, ResourceChanges, ResourceFilter};
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
    table: String,
}

impl PgResourceStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        PgResourceStore {
            pool,
            table: table.into(),
        }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Resource>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_rows(&q.sql, &q.params).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Resource>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_rows(&q.sql, &q.params).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

fn bind_rows<'q>(sql: &'q str, params: &[PgBindValue]) -> QueryAs<'q, Postgres, Resource, PgArguments> {
    let mut query = sqlx::query_as::<_, Resource>(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    query
}

fn bind_scalar<'q>(sql: &'q str, params: &[PgBindValue]) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    let mut query = sqlx::query_scalar::<_, i64>(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    query
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn create(&self, new: NewResource) -> Result<Resource, AppError> {
        let q = sql::insert(&self.table, &new);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_rows(&q.sql, &q.params).fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::select_by_id(&self.table, id)).await
    }

    async fn find_all(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, AppError> {
        self.fetch_all(&sql::select_list(&self.table, filter)).await
    }

    async fn update(&self, id: i64, changes: ResourceChanges) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::update(&self.table, id, &changes)).await
    }

    async fn delete(&self, id: i64) -> Result<Option<Resource>, AppError> {
        self.fetch_optional(&sql::delete(&self.table, id)).await
    }

    async fn count(&self, filter: &ResourceFilter) -> Result<i64, AppError> {
        let q = sql::count(&self.table, filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let n = bind_scalar(&q.sql, &q.params).fetch_one(&self.pool).await?;
        Ok(n)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::InvalidValue {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into an admin URL for the `postgres` database and `db`.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "DATABASE_URL",
            reason: "no database path".into(),
        })?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut split = path_and_query.splitn(2, '?');
    let db_name = split.next().unwrap_or("").trim();
    let query = split.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}
