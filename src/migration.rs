//! Apply the resource table DDL. Idempotent: safe to run on every start.

use crate::error::AppError;
use crate::sql::quoted;
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS for the resource table plus filter indexes.
/// The CHECK constraint mirrors the name rule enforced in the service layer.
pub async fn apply_migrations(pool: &PgPool, table: &str) -> Result<(), AppError> {
    let q_table = quoted(table);
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (char_length(name) BETWEEN 3 AND 100),
            description TEXT,
            category TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        q_table
    );
    sqlx::query(&ddl).execute(pool).await?;

    for column in ["category", "status"] {
        let index = quoted(&format!("{}_{}_idx", table, column));
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            index,
            q_table,
            quoted(column)
        ))
        .execute(pool)
        .await?;
    }
    tracing::info!(table = %table, "migrations applied");
    Ok(())
}
