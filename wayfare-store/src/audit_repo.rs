use async_trait::async_trait;
use sqlx::PgPool;

use wayfare_core::audit::{AuditStore, SearchAuditRecord};

/// Postgres-backed audit store for the admin dashboard's search reporting.
/// Callers treat writes as best-effort; this type just reports failures.
pub struct PostgresAuditStore {
    pub pool: PgPool,
}

impl PostgresAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PostgresAuditStore {
    async fn insert(
        &self,
        record: &SearchAuditRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO search_audits (id, domain, params, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.domain.to_string())
        .bind(&record.params)
        .bind(record.user_id.as_deref())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
