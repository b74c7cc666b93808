use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{AuditEntry, AuditSink};

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for AuditRepository {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (
                accion, table_name, record_id, estado_http,
                ip_address, ip, agente_usuario, momento, cuerpo, new_data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&entry.action)
        .bind(&entry.table_name)
        .bind(entry.record_id)
        .bind(entry.http_status)
        .bind(&entry.ip)
        .bind(&entry.ip)
        .bind(&entry.user_agent)
        .bind(entry.moment)
        .bind(&entry.body)
        .bind(&entry.new_data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
