use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewNotification, Notification, NotificationStore};

const RETURNING_COLUMNS: &str = r#"
    id,
    id_usuario AS user_id,
    type AS kind,
    titulo AS title,
    mensaje AS message,
    data,
    metadata,
    leida AS read,
    fecha_creacion AS created_at,
    fecha_lectura AS read_at
"#;

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: NewNotification) -> Result<Notification> {
        let sql = format!(
            r#"
            INSERT INTO notification (id_usuario, type, titulo, mensaje, data, metadata, leida, fecha_creacion)
            VALUES ($1, $2, $3, $4, $5, $6, false, now())
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let created = sqlx::query_as::<_, Notification>(&sql)
            .bind(notification.user_id)
            .bind(&notification.kind)
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(&notification.data)
            .bind(&notification.metadata)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id = created.id, user_id = created.user_id, "Created notification");
        Ok(created)
    }

    async fn set_read(
        &self,
        id: i32,
        read: bool,
        read_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Notification>> {
        let sql = format!(
            r#"
            UPDATE notification
            SET leida = $2, fecha_lectura = $3
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let updated = sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .bind(read)
            .bind(read_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn unread_count(&self, user_id: i32) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notification WHERE id_usuario = $1 AND leida = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notification WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
