use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::notification::AdminNotification;

const NOTIFICATION_COLUMNS: &str = "id, title, message, type, user_id, is_read, created_at";

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        title: &str,
        message: &str,
        kind: Option<&str>,
        user_id: Option<Uuid>,
    ) -> Result<AdminNotification> {
        let notification = sqlx::query_as::<_, AdminNotification>(&format!(
            r#"
            INSERT INTO admin_notifications (title, message, type, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(title)
        .bind(message)
        .bind(kind)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AdminNotification>> {
        let limit = if limit <= 0 { 20 } else { limit.min(100) };
        let items = sqlx::query_as::<_, AdminNotification>(&format!(
            r#"
            SELECT {}
            FROM admin_notifications
            ORDER BY created_at DESC
            LIMIT $1
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<AdminNotification> {
        let notification = sqlx::query_as::<_, AdminNotification>(&format!(
            r#"
            UPDATE admin_notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => Error::NotFound("Notification not found".into()),
            other => other.into(),
        })?;
        Ok(notification)
    }
}
