use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vip_dto::{CreateVipContentPayload, UpdateVipContentPayload};
use crate::error::Result;
use crate::models::vip_content::VipContent;

const CONTENT_COLUMNS: &str =
    "id, title, content, content_type, image_url, is_active, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct VipContentService {
    pool: PgPool,
}

impl VipContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// What VIP members see: active posts, newest first.
    pub async fn list_active(&self) -> Result<Vec<VipContent>> {
        let items = sqlx::query_as::<_, VipContent>(&format!(
            r#"
            SELECT {}
            FROM vip_content
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            "#,
            CONTENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_all(&self) -> Result<Vec<VipContent>> {
        let items = sqlx::query_as::<_, VipContent>(&format!(
            "SELECT {} FROM vip_content ORDER BY created_at DESC",
            CONTENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn create(
        &self,
        payload: CreateVipContentPayload,
        created_by: Uuid,
    ) -> Result<VipContent> {
        let content = sqlx::query_as::<_, VipContent>(&format!(
            r#"
            INSERT INTO vip_content (title, content, content_type, image_url, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(&payload.content_type)
        .bind(&payload.image_url)
        .bind(payload.is_active.unwrap_or(true))
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateVipContentPayload) -> Result<VipContent> {
        let content = sqlx::query_as::<_, VipContent>(&format!(
            r#"
            UPDATE vip_content
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                content_type = COALESCE($4, content_type),
                image_url = COALESCE($5, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(&payload.content_type)
        .bind(&payload.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<VipContent> {
        let content = sqlx::query_as::<_, VipContent>(&format!(
            r#"
            UPDATE vip_content
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(content)
    }

    /// Promotional posts support true deletion, unlike listings.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM vip_content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
