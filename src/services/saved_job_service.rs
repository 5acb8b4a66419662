use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::saved_job::{SavedJob, SavedJobWithJob};

#[derive(Clone)]
pub struct SavedJobService {
    pool: PgPool,
}

impl SavedJobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bookmark a listing. Saving an already-saved listing returns the
    /// existing row, so save/unsave form an idempotent pair.
    pub async fn save(&self, user_id: Uuid, job_id: Uuid) -> Result<SavedJob> {
        let saved = sqlx::query_as::<_, SavedJob>(
            r#"
            INSERT INTO saved_jobs (user_id, job_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, job_id) DO UPDATE SET job_id = EXCLUDED.job_id
            RETURNING id, user_id, job_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    /// Remove the bookmark row outright. Returns whether a row was deleted.
    pub async fn unsave(&self, user_id: Uuid, job_id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedJobWithJob>> {
        let items = sqlx::query_as::<_, SavedJobWithJob>(
            r#"
            SELECT s.id, s.user_id, s.job_id, s.created_at, j.title AS job_title,
                   j.company_name, j.location, j.salary_min, j.salary_max,
                   j.category AS job_category, j.status AS job_status, j.expires_at
            FROM saved_jobs s
            JOIN jobs j ON j.id = s.job_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
