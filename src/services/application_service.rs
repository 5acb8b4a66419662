use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{ApplicationWithJob, JobApplication};
use crate::models::enums::ApplicationStatus;

const APPLICATION_COLUMNS: &str =
    "id, user_id, job_id, cover_letter, resume_url, status, applied_at, updated_at";

const APPLICATION_WITH_JOB_COLUMNS: &str = "a.id, a.user_id, a.job_id, a.cover_letter, \
    a.resume_url, a.status, a.applied_at, a.updated_at, j.title AS job_title, \
    j.company_name, j.location, j.salary_min, j.salary_max, \
    j.category AS job_category, j.status AS job_status";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit an application. One application per (user, job); the listing's
    /// application counter moves in the same transaction.
    pub async fn apply(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        cover_letter: &str,
        resume_url: Option<String>,
    ) -> Result<JobApplication> {
        let mut tx = self.pool.begin().await?;

        let job_visible = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT status = 'approved' AND (expires_at IS NULL OR expires_at > NOW())
            FROM jobs WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".into()))?;

        if !job_visible {
            return Err(Error::BadRequest(
                "This job is no longer accepting applications".into(),
            ));
        }

        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO job_applications (user_id, job_id, cover_letter, resume_url, status)
            VALUES ($1, $2, $3, $4, 'applied')
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(job_id)
        .bind(cover_letter)
        .bind(&resume_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db)
                if db.constraint() == Some("job_applications_user_id_job_id_key") =>
            {
                Error::Conflict("You have already applied to this job".into())
            }
            _ => err.into(),
        })?;

        sqlx::query(
            "UPDATE jobs SET application_count = COALESCE(application_count, 0) + 1 WHERE id = $1",
        )
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Applications for the signed-in user, joined to their listings,
    /// newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let items = sqlx::query_as::<_, ApplicationWithJob>(&format!(
            r#"
            SELECT {}
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = $1
            ORDER BY a.applied_at DESC
            "#,
            APPLICATION_WITH_JOB_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Per-status counters for the filter tabs on the applications screen.
    pub async fn status_counts_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(ApplicationStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ApplicationStatus, i64)>(
            "SELECT status, COUNT(*) FROM job_applications WHERE user_id = $1 GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<JobApplication> {
        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            UPDATE job_applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>> {
        let items = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {}
            FROM job_applications
            WHERE job_id = $1
            ORDER BY applied_at DESC
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
