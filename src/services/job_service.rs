use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery};
use crate::error::{Error, Result};
use crate::live::{JobEvent, JobEventBus};
use crate::models::enums::{JobCategory, JobStatus};
use crate::models::job::Job;

const JOB_COLUMNS: &str = "id, title, description, company_name, company_logo_url, location, \
    salary_min, salary_max, employment_type, experience_level, category, status, requirements, \
    benefits, contact_email, contact_phone, view_count, application_count, posted_by, \
    approved_by, expires_at, created_at, updated_at";

/// Criteria the provider can evaluate server-side for the public feed.
/// Salary-range and compound text relevance stay client-side in
/// `domain::filter`.
#[derive(Debug, Clone, Default)]
pub struct PublicFeedCriteria {
    pub search: Option<String>,
    pub locations: Vec<String>,
    pub category: Option<JobCategory>,
    pub limit: i64,
}

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
    events: JobEventBus,
}

pub struct JobPage {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool, events: JobEventBus) -> Self {
        Self { pool, events }
    }

    /// The public working set: approved, unexpired listings, newest first,
    /// bounded. Callers wanting fail-soft semantics handle the error at the
    /// route layer.
    pub async fn list_public(&self, criteria: PublicFeedCriteria) -> Result<Vec<Job>> {
        let limit = if criteria.limit <= 0 {
            50
        } else {
            criteria.limit.min(50)
        };

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM jobs WHERE status = ", JOB_COLUMNS));
        qb.push_bind(JobStatus::Approved);
        qb.push(" AND (expires_at IS NULL OR expires_at > NOW())");

        if !criteria.locations.is_empty() {
            qb.push(" AND location = ANY(");
            qb.push_bind(criteria.locations);
            qb.push(")");
        }
        if let Some(category) = criteria.category {
            qb.push(" AND category = ");
            qb.push_bind(category);
        }
        if let Some(search) = criteria.search.filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            qb.push(" AND (title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR company_name ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit);

        let items = qb.build_query_as::<Job>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    /// Management listing with status filter, text search and paging.
    pub async fn list(&self, query: JobListQuery) -> Result<JobPage> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM jobs WHERE TRUE", JOB_COLUMNS));
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM jobs WHERE TRUE");

        for builder in [&mut qb, &mut count_qb] {
            if let Some(status) = query.status {
                builder.push(" AND status = ");
                builder.push_bind(status);
            }
            if let Some(search) = query.search.clone().filter(|s| !s.is_empty()) {
                let pattern = format!("%{}%", search);
                builder.push(" AND (title ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR company_name ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR location ILIKE ");
                builder.push_bind(pattern);
                builder.push(")");
            }
        }

        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(per_page);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let items = qb.build_query_as::<Job>().fetch_all(&self.pool).await?;
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn create(&self, payload: CreateJobPayload, posted_by: Uuid) -> Result<Job> {
        let status = payload.status.unwrap_or(JobStatus::Pending);
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                title, description, company_name, company_logo_url, location,
                salary_min, salary_max, employment_type, experience_level,
                category, status, requirements, benefits, contact_email,
                contact_phone, posted_by, expires_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.company_name)
        .bind(&payload.company_logo_url)
        .bind(&payload.location)
        .bind(payload.salary_min)
        .bind(payload.salary_max)
        .bind(&payload.employment_type)
        .bind(&payload.experience_level)
        .bind(payload.category.unwrap_or(JobCategory::Normal))
        .bind(status)
        .bind(&payload.requirements)
        .bind(&payload.benefits)
        .bind(&payload.contact_email)
        .bind(&payload.contact_phone)
        .bind(posted_by)
        .bind(payload.expires_at)
        .fetch_one(&self.pool)
        .await?;

        if job.is_publicly_visible() {
            self.events.publish(JobEvent::Posted { job: job.clone() });
        }
        Ok(job)
    }

    /// Admin/agent-controlled lifecycle transition. Stamping `approved_by`
    /// happens here; visibility changes are pushed onto the event bus.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        actor: Uuid,
    ) -> Result<Job> {
        let before = self.get_by_id(id).await?;
        let was_visible = before.is_publicly_visible();

        let approved_by = if status == JobStatus::Approved {
            Some(actor)
        } else {
            before.approved_by
        };

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = $2, approved_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .bind(approved_by)
        .fetch_one(&self.pool)
        .await?;

        match (was_visible, job.is_publicly_visible()) {
            (false, true) => self.events.publish(JobEvent::Posted { job: job.clone() }),
            (true, true) => self.events.publish(JobEvent::Updated { job: job.clone() }),
            (true, false) => self.events.publish(JobEvent::Removed { job_id: job.id }),
            (false, false) => {}
        }

        Ok(job)
    }

    pub async fn increment_view_count(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query(
            "UPDATE jobs SET view_count = COALESCE(view_count, 0) + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Job not found".into()));
        }
        Ok(())
    }

    /// Sweep approved listings past their expiry. Each transition publishes
    /// a removal so subscribed feeds drop the listing without a poll.
    pub async fn expire_overdue(&self) -> Result<u64> {
        let expired = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE jobs
            SET status = 'expired', updated_at = NOW()
            WHERE status = 'approved' AND expires_at IS NOT NULL AND expires_at <= NOW()
            RETURNING id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for job_id in &expired {
            self.events.publish(JobEvent::Removed { job_id: *job_id });
        }
        Ok(expired.len() as u64)
    }
}
