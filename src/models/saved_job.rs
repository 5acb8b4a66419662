use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{JobCategory, JobStatus};

/// A bookmark row; unsaving deletes it outright.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedJobWithJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub job_title: String,
    pub company_name: Option<String>,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub job_category: JobCategory,
    pub job_status: JobStatus,
    pub expires_at: Option<DateTime<Utc>>,
}
