use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::filter::{JobFilters, PostedWithin, SALARY_FILTER_MAX};
use crate::models::enums::{JobCategory, JobStatus};
use crate::models::job::Job;
use crate::services::job_service::{JobPage, PublicFeedCriteria};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub company_name: Option<String>,
    pub company_logo_url: Option<String>,
    #[validate(length(min = 1))]
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub category: Option<JobCategory>,
    pub status: Option<JobStatus>,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobStatusPayload {
    pub status: JobStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<JobStatus>,
    pub search: Option<String>,
}

/// Query string of the public feed. Multi-valued dimensions arrive as
/// comma-separated lists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobFeedQuery {
    pub q: Option<String>,
    pub locations: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub employment_types: Option<String>,
    pub experience_levels: Option<String>,
    pub posted_within: Option<PostedWithin>,
    pub vip_only: Option<bool>,
    pub category: Option<JobCategory>,
    pub limit: Option<i64>,
}

fn split_csv(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl JobFeedQuery {
    pub fn search(&self) -> String {
        self.q.clone().unwrap_or_default()
    }

    pub fn filters(&self) -> JobFilters {
        JobFilters {
            locations: split_csv(&self.locations),
            salary_min: self.salary_min.unwrap_or(Decimal::ZERO),
            salary_max: self
                .salary_max
                .unwrap_or_else(|| Decimal::from(SALARY_FILTER_MAX)),
            employment_types: split_csv(&self.employment_types),
            experience_levels: split_csv(&self.experience_levels),
            posted_within: self.posted_within.unwrap_or_default(),
            vip_only: self.vip_only.unwrap_or(false),
        }
    }

    pub fn criteria(&self) -> PublicFeedCriteria {
        PublicFeedCriteria {
            search: self.q.clone().filter(|s| !s.is_empty()),
            locations: split_csv(&self.locations),
            category: self.category,
            limit: self.limit.unwrap_or(crate::config::get_config().public_feed_limit),
        }
    }
}

/// Card-sized projection of a listing for feed and saved/application lists.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub company_name: Option<String>,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub category: JobCategory,
    pub category_label: &'static str,
    pub is_vip: bool,
    pub view_count: i32,
    pub application_count: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Job> for JobSummary {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company_name: value.company_name,
            location: value.location,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            employment_type: value.employment_type,
            experience_level: value.experience_level,
            category: value.category,
            category_label: value.category.badge_label(),
            is_vip: value.category == JobCategory::Vip,
            view_count: value.view_count.unwrap_or(0),
            application_count: value.application_count.unwrap_or(0),
            created_at: value.created_at,
            expires_at: value.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobFeedResponse {
    pub items: Vec<JobSummary>,
    pub total: usize,
    /// Set when the read degraded to an empty result instead of failing.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_name: Option<String>,
    pub company_logo_url: Option<String>,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub category: JobCategory,
    pub category_label: &'static str,
    pub status: JobStatus,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub view_count: i32,
    pub application_count: i32,
    pub posted_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            company_name: value.company_name,
            company_logo_url: value.company_logo_url,
            location: value.location,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            employment_type: value.employment_type,
            experience_level: value.experience_level,
            category: value.category,
            category_label: value.category.badge_label(),
            status: value.status,
            requirements: value.requirements.unwrap_or_default(),
            benefits: value.benefits.unwrap_or_default(),
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            view_count: value.view_count.unwrap_or(0),
            application_count: value.application_count.unwrap_or(0),
            posted_by: value.posted_by,
            approved_by: value.approved_by,
            expires_at: value.expires_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<JobPage> for JobListResponse {
    fn from(value: JobPage) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
