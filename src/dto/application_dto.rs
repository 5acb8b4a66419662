use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stage::application_stage;
use crate::models::application::{ApplicationWithJob, JobApplication};
use crate::models::enums::{ApplicationStatus, JobCategory, JobStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: ApplicationStatus,
    pub stage: &'static str,
    pub progress: u8,
    pub next_step: Option<&'static str>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<JobApplication> for ApplicationResponse {
    fn from(value: JobApplication) -> Self {
        let stage = application_stage(value.status);
        Self {
            id: value.id,
            job_id: value.job_id,
            cover_letter: value.cover_letter,
            resume_url: value.resume_url,
            status: value.status,
            stage: stage.stage,
            progress: stage.progress,
            next_step: stage.next_step,
            applied_at: value.applied_at,
            updated_at: value.updated_at,
        }
    }
}

/// Application card on the tracking screen: listing context plus the
/// decorated progress of the application itself.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCardResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: Option<String>,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub job_category: JobCategory,
    pub job_status: JobStatus,
    pub status: ApplicationStatus,
    pub stage: &'static str,
    pub progress: u8,
    pub next_step: Option<&'static str>,
    pub resume_url: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ApplicationWithJob> for ApplicationCardResponse {
    fn from(value: ApplicationWithJob) -> Self {
        let stage = application_stage(value.status);
        Self {
            id: value.id,
            job_id: value.job_id,
            job_title: value.job_title,
            company_name: value.company_name,
            location: value.location,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            job_category: value.job_category,
            job_status: value.job_status,
            status: value.status,
            stage: stage.stage,
            progress: stage.progress,
            next_step: stage.next_step,
            resume_url: value.resume_url,
            applied_at: value.applied_at,
            updated_at: value.updated_at,
        }
    }
}

/// Counters behind the filter tabs: one per status, plus the total.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationStatusCounts {
    pub all: i64,
    pub applied: i64,
    pub reviewed: i64,
    pub interview: i64,
    pub rejected: i64,
    pub accepted: i64,
}

impl ApplicationStatusCounts {
    pub fn from_rows(rows: &[(ApplicationStatus, i64)]) -> Self {
        let mut counts = Self::default();
        for (status, n) in rows {
            counts.all += n;
            match status {
                ApplicationStatus::Applied => counts.applied += n,
                ApplicationStatus::Reviewed => counts.reviewed += n,
                ApplicationStatus::Interview => counts.interview += n,
                ApplicationStatus::Rejected => counts.rejected += n,
                ApplicationStatus::Accepted => counts.accepted += n,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationCardResponse>,
    pub counts: ApplicationStatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_status_and_total() {
        let rows = vec![
            (ApplicationStatus::Applied, 2),
            (ApplicationStatus::Interview, 1),
            (ApplicationStatus::Accepted, 3),
        ];
        let counts = ApplicationStatusCounts::from_rows(&rows);
        assert_eq!(counts.all, 6);
        assert_eq!(counts.applied, 2);
        assert_eq!(counts.interview, 1);
        assert_eq!(counts.accepted, 3);
        assert_eq!(counts.reviewed, 0);
    }
}
