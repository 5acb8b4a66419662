use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{JobCategory, JobStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
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
    pub status: JobStatus,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub view_count: Option<i32>,
    pub application_count: Option<i32>,
    pub posted_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Visibility invariant for ordinary users: approved and not expired.
    pub fn is_publicly_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Approved
            && self.expires_at.map(|exp| exp > now).unwrap_or(true)
    }

    pub fn is_publicly_visible(&self) -> bool {
        self.is_publicly_visible_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job(status: JobStatus, expires_at: Option<DateTime<Utc>>) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: "Frontend Developer".into(),
            description: "Build things".into(),
            company_name: Some("TechCorp Ltd".into()),
            company_logo_url: None,
            location: "Dar es Salaam".into(),
            salary_min: None,
            salary_max: None,
            employment_type: None,
            experience_level: None,
            category: JobCategory::Normal,
            status,
            requirements: None,
            benefits: None,
            contact_email: None,
            contact_phone: None,
            view_count: Some(0),
            application_count: Some(0),
            posted_by: Uuid::new_v4(),
            approved_by: None,
            expires_at,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn approval_makes_a_listing_visible() {
        let now = Utc::now();
        let mut listing = job(JobStatus::Pending, None);
        assert!(!listing.is_publicly_visible_at(now));

        listing.status = JobStatus::Approved;
        assert!(listing.is_publicly_visible_at(now));
    }

    #[test]
    fn expiry_hides_an_approved_listing() {
        let now = Utc::now();
        let expired = job(JobStatus::Approved, Some(now - Duration::hours(1)));
        assert!(!expired.is_publicly_visible_at(now));

        let live = job(JobStatus::Approved, Some(now + Duration::hours(1)));
        assert!(live.is_publicly_visible_at(now));
    }
}
