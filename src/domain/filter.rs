use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::enums::JobCategory;
use crate::models::job::Job;

/// Upper bound of the salary slider; a filter at [0, MAX] is inactive.
pub const SALARY_FILTER_MAX: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PostedWithin {
    #[default]
    #[serde(rename = "anytime")]
    Anytime,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl PostedWithin {
    /// Oldest creation time still admitted, or `None` for no restriction.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PostedWithin::Anytime => None,
            PostedWithin::Day => Some(now - Duration::hours(24)),
            PostedWithin::ThreeDays => Some(now - Duration::days(3)),
            PostedWithin::Week => Some(now - Duration::days(7)),
            PostedWithin::Month => Some(now - Duration::days(30)),
        }
    }
}

/// Structured filter criteria from the listing screen. Every dimension at
/// its default means "no restriction"; an empty selection set never means
/// "reject all".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFilters {
    pub locations: Vec<String>,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub employment_types: Vec<String>,
    pub experience_levels: Vec<String>,
    pub posted_within: PostedWithin,
    pub vip_only: bool,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self {
            locations: Vec::new(),
            salary_min: Decimal::ZERO,
            salary_max: Decimal::from(SALARY_FILTER_MAX),
            employment_types: Vec::new(),
            experience_levels: Vec::new(),
            posted_within: PostedWithin::Anytime,
            vip_only: false,
        }
    }
}

impl JobFilters {
    pub fn salary_restricted(&self) -> bool {
        self.salary_min > Decimal::ZERO || self.salary_max < Decimal::from(SALARY_FILTER_MAX)
    }

    /// Number of active dimensions, as shown on the filter button badge.
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.locations.is_empty() {
            count += 1;
        }
        if self.salary_restricted() {
            count += 1;
        }
        if !self.employment_types.is_empty() {
            count += 1;
        }
        if !self.experience_levels.is_empty() {
            count += 1;
        }
        if self.posted_within != PostedWithin::Anytime {
            count += 1;
        }
        if self.vip_only {
            count += 1;
        }
        count
    }
}

/// Case-insensitive substring match over title and company name.
fn matches_search(job: &Job, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    job.title.to_lowercase().contains(&needle)
        || job
            .company_name
            .as_deref()
            .map(|c| c.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

fn matches_salary(job: &Job, filters: &JobFilters) -> bool {
    if !filters.salary_restricted() {
        return true;
    }
    // Listings that expose no numeric salary are never excluded by the
    // range; only a numeric range that misses the window filters out.
    let (lo, hi) = match (job.salary_min, job.salary_max) {
        (None, None) => return true,
        (lo, hi) => (lo.or(hi).unwrap(), hi.or(lo).unwrap()),
    };
    hi >= filters.salary_min && lo <= filters.salary_max
}

/// The filter predicate: a pure conjunction of search text and every active
/// structured criterion.
pub fn matches(job: &Job, query: &str, filters: &JobFilters, now: DateTime<Utc>) -> bool {
    if !matches_search(job, query) {
        return false;
    }

    if !filters.locations.is_empty() && !filters.locations.contains(&job.location) {
        return false;
    }

    if !matches_salary(job, filters) {
        return false;
    }

    if !filters.employment_types.is_empty() {
        let matched = job
            .employment_type
            .as_ref()
            .map(|t| filters.employment_types.contains(t))
            .unwrap_or(false);
        if !matched {
            return false;
        }
    }

    if !filters.experience_levels.is_empty() {
        let matched = job
            .experience_level
            .as_ref()
            .map(|l| filters.experience_levels.contains(l))
            .unwrap_or(false);
        if !matched {
            return false;
        }
    }

    if let Some(cutoff) = filters.posted_within.cutoff(now) {
        let recent = job.created_at.map(|c| c >= cutoff).unwrap_or(true);
        if !recent {
            return false;
        }
    }

    if filters.vip_only && job.category != JobCategory::Vip {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::JobStatus;
    use uuid::Uuid;

    fn listing(title: &str, company: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.into(),
            description: "desc".into(),
            company_name: Some(company.into()),
            company_logo_url: None,
            location: "Dar es Salaam".into(),
            salary_min: None,
            salary_max: None,
            employment_type: Some("full-time".into()),
            experience_level: Some("mid".into()),
            category: JobCategory::Normal,
            status: JobStatus::Approved,
            requirements: None,
            benefits: None,
            contact_email: None,
            contact_phone: None,
            view_count: Some(0),
            application_count: Some(0),
            posted_by: Uuid::new_v4(),
            approved_by: None,
            expires_at: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn empty_filters_match_everything() {
        let now = Utc::now();
        let filters = JobFilters::default();
        for job in [
            listing("Frontend Developer", "TechCorp Ltd"),
            listing("Data Scientist", "DataTech"),
        ] {
            assert!(matches(&job, "", &filters, now));
        }
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn search_matches_title_and_company_case_insensitively() {
        let now = Utc::now();
        let filters = JobFilters::default();
        let frontend = listing("Senior Frontend Developer", "TechCorp");
        let data = listing("Data Scientist", "DataTech Ltd");

        assert!(matches(&frontend, "Frontend", &filters, now));
        assert!(!matches(&data, "Frontend", &filters, now));
        assert!(matches(&frontend, "techcorp", &filters, now));
    }

    #[test]
    fn vip_only_excludes_ordinary_listings_for_any_query() {
        let now = Utc::now();
        let filters = JobFilters {
            vip_only: true,
            ..Default::default()
        };
        let normal = listing("Frontend Developer", "TechCorp");
        assert!(!matches(&normal, "", &filters, now));
        assert!(!matches(&normal, "Frontend", &filters, now));

        let mut vip = listing("Frontend Developer", "TechCorp");
        vip.category = JobCategory::Vip;
        assert!(matches(&vip, "", &filters, now));
    }

    #[test]
    fn empty_location_set_means_no_restriction() {
        let now = Utc::now();
        let mut filters = JobFilters::default();
        let job = listing("Driver", "HaulIt");
        assert!(matches(&job, "", &filters, now));

        filters.locations = vec!["Arusha".into()];
        assert!(!matches(&job, "", &filters, now));

        filters.locations = vec!["Arusha".into(), "Dar es Salaam".into()];
        assert!(matches(&job, "", &filters, now));
    }

    #[test]
    fn salary_range_spares_listings_without_numeric_salary() {
        let now = Utc::now();
        let filters = JobFilters {
            salary_min: Decimal::from(100_000),
            salary_max: Decimal::from(300_000),
            ..Default::default()
        };

        let text_only = listing("Cook", "Mama Ntilie");
        assert!(matches(&text_only, "", &filters, now));

        let mut low = listing("Cleaner", "Sparkle");
        low.salary_min = Some(Decimal::from(50_000));
        low.salary_max = Some(Decimal::from(80_000));
        assert!(!matches(&low, "", &filters, now));

        let mut overlapping = listing("Clerk", "OfficeCo");
        overlapping.salary_min = Some(Decimal::from(250_000));
        overlapping.salary_max = Some(Decimal::from(400_000));
        assert!(matches(&overlapping, "", &filters, now));
    }

    #[test]
    fn posted_within_window_excludes_old_listings() {
        let now = Utc::now();
        let filters = JobFilters {
            posted_within: PostedWithin::Day,
            ..Default::default()
        };

        let mut stale = listing("Old Role", "Slowpoke Inc");
        stale.created_at = Some(now - Duration::days(2));
        assert!(!matches(&stale, "", &filters, now));

        let mut fresh = listing("New Role", "Speedy Inc");
        fresh.created_at = Some(now - Duration::hours(2));
        assert!(matches(&fresh, "", &filters, now));
    }

    #[test]
    fn conjunction_requires_every_active_dimension() {
        let now = Utc::now();
        let filters = JobFilters {
            locations: vec!["Dar es Salaam".into()],
            employment_types: vec!["full-time".into()],
            ..Default::default()
        };
        let job = listing("Frontend Developer", "TechCorp");
        assert!(matches(&job, "frontend", &filters, now));

        let mut part_time = listing("Frontend Developer", "TechCorp");
        part_time.employment_type = Some("part-time".into());
        assert!(!matches(&part_time, "frontend", &filters, now));
    }
}
