use serde::{Deserialize, Serialize};

/// Role attached to an account via `user_roles`. Admin surfaces require
/// `Admin` or `Agent`; payments management is `Admin` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "app_role", rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    Agent,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "job_category", rename_all = "snake_case")]
pub enum JobCategory {
    Normal,
    Vip,
    QuickGig,
    Verified,
}

impl JobCategory {
    /// Badge label shown on listing cards.
    pub fn badge_label(&self) -> &'static str {
        match self {
            JobCategory::Normal => "Standard",
            JobCategory::Vip => "VIP",
            JobCategory::QuickGig => "Quick Gig",
            JobCategory::Verified => "Verified",
        }
    }
}

/// Listing lifecycle. Transitions are admin/agent-controlled; a listing is
/// publicly visible only when `Approved` and not past its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Interview,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Accepted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
        }
    }

    /// Parse a raw status string. Codes outside the known set return `None`
    /// so the caller can fall back to the unknown-stage sentinel.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            // the mobile client has used both spellings for a fresh application
            "applied" | "pending" => Some(ApplicationStatus::Applied),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "interview" => Some(ApplicationStatus::Interview),
            "rejected" => Some(ApplicationStatus::Rejected),
            "accepted" => Some(ApplicationStatus::Accepted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Vodacom,
    Tigo,
    Halotel,
    Airtel,
    Mpesa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_status_round_trips_through_parse() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_codes_do_not_parse() {
        assert_eq!(ApplicationStatus::parse("shortlisted"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn legacy_pending_maps_to_applied() {
        assert_eq!(
            ApplicationStatus::parse("pending"),
            Some(ApplicationStatus::Applied)
        );
    }
}
