use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::Profile;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 120))]
    pub full_name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_vip: bool,
    pub has_active_vip: bool,
    pub vip_expires_at: Option<DateTime<Utc>>,
    pub is_suspended: bool,
    pub suspension_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        let has_active_vip = value.has_active_vip(Utc::now());
        Self {
            user_id: value.user_id,
            full_name: value.full_name,
            phone_number: value.phone_number,
            is_vip: value.is_vip.unwrap_or(false),
            has_active_vip,
            vip_expires_at: value.vip_expires_at,
            is_suspended: value.is_suspended.unwrap_or(false),
            suspension_reason: value.suspension_reason,
            created_at: value.created_at,
        }
    }
}
