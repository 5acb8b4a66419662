use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VipContent {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub content_type: String,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub created_by: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Content kinds the admin panel may publish for VIP members.
pub const VIP_CONTENT_TYPES: [&str; 3] = ["tip", "discount", "motivation"];
