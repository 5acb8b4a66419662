use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgentRegion {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub region_name: String,
    pub assigned_by: Uuid,
    pub assigned_at: Option<DateTime<Utc>>,
}
