use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuspendUserPayload {
    pub suspended: bool,
    #[validate(length(min = 1, max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoteAgentPayload {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignRegionPayload {
    pub agent_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub region_name: String,
}
