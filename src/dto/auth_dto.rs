use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::profile_dto::ProfileResponse;
use crate::models::enums::AppRole;
use crate::services::auth_service::SignedInUser;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: AppRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: AppRole,
    pub profile: Option<ProfileResponse>,
}

impl From<SignedInUser> for AuthResponse {
    fn from(value: SignedInUser) -> Self {
        Self {
            token: value.token,
            user_id: value.user.id,
            email: value.user.email,
            role: value.role,
        }
    }
}
