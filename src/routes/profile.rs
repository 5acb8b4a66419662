use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{ProfileResponse, UpdateProfilePayload},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current user's profile", body = Json<ProfileResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn get_my_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let profile = state.profile_service.get_by_user(user_id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = Json<ProfileResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let profile = state.profile_service.update(user_id, payload).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
