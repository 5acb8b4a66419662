use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, MeResponse, SignInPayload, SignUpPayload},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "Account created", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let signed_in = state
        .auth_service
        .sign_up(
            &payload.email,
            &payload.password,
            payload.full_name,
            payload.phone_number,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::from(signed_in))))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Signed in", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account suspended")
    )
)]
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let signed_in = state
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse::from(signed_in)))
}

/// Session restore: resolve the bearer token back into identity, role and
/// profile.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current identity", body = Json<MeResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let role = state.auth_service.role_for(user_id).await?;
    let profile = state.auth_service.profile_for(user_id).await?;

    let email = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(MeResponse {
        user_id,
        email,
        role,
        profile: profile.map(Into::into),
    }))
}
