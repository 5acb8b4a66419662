use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    dto::vip_dto::SubscribePayload,
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

/// VIP rooms content, gated on an active VIP membership.
#[utoipa::path(
    get,
    path = "/api/vip/content",
    responses(
        (status = 200, description = "Active VIP content"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "VIP membership required")
    )
)]
#[axum::debug_handler]
pub async fn list_vip_content(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let profile = state.profile_service.get_by_user(user_id).await?;
    if !profile.has_active_vip(Utc::now()) {
        return Err(Error::Forbidden(
            "An active VIP membership is required".into(),
        ));
    }

    let items = state.vip_content_service.list_active().await?;
    let total = items.len();
    Ok(Json(serde_json::json!({
        "items": items,
        "total": total,
    })))
}

/// Claim a VIP plan payment. The subscription stays pending until an admin
/// confirms the mobile-money transaction.
#[utoipa::path(
    post,
    path = "/api/vip/subscriptions",
    request_body = SubscribePayload,
    responses(
        (status = 201, description = "Subscription recorded as pending"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn create_subscription(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubscribePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if payload.amount <= Decimal::ZERO {
        return Err(Error::BadRequest(
            "Subscription amount must be positive".into(),
        ));
    }

    let user_id = claims.user_id()?;
    let subscription = state
        .subscription_service
        .create(
            user_id,
            &payload.plan_name,
            payload.amount,
            payload.payment_method,
            payload.payment_reference,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

#[utoipa::path(
    get,
    path = "/api/vip/subscriptions",
    responses(
        (status = 200, description = "Subscription history for the current user"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn list_my_subscriptions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let items = state.subscription_service.list_for_user(user_id).await?;
    Ok(Json(items))
}
