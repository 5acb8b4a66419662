use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        admin_dto::{AssignRegionPayload, PromoteAgentPayload, SuspendUserPayload},
        application_dto::UpdateApplicationStatusPayload,
        job_dto::{CreateJobPayload, JobListQuery, JobListResponse, JobResponse, UpdateJobStatusPayload},
        vip_dto::{
            CreateVipContentPayload, SetContentActivePayload, SubscriptionDecisionPayload,
            UpdateVipContentPayload,
        },
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::enums::{AppRole, JobStatus, PaymentStatus},
    models::vip_content::VIP_CONTENT_TYPES,
    AppState,
};

fn check_content_type(content_type: &str) -> Result<()> {
    if !VIP_CONTENT_TYPES.contains(&content_type) {
        return Err(Error::BadRequest(format!(
            "content_type must be one of: {}",
            VIP_CONTENT_TYPES.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Job management
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by lifecycle status"),
        ("search" = Option<String>, Query, description = "Search query")
    ),
    responses(
        (status = 200, description = "Job listings for management", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let actor = claims.user_id()?;
    let job = state.job_service.create(payload, actor).await?;

    if job.status == JobStatus::Pending {
        // Submission-for-review shows up on the dashboard.
        let _ = state
            .notification_service
            .create(
                "New job pending review",
                &format!("\"{}\" is waiting for approval", job.title),
                Some("job_submitted"),
                Some(actor),
            )
            .await;
    }

    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobStatusPayload>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let job = state
        .job_service
        .update_status(id, payload.status, actor)
        .await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}/applications",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job")
    )
)]
#[axum::debug_handler]
pub async fn list_job_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.application_service.list_for_job(id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Application status updated"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(
        crate::dto::application_dto::ApplicationResponse::from(application),
    ))
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Ordinary-user accounts")
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.profile_service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/suspension",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = SuspendUserPayload,
    responses(
        (status = 200, description = "Suspension state updated"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn set_user_suspension(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SuspendUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .set_suspension(id, payload.suspended, payload.reason)
        .await?;
    Ok(Json(crate::dto::profile_dto::ProfileResponse::from(profile)))
}

// ---------------------------------------------------------------------------
// Payments & subscriptions (admin only; agents are denied)
// ---------------------------------------------------------------------------

fn require_admin(claims: &Claims) -> Result<()> {
    if claims.role != AppRole::Admin {
        return Err(Error::Forbidden(
            "Payment management is only available to administrators".into(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/admin/subscriptions",
    responses(
        (status = 200, description = "VIP subscriptions with subscriber profiles"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    require_admin(&claims)?;
    let items = state.subscription_service.list().await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/admin/subscriptions/{id}/decision",
    params(
        ("id" = Uuid, Path, description = "Subscription ID")
    ),
    request_body = SubscriptionDecisionPayload,
    responses(
        (status = 200, description = "Decision applied"),
        (status = 400, description = "Subscription is not pending"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn decide_subscription(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubscriptionDecisionPayload>,
) -> Result<impl IntoResponse> {
    require_admin(&claims)?;
    let actor = claims.user_id()?;

    let subscription = match payload.status {
        PaymentStatus::Approved => state.subscription_service.approve(id, actor).await?,
        other => state.subscription_service.set_status(id, other).await?,
    };
    Ok(Json(subscription))
}

// ---------------------------------------------------------------------------
// VIP content management
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/vip-content",
    responses(
        (status = 200, description = "All VIP content, active or not")
    )
)]
#[axum::debug_handler]
pub async fn list_vip_content(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.vip_content_service.list_all().await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/admin/vip-content",
    request_body = CreateVipContentPayload,
    responses(
        (status = 201, description = "Content created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_vip_content(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateVipContentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    check_content_type(&payload.content_type)?;
    let actor = claims.user_id()?;
    let content = state.vip_content_service.create(payload, actor).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/vip-content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = UpdateVipContentPayload,
    responses(
        (status = 200, description = "Content updated"),
        (status = 404, description = "Content not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vip_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVipContentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if let Some(content_type) = payload.content_type.as_deref() {
        check_content_type(content_type)?;
    }
    let content = state.vip_content_service.update(id, payload).await?;
    Ok(Json(content))
}

#[utoipa::path(
    post,
    path = "/api/admin/vip-content/{id}/active",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = SetContentActivePayload,
    responses(
        (status = 200, description = "Active flag updated"),
        (status = 404, description = "Content not found")
    )
)]
#[axum::debug_handler]
pub async fn set_vip_content_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetContentActivePayload>,
) -> Result<impl IntoResponse> {
    let content = state
        .vip_content_service
        .set_active(id, payload.is_active)
        .await?;
    Ok(Json(content))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vip-content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 404, description = "Content not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vip_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let deleted = state.vip_content_service.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("Content not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Agent management
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/agents",
    responses(
        (status = 200, description = "Agents with their regions")
    )
)]
#[axum::debug_handler]
pub async fn list_agents(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let agents = state.agent_service.list_agents().await?;
    Ok(Json(agents))
}

#[utoipa::path(
    post,
    path = "/api/admin/agents",
    request_body = PromoteAgentPayload,
    responses(
        (status = 204, description = "Agent role granted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn promote_agent(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PromoteAgentPayload>,
) -> Result<impl IntoResponse> {
    require_admin(&claims)?;
    let actor = claims.user_id()?;
    state.agent_service.promote(payload.user_id, actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admin/agents/regions",
    request_body = AssignRegionPayload,
    responses(
        (status = 201, description = "Region assigned"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn assign_region(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AssignRegionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    require_admin(&claims)?;
    let actor = claims.user_id()?;
    let region = state
        .agent_service
        .assign_region(payload.agent_id, &payload.region_name, actor)
        .await?;
    Ok((StatusCode::CREATED, Json(region)))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Aggregate counters for the overview cards")
    )
)]
#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.stats_service.dashboard().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    responses(
        (status = 200, description = "Most recent admin notifications")
    )
)]
#[axum::debug_handler]
pub async fn list_notifications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.notification_service.list_recent(20).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/admin/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let notification = state.notification_service.mark_read(id).await?;
    Ok(Json(notification))
}
