use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{error::Result, middleware::auth::Claims, AppState};

#[utoipa::path(
    post,
    path = "/api/saved-jobs/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job to bookmark")
    ),
    responses(
        (status = 201, description = "Job saved"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn save_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let saved = state.saved_job_service.save(user_id, job_id).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    delete,
    path = "/api/saved-jobs/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job to remove from saved")
    ),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 404, description = "Job was not saved")
    )
)]
#[axum::debug_handler]
pub async fn unsave_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let removed = state.saved_job_service.unsave(user_id, job_id).await?;
    if !removed {
        return Err(crate::error::Error::NotFound(
            "Job was not in your saved list".into(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs",
    responses(
        (status = 200, description = "Saved jobs for the current user"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let items = state.saved_job_service.list_for_user(user_id).await?;
    let total = items.len();
    Ok(Json(serde_json::json!({
        "items": items,
        "total": total,
    })))
}
