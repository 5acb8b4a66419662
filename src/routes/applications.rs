use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{
        ApplicationCardResponse, ApplicationListResponse, ApplicationResponse,
        ApplicationStatusCounts,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

/// Submit an application as multipart form data: `job_id`, `cover_letter`
/// and an optional `resume` file. The resume is checked (size, type) before
/// any upload or write happens.
#[utoipa::path(
    post,
    path = "/api/applications",
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "Missing cover letter or bad resume file"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let mut job_id: Option<Uuid> = None;
    let mut cover_letter = String::new();
    let mut resume: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "job_id" => {
                let raw = field.text().await.unwrap_or_default();
                job_id = Uuid::parse_str(raw.trim()).ok();
            }
            "cover_letter" => cover_letter = field.text().await.unwrap_or_default(),
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("failed to read resume upload: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;
                if !data.is_empty() {
                    // Reject oversized or wrong-type files before anything
                    // is stored or written.
                    crate::storage::validate_resume(&filename, &data)?;
                    resume = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    let job_id =
        job_id.ok_or_else(|| Error::BadRequest("A valid job_id is required".into()))?;
    if cover_letter.trim().is_empty() {
        return Err(Error::BadRequest(
            "A cover letter is required to apply".into(),
        ));
    }

    let resume_url = match resume {
        Some((filename, data)) => {
            Some(state.resume_store.store(user_id, &filename, &data).await?)
        }
        None => None,
    };

    let application = state
        .application_service
        .apply(user_id, job_id, cover_letter.trim(), resume_url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

/// The tracking screen: the caller's applications decorated with stage and
/// progress, plus the per-status tab counters.
#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Applications for the current user", body = Json<ApplicationListResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let items = state.application_service.list_for_user(user_id).await?;
    let counts = state
        .application_service
        .status_counts_for_user(user_id)
        .await?;

    let items: Vec<ApplicationCardResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(ApplicationListResponse {
        items,
        counts: ApplicationStatusCounts::from_rows(&counts),
    }))
}
