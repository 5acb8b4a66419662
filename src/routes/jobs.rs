use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::filter,
    dto::job_dto::{JobFeedQuery, JobFeedResponse, JobResponse, JobSummary},
    error::{Error, Result},
    live::JobEvent,
    AppState,
};

/// The public feed: server-side predicates narrow the working set, the
/// filter predicate refines it, and the result is decorated for cards.
///
/// Reads fail soft. A provider error logs, degrades to an empty list and
/// sets `error` in the body; the route never throws into the render path.
#[utoipa::path(
    get,
    path = "/api/public/jobs",
    params(
        ("q" = Option<String>, Query, description = "Search over title and company"),
        ("locations" = Option<String>, Query, description = "Comma-separated location list"),
        ("salary_min" = Option<String>, Query, description = "Salary range lower bound"),
        ("salary_max" = Option<String>, Query, description = "Salary range upper bound"),
        ("employment_types" = Option<String>, Query, description = "Comma-separated employment types"),
        ("experience_levels" = Option<String>, Query, description = "Comma-separated experience levels"),
        ("posted_within" = Option<String>, Query, description = "anytime, 24h, 3d, 7d or 30d"),
        ("vip_only" = Option<bool>, Query, description = "VIP listings only"),
        ("limit" = Option<i64>, Query, description = "Result cap, at most 50")
    ),
    responses(
        (status = 200, description = "Filtered job feed", body = Json<JobFeedResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_public_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobFeedQuery>,
) -> Json<JobFeedResponse> {
    let (items, error) = match state.job_service.list_public(query.criteria()).await {
        Ok(jobs) => (jobs, None),
        Err(err) => {
            tracing::error!(error = ?err, "public job feed query failed");
            (Vec::new(), Some("Failed to load jobs".to_string()))
        }
    };

    let search = query.search();
    let filters = query.filters();
    let now = Utc::now();
    let items: Vec<JobSummary> = items
        .into_iter()
        .filter(|job| filter::matches(job, &search, &filters, now))
        .map(Into::into)
        .collect();

    Json(JobFeedResponse {
        total: items.len(),
        items,
        error,
    })
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job detail", body = Json<JobResponse>),
        (status = 404, description = "Job not found or not visible")
    )
)]
#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    if !job.is_publicly_visible() {
        return Err(Error::NotFound("Job not found".into()));
    }
    state.job_service.increment_view_count(id).await?;
    Ok(Json(JobResponse::from(job)))
}

/// SSE stream of listing changes, scoped to publicly visible rows.
///
/// # Events
///
/// | Event name        | When emitted                                 |
/// |-------------------|----------------------------------------------|
/// | `listing_posted`  | A listing became visible (new or approved)   |
/// | `listing_updated` | A visible listing changed                    |
/// | `listing_removed` | A listing expired, was rejected or deleted   |
/// | `refresh`         | Client lagged; re-run the list query         |
/// | `heartbeat`       | Every 15 seconds to keep the connection      |
///
/// Dropping the connection drops the broadcast receiver, so an abandoned
/// screen can never keep a subscription open.
#[utoipa::path(
    get,
    path = "/api/public/jobs/events",
    responses(
        (status = 200, description = "Server-sent listing change events")
    )
)]
pub async fn job_events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut rx = state.events.subscribe();

    let stream = async_stream::stream! {
        let mut heartbeat = tokio::time::interval(Duration::from_secs(15));
        loop {
            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Ok(JobEvent::Posted { job }) => {
                            if job.is_publicly_visible() {
                                yield Ok(Event::default().event("listing_posted").data(
                                    serde_json::to_string(&job).unwrap_or_default()
                                ));
                            }
                        }
                        Ok(JobEvent::Updated { job }) => {
                            if job.is_publicly_visible() {
                                yield Ok(Event::default().event("listing_updated").data(
                                    serde_json::to_string(&job).unwrap_or_default()
                                ));
                            }
                        }
                        Ok(JobEvent::Removed { job_id }) => {
                            yield Ok(Event::default().event("listing_removed").data(
                                serde_json::json!({ "job_id": job_id }).to_string()
                            ));
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!("SSE subscriber lagged by {} events", n);
                            yield Ok(Event::default().event("refresh").data("{}"));
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = heartbeat.tick() => {
                    yield Ok(Event::default().event("heartbeat").data("{}"));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
