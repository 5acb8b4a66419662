use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use jobjua_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        // Keeps the visibility invariant true over time: approved listings
        // past their expiry flip to expired and fall out of subscribed feeds.
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                match state.job_service.expire_overdue().await {
                    Ok(0) => {}
                    Ok(n) => info!("expired {} overdue job listings", n),
                    Err(e) => tracing::error!(error = ?e, "expiry sweeper error"),
                }
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/sign-up", post(routes::auth::sign_up))
        .route("/api/auth/sign-in", post(routes::auth::sign_in))
        .route("/api/public/jobs", get(routes::jobs::list_public_jobs))
        .route("/api/public/jobs/events", get(routes::jobs::job_events))
        .route("/api/public/jobs/:id", get(routes::jobs::get_public_job))
        .layer(axum::middleware::from_fn_with_state(
            jobjua_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            jobjua_backend::middleware::rate_limit::rps_middleware,
        ));

    let user_api = Router::new()
        .route("/api/me", get(routes::auth::me))
        .route(
            "/api/profile",
            get(routes::profile::get_my_profile).patch(routes::profile::update_my_profile),
        )
        .route(
            "/api/applications",
            get(routes::applications::list_my_applications).post(routes::applications::apply),
        )
        .route("/api/saved-jobs", get(routes::saved::list_saved_jobs))
        .route(
            "/api/saved-jobs/:job_id",
            post(routes::saved::save_job).delete(routes::saved::unsave_job),
        )
        .route("/api/vip/content", get(routes::vip::list_vip_content))
        .route(
            "/api/vip/subscriptions",
            get(routes::vip::list_my_subscriptions).post(routes::vip::create_subscription),
        )
        .route_layer(axum::middleware::from_fn(
            jobjua_backend::middleware::auth::require_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            jobjua_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            jobjua_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(routes::admin::list_jobs).post(routes::admin::create_job),
        )
        .route(
            "/api/admin/jobs/:id/status",
            post(routes::admin::update_job_status),
        )
        .route(
            "/api/admin/jobs/:id/applications",
            get(routes::admin::list_job_applications),
        )
        .route(
            "/api/admin/applications/:id/status",
            post(routes::admin::update_application_status),
        )
        .route("/api/admin/users", get(routes::admin::list_users))
        .route(
            "/api/admin/users/:id/suspension",
            post(routes::admin::set_user_suspension),
        )
        .route(
            "/api/admin/subscriptions",
            get(routes::admin::list_subscriptions),
        )
        .route(
            "/api/admin/subscriptions/:id/decision",
            post(routes::admin::decide_subscription),
        )
        .route(
            "/api/admin/vip-content",
            get(routes::admin::list_vip_content).post(routes::admin::create_vip_content),
        )
        .route(
            "/api/admin/vip-content/:id",
            patch(routes::admin::update_vip_content).delete(routes::admin::delete_vip_content),
        )
        .route(
            "/api/admin/vip-content/:id/active",
            post(routes::admin::set_vip_content_active),
        )
        .route(
            "/api/admin/agents",
            get(routes::admin::list_agents).post(routes::admin::promote_agent),
        )
        .route(
            "/api/admin/agents/regions",
            post(routes::admin::assign_region),
        )
        .route("/api/admin/dashboard", get(routes::admin::dashboard_stats))
        .route(
            "/api/admin/notifications",
            get(routes::admin::list_notifications),
        )
        .route(
            "/api/admin/notifications/:id/read",
            post(routes::admin::mark_notification_read),
        )
        .route_layer(axum::middleware::from_fn(
            jobjua_backend::middleware::auth::require_staff,
        ))
        .layer(axum::middleware::from_fn_with_state(
            jobjua_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            jobjua_backend::middleware::rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(public_api)
        .merge(user_api)
        .merge(admin_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
