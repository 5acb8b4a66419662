use std::env;

use jobjua_backend::{
    dto::job_dto::CreateJobPayload,
    models::enums::{JobStatus, PaymentMethod, PaymentStatus},
    services::job_service::PublicFeedCriteria,
    AppState,
};

fn seed_env() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("API_RPS", "100");
    env::set_var("PUBLIC_BASE_URL", "http://localhost:8080");
}

fn job_payload(title: &str) -> CreateJobPayload {
    CreateJobPayload {
        title: title.into(),
        description: "Build and ship things".into(),
        company_name: Some("TechCorp Ltd".into()),
        company_logo_url: None,
        location: "Dar es Salaam".into(),
        salary_min: None,
        salary_max: None,
        employment_type: Some("full-time".into()),
        experience_level: Some("mid".into()),
        category: None,
        status: None,
        requirements: Some(vec!["Rust".into()]),
        benefits: None,
        contact_email: None,
        contact_phone: None,
        expires_at: None,
    }
}

#[tokio::test]
#[ignore = "requires a postgres database via DATABASE_URL"]
async fn listing_save_apply_and_subscription_flow() {
    seed_env();
    jobjua_backend::config::init_config().expect("init config");
    let pool = jobjua_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let state = AppState::new(pool);

    let suffix = uuid::Uuid::new_v4();
    let seeker = state
        .auth_service
        .sign_up(
            &format!("seeker_{}@example.com", suffix),
            "longenough",
            Some("Asha Mkapa".into()),
            Some("+255700000001".into()),
        )
        .await
        .expect("sign up seeker");
    let admin = state
        .auth_service
        .sign_up(
            &format!("admin_{}@example.com", suffix),
            "longenough",
            Some("Admin".into()),
            None,
        )
        .await
        .expect("sign up admin");

    // A pending listing is invisible to the public feed.
    let job = state
        .job_service
        .create(job_payload("Frontend Developer"), admin.user.id)
        .await
        .expect("create job");
    assert_eq!(job.status, JobStatus::Pending);

    let feed = state
        .job_service
        .list_public(PublicFeedCriteria {
            search: Some("Frontend".into()),
            ..Default::default()
        })
        .await
        .expect("feed");
    assert!(!feed.iter().any(|j| j.id == job.id));

    // Approval satisfies the visibility invariant and the listing surfaces.
    let approved = state
        .job_service
        .update_status(job.id, JobStatus::Approved, admin.user.id)
        .await
        .expect("approve");
    assert!(approved.is_publicly_visible());

    let feed = state
        .job_service
        .list_public(PublicFeedCriteria {
            search: Some("Frontend".into()),
            ..Default::default()
        })
        .await
        .expect("feed after approval");
    assert!(feed.iter().any(|j| j.id == job.id));

    // Save then unsave returns the saved set to its prior state.
    let before: Vec<_> = state
        .saved_job_service
        .list_for_user(seeker.user.id)
        .await
        .expect("saved before")
        .into_iter()
        .map(|s| s.job_id)
        .collect();

    state
        .saved_job_service
        .save(seeker.user.id, job.id)
        .await
        .expect("save");
    // Saving twice is idempotent.
    state
        .saved_job_service
        .save(seeker.user.id, job.id)
        .await
        .expect("save again");
    let removed = state
        .saved_job_service
        .unsave(seeker.user.id, job.id)
        .await
        .expect("unsave");
    assert!(removed);

    let after: Vec<_> = state
        .saved_job_service
        .list_for_user(seeker.user.id)
        .await
        .expect("saved after")
        .into_iter()
        .map(|s| s.job_id)
        .collect();
    assert_eq!(before, after);

    // One application per (user, job).
    state
        .application_service
        .apply(seeker.user.id, job.id, "I am a great fit.", None)
        .await
        .expect("apply");
    let duplicate = state
        .application_service
        .apply(seeker.user.id, job.id, "Twice!", None)
        .await;
    assert!(duplicate.is_err());

    // Approving a subscription flips the member's VIP flag in the same
    // transaction.
    let subscription = state
        .subscription_service
        .create(
            seeker.user.id,
            "VIP Monthly",
            rust_decimal::Decimal::from(10_000),
            PaymentMethod::Mpesa,
            Some("MP12345".into()),
        )
        .await
        .expect("create subscription");
    assert_eq!(subscription.status, PaymentStatus::Pending);

    let approved_sub = state
        .subscription_service
        .approve(subscription.id, admin.user.id)
        .await
        .expect("approve subscription");
    assert_eq!(approved_sub.status, PaymentStatus::Approved);

    let profile = state
        .profile_service
        .get_by_user(seeker.user.id)
        .await
        .expect("profile");
    assert_eq!(profile.is_vip, Some(true));
    assert!(profile.vip_expires_at.is_some());
}
