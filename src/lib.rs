pub mod config;
pub mod database;
pub mod domain;
pub mod dto;
pub mod error;
pub mod live;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use crate::live::JobEventBus;
use crate::services::{
    agent_service::AgentService, application_service::ApplicationService,
    auth_service::AuthService, job_service::JobService,
    notification_service::NotificationService, profile_service::ProfileService,
    saved_job_service::SavedJobService, stats_service::StatsService,
    subscription_service::SubscriptionService, vip_content_service::VipContentService,
};
use crate::storage::ResumeStore;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub events: JobEventBus,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub saved_job_service: SavedJobService,
    pub profile_service: ProfileService,
    pub subscription_service: SubscriptionService,
    pub vip_content_service: VipContentService,
    pub agent_service: AgentService,
    pub notification_service: NotificationService,
    pub stats_service: StatsService,
    pub resume_store: ResumeStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let events = JobEventBus::default();

        let auth_service = AuthService::new(pool.clone());
        let job_service = JobService::new(pool.clone(), events.clone());
        let application_service = ApplicationService::new(pool.clone());
        let saved_job_service = SavedJobService::new(pool.clone());
        let profile_service = ProfileService::new(pool.clone());
        let subscription_service = SubscriptionService::new(pool.clone());
        let vip_content_service = VipContentService::new(pool.clone());
        let agent_service = AgentService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());
        let resume_store =
            ResumeStore::new(config.uploads_dir.clone(), config.public_base_url.clone());

        Self {
            pool,
            events,
            auth_service,
            job_service,
            application_service,
            saved_job_service,
            profile_service,
            subscription_service,
            vip_content_service,
            agent_service,
            notification_service,
            stats_service,
            resume_store,
        }
    }
}
