pub mod agent_service;
pub mod application_service;
pub mod auth_service;
pub mod job_service;
pub mod notification_service;
pub mod profile_service;
pub mod saved_job_service;
pub mod stats_service;
pub mod subscription_service;
pub mod vip_content_service;
