use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::job::Job;

/// Change notification for the jobs table. `Posted` and `Updated` carry the
/// listing snapshot so subscribers can render without a follow-up read;
/// `Removed` covers deletion, rejection and expiry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobEvent {
    Posted { job: Job },
    Updated { job: Job },
    Removed { job_id: Uuid },
}

/// Single in-process invalidation bus for listing changes. Every mutation
/// path publishes here and the SSE route subscribes here, so explicit
/// refetch-after-write and push-based refetch ride the same channel.
#[derive(Clone)]
pub struct JobEventBus {
    tx: broadcast::Sender<JobEvent>,
}

impl JobEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.tx.subscribe()
    }

    /// Publish a change. A send with no live subscribers is not an error;
    /// the event is simply dropped.
    pub fn publish(&self, event: JobEvent) {
        if let Err(err) = self.tx.send(event) {
            tracing::debug!("no live subscribers for job event: {}", err);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for JobEventBus {
    fn default() -> Self {
        // Room for a burst of admin approvals without lagging subscribers.
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{JobCategory, JobStatus};
    use chrono::Utc;

    fn sample_job() -> Job {
        Job {
            id: Uuid::new_v4(),
            title: "Frontend Developer".into(),
            description: "desc".into(),
            company_name: Some("TechCorp".into()),
            company_logo_url: None,
            location: "Dar es Salaam".into(),
            salary_min: None,
            salary_max: None,
            employment_type: None,
            experience_level: None,
            category: JobCategory::Normal,
            status: JobStatus::Approved,
            requirements: None,
            benefits: None,
            contact_email: None,
            contact_phone: None,
            view_count: Some(0),
            application_count: Some(0),
            posted_by: Uuid::new_v4(),
            approved_by: None,
            expires_at: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = JobEventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(JobEvent::Posted { job: sample_job() });

        match rx.recv().await {
            Ok(JobEvent::Posted { job }) => assert_eq!(job.title, "Frontend Developer"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn dropped_subscriber_no_longer_counts_or_receives() {
        let bus = JobEventBus::default();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);

        // With the subscriber gone, publishing must not deliver anywhere.
        bus.publish(JobEvent::Removed {
            job_id: Uuid::new_v4(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let bus = JobEventBus::default();
        bus.publish(JobEvent::Posted { job: sample_job() });
    }
}
