use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::Result;

/// Aggregates behind the admin dashboard overview cards.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_jobs: i64,
    pub approved_jobs: i64,
    pub pending_jobs: i64,
    pub total_users: i64,
    pub vip_users: i64,
    pub agents: i64,
    pub pending_subscriptions: i64,
    pub approved_revenue: Decimal,
}

#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let total_jobs = self.count("SELECT COUNT(*) FROM jobs").await?;
        let approved_jobs = self
            .count("SELECT COUNT(*) FROM jobs WHERE status = 'approved'")
            .await?;
        let pending_jobs = self
            .count("SELECT COUNT(*) FROM jobs WHERE status = 'pending'")
            .await?;
        let total_users = self.count("SELECT COUNT(*) FROM users").await?;
        let vip_users = self
            .count("SELECT COUNT(*) FROM profiles WHERE is_vip = TRUE")
            .await?;
        let agents = self
            .count("SELECT COUNT(*) FROM user_roles WHERE role = 'agent'")
            .await?;
        let pending_subscriptions = self
            .count("SELECT COUNT(*) FROM vip_subscriptions WHERE status = 'pending'")
            .await?;

        let approved_revenue = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(amount) FROM vip_subscriptions WHERE status = 'approved'",
        )
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(Decimal::ZERO);

        Ok(DashboardStats {
            total_jobs,
            approved_jobs,
            pending_jobs,
            total_users,
            vip_users,
            agents,
            pending_subscriptions,
            approved_revenue,
        })
    }

    async fn count(&self, sql: &str) -> Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
