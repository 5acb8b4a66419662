use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::agent_region::AgentRegion;

#[derive(Clone)]
pub struct AgentService {
    pool: PgPool,
}

/// Agent roster row: account, profile and assigned regions.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct AgentSummary {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub regions: Option<Vec<String>>,
    pub assigned_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AgentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_agents(&self) -> Result<Vec<AgentSummary>> {
        let agents = sqlx::query_as::<_, AgentSummary>(
            r#"
            SELECT r.user_id, u.email, p.full_name, p.phone_number,
                   ARRAY_REMOVE(ARRAY_AGG(ar.region_name), NULL) AS regions,
                   r.assigned_at
            FROM user_roles r
            JOIN users u ON u.id = r.user_id
            LEFT JOIN profiles p ON p.user_id = r.user_id
            LEFT JOIN agent_regions ar ON ar.agent_id = r.user_id
            WHERE r.role = 'agent'
            GROUP BY r.user_id, u.email, p.full_name, p.phone_number, r.assigned_at
            ORDER BY r.assigned_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(agents)
    }

    /// Grant the agent role. Promoting an existing agent is a no-op.
    pub async fn promote(&self, user_id: Uuid, assigned_by: Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(Error::NotFound("User not found".into()));
        }

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role, assigned_by)
            VALUES ($1, 'agent', $2)
            ON CONFLICT (user_id, role) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(assigned_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn assign_region(
        &self,
        agent_id: Uuid,
        region_name: &str,
        assigned_by: Uuid,
    ) -> Result<AgentRegion> {
        let region = sqlx::query_as::<_, AgentRegion>(
            r#"
            INSERT INTO agent_regions (agent_id, region_name, assigned_by)
            VALUES ($1, $2, $3)
            RETURNING id, agent_id, region_name, assigned_by, assigned_at
            "#,
        )
        .bind(agent_id)
        .bind(region_name)
        .bind(assigned_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(region)
    }
}
