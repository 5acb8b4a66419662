use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile_dto::UpdateProfilePayload;
use crate::error::Result;
use crate::models::user::Profile;

const PROFILE_COLUMNS: &str = "id, user_id, full_name, phone_number, is_vip, vip_expires_at, \
    is_suspended, suspension_reason, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

/// Row of the admin user-management table: profile plus account email.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ManagedUser {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_vip: Option<bool>,
    pub is_suspended: Option<bool>,
    pub suspension_reason: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn update(&self, user_id: Uuid, payload: UpdateProfilePayload) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                phone_number = COALESCE($3, phone_number),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(&payload.full_name)
        .bind(&payload.phone_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Ordinary-user accounts for the management table, newest first.
    pub async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        let users = sqlx::query_as::<_, ManagedUser>(
            r#"
            SELECT p.user_id, u.email, p.full_name, p.phone_number, p.is_vip,
                   p.is_suspended, p.suspension_reason, p.created_at
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            JOIN user_roles r ON r.user_id = p.user_id AND r.role = 'user'
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn set_suspension(
        &self,
        user_id: Uuid,
        suspended: bool,
        reason: Option<String>,
    ) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET is_suspended = $2,
                suspension_reason = $3,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(suspended)
        .bind(&reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }
}
