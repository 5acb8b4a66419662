use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::enums::AppRole;
use crate::models::user::{Profile, User};
use crate::utils::crypto;

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

pub struct SignedInUser {
    pub user: User,
    pub role: AppRole,
    pub token: String,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the account, its profile and the default role in one
    /// transaction, then sign the caller in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<SignedInUser> {
        let password_hash = crypto::hash_password(password)?;

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.constraint() == Some("users_email_key") => {
                Error::Conflict("An account with this email already exists".into())
            }
            _ => err.into(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, full_name, phone_number)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id)
        .bind(&full_name)
        .bind(&phone_number)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, 'user')")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let token = self.issue_token(user.id, AppRole::User)?;
        Ok(SignedInUser {
            user,
            role: AppRole::User,
            token,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".into()))?;

        if !crypto::verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized("Invalid email or password".into()));
        }

        let profile = self.profile_for(user.id).await?;
        if profile
            .as_ref()
            .and_then(|p| p.is_suspended)
            .unwrap_or(false)
        {
            return Err(Error::Forbidden("This account has been suspended".into()));
        }

        let role = self.role_for(user.id).await?;
        let token = self.issue_token(user.id, role)?;
        Ok(SignedInUser { user, role, token })
    }

    /// Highest-privilege role assigned to the account; accounts with no row
    /// in `user_roles` are ordinary users.
    pub async fn role_for(&self, user_id: Uuid) -> Result<AppRole> {
        let roles = sqlx::query_scalar::<_, AppRole>(
            "SELECT role FROM user_roles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if roles.contains(&AppRole::Admin) {
            Ok(AppRole::Admin)
        } else if roles.contains(&AppRole::Agent) {
            Ok(AppRole::Agent)
        } else {
            Ok(AppRole::User)
        }
    }

    pub async fn profile_for(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, full_name, phone_number, is_vip, vip_expires_at,
                   is_suspended, suspension_reason, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    fn issue_token(&self, user_id: Uuid, role: AppRole) -> Result<String> {
        let config = crate::config::get_config();
        let exp = (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            role,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))
    }
}
