use chrono::{Months, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::enums::{PaymentMethod, PaymentStatus};
use crate::models::subscription::{SubscriptionWithProfile, VipSubscription};

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_name, amount, payment_method, \
    payment_reference, status, starts_at, expires_at, approved_by, created_at, updated_at";

#[derive(Clone)]
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment claim; it stays pending until an admin confirms the
    /// mobile-money transaction.
    pub async fn create(
        &self,
        user_id: Uuid,
        plan_name: &str,
        amount: Decimal,
        payment_method: PaymentMethod,
        payment_reference: Option<String>,
    ) -> Result<VipSubscription> {
        let subscription = sqlx::query_as::<_, VipSubscription>(&format!(
            r#"
            INSERT INTO vip_subscriptions (user_id, plan_name, amount, payment_method, payment_reference)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(user_id)
        .bind(plan_name)
        .bind(amount)
        .bind(payment_method)
        .bind(&payment_reference)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscription)
    }

    pub async fn list(&self) -> Result<Vec<SubscriptionWithProfile>> {
        let items = sqlx::query_as::<_, SubscriptionWithProfile>(
            r#"
            SELECT s.id, s.user_id, s.plan_name, s.amount, s.payment_method,
                   s.payment_reference, s.status, s.starts_at, s.expires_at,
                   s.created_at, p.full_name, p.phone_number
            FROM vip_subscriptions s
            JOIN profiles p ON p.user_id = s.user_id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<VipSubscription>> {
        let items = sqlx::query_as::<_, VipSubscription>(&format!(
            r#"
            SELECT {}
            FROM vip_subscriptions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Approve a pending payment. The subscription row and the member's VIP
    /// flag move in a single transaction, so a partial write can never leave
    /// a paid member without access.
    pub async fn approve(&self, id: Uuid, approved_by: Uuid) -> Result<VipSubscription> {
        let starts_at = Utc::now();
        let expires_at = starts_at
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::Internal("Expiry computation overflowed".into()))?;

        let mut tx = self.pool.begin().await?;

        let subscription = sqlx::query_as::<_, VipSubscription>(&format!(
            r#"
            UPDATE vip_subscriptions
            SET status = 'approved', starts_at = $2, expires_at = $3,
                approved_by = $4, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(id)
        .bind(starts_at)
        .bind(expires_at)
        .bind(approved_by)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::BadRequest("Subscription is not pending approval".into()))?;

        sqlx::query(
            r#"
            UPDATE profiles
            SET is_vip = TRUE, vip_expires_at = $2, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(subscription.user_id)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(subscription)
    }

    /// Reject or fail a pending payment; the member's profile is untouched.
    pub async fn set_status(&self, id: Uuid, status: PaymentStatus) -> Result<VipSubscription> {
        if status == PaymentStatus::Approved {
            return Err(Error::BadRequest(
                "Approval must go through the approve operation".into(),
            ));
        }
        let subscription = sqlx::query_as::<_, VipSubscription>(&format!(
            r#"
            UPDATE vip_subscriptions
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscription)
    }
}
