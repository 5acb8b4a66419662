use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VipSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_name: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub status: PaymentStatus,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Subscription joined to the subscriber's profile, as listed in the
/// payments management table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionWithProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_name: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub status: PaymentStatus,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}
