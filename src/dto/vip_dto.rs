use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribePayload {
    #[validate(length(min = 1))]
    pub plan_name: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionDecisionPayload {
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVipContentPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub content_type: String,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVipContentPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(length(min = 1))]
    pub content_type: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetContentActivePayload {
    pub is_active: bool,
}
