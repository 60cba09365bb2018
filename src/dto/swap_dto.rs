use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::swap::TokenSwap;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSwapPayload {
    pub amount: Decimal,
    pub total_exchange: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapResponse {
    pub uuid: Uuid,
    pub user_id: i64,
    pub amount: Decimal,
    pub total_exchange: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<TokenSwap> for SwapResponse {
    fn from(value: TokenSwap) -> Self {
        Self {
            uuid: value.uuid,
            user_id: value.user_id,
            amount: value.amount,
            total_exchange: value.total_exchange,
            created_at: value.created_at,
        }
    }
}
