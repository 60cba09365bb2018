use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TokenSwap {
    pub uuid: Uuid,
    pub user_id: i64,
    pub amount: Decimal,
    pub total_exchange: Decimal,
    pub created_at: DateTime<Utc>,
}
