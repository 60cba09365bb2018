use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Referral {
    pub uuid: Uuid,
    pub inviter_id: i64,
    pub invited_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Singleton row holding the coin reward credited to an inviter per
/// successful referral.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReferralPoints {
    pub uuid: Uuid,
    pub points: Decimal,
    pub created_at: DateTime<Utc>,
}
