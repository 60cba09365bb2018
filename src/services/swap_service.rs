use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::swap_dto::CreateSwapPayload;
use crate::error::{Error, Result};
use crate::models::swap::TokenSwap;

#[derive(Clone)]
pub struct SwapService {
    pool: PgPool,
}

impl SwapService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a FIPTp → FIPT exchange request.
    pub async fn create(&self, user_id: i64, payload: CreateSwapPayload) -> Result<TokenSwap> {
        if payload.amount <= Decimal::ZERO || payload.total_exchange <= Decimal::ZERO {
            return Err(Error::BadRequest(
                "Swap amounts must be positive".to_string(),
            ));
        }

        let swap = sqlx::query_as::<_, TokenSwap>(
            "INSERT INTO token_swaps (user_id, amount, total_exchange) VALUES ($1, $2, $3)
             RETURNING uuid, user_id, amount, total_exchange, created_at",
        )
        .bind(user_id)
        .bind(payload.amount)
        .bind(payload.total_exchange)
        .fetch_one(&self.pool)
        .await?;
        Ok(swap)
    }
}
