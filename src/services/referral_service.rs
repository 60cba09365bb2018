use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::referral::{Referral, ReferralPoints};
use crate::models::user::User;
use crate::services::profile_service::ProfileService;

#[derive(Clone)]
pub struct ReferralService {
    pool: PgPool,
}

impl ReferralService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn points(&self) -> Result<Option<ReferralPoints>> {
        let row = sqlx::query_as::<_, ReferralPoints>(
            "SELECT uuid, points, created_at FROM referral_points ORDER BY created_at LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Link a fresh signup to its inviter (identified by Telegram id)
    /// and credit the inviter's profile with the configured points.
    /// Both writes commit together. Unknown inviter codes and repeat
    /// pairs are ignored; a missing points row is a client error.
    pub async fn create_referral(&self, inviter_tg_id: i64, invited_id: i64) -> Result<bool> {
        let inviter = sqlx::query_as::<_, User>(
            "SELECT id, tg_id, username, first_name, last_name, email, avatar, password_hash, \
             is_sound, is_active, created_at, updated_at FROM users WHERE tg_id = $1",
        )
        .bind(inviter_tg_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(inviter) = inviter else {
            return Ok(false);
        };
        if inviter.id == invited_id {
            return Ok(false);
        }

        let already: Option<(uuid::Uuid,)> = sqlx::query_as(
            "SELECT uuid FROM referrals WHERE inviter_id = $1 AND invited_id = $2",
        )
        .bind(inviter.id)
        .bind(invited_id)
        .fetch_optional(&self.pool)
        .await?;
        if already.is_some() {
            return Ok(false);
        }

        let points = self
            .points()
            .await?
            .ok_or_else(|| Error::BadRequest("Referral points are not configured".to_string()))?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO referrals (inviter_id, invited_id) VALUES ($1, $2)
             ON CONFLICT (inviter_id, invited_id) DO NOTHING",
        )
        .bind(inviter.id)
        .bind(invited_id)
        .execute(&mut *tx)
        .await?;
        ProfileService::credit(&mut tx, inviter.id, points.points).await?;
        tx.commit().await?;

        tracing::info!(inviter = inviter.id, invited = invited_id, "referral credited");
        Ok(true)
    }

    /// Users the caller invited, newest first.
    pub async fn list_for_inviter(&self, inviter_id: i64) -> Result<Vec<(Referral, User)>> {
        let referrals = sqlx::query_as::<_, Referral>(
            "SELECT uuid, inviter_id, invited_id, created_at FROM referrals
             WHERE inviter_id = $1 ORDER BY created_at DESC",
        )
        .bind(inviter_id)
        .fetch_all(&self.pool)
        .await?;

        let invited_ids: Vec<i64> = referrals.iter().map(|r| r.invited_id).collect();
        let users = sqlx::query_as::<_, User>(
            "SELECT id, tg_id, username, first_name, last_name, email, avatar, password_hash, \
             is_sound, is_active, created_at, updated_at FROM users WHERE id = ANY($1)",
        )
        .bind(&invited_ids)
        .fetch_all(&self.pool)
        .await?;
        let by_id: std::collections::HashMap<i64, User> =
            users.into_iter().map(|u| (u.id, u)).collect();

        Ok(referrals
            .into_iter()
            .filter_map(|r| by_id.get(&r.invited_id).cloned().map(|u| (r, u)))
            .collect())
    }
}
