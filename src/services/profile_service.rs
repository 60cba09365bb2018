use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::account_dto::{RankedMember, TierResponse, UserBrief, UserProfileResponse};
use crate::error::{Error, Result};
use crate::models::profile::{ProfileType, UserProfile, TIERS};
use crate::models::user::User;
use crate::utils::media::media_url;

const PROFILE_COLUMNS: &str = "uuid, user_id, profile_type, coin, coin_level, earn_per_tab, \
     profit_per_hour, image, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

/// Walk the ladder from `current` for a balance of `coin`: each tier
/// whose threshold is reached hands over to the next one, stopping at
/// the top.
pub fn resolve_tier(current: ProfileType, coin: Decimal) -> ProfileType {
    let mut tier = current;
    while coin >= Decimal::from(tier.spec().coin_level) {
        match tier.next() {
            Some(next) => tier = next,
            None => break,
        }
    }
    tier
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fresh profile on the first tier of the ladder.
    pub async fn create_for_user(&self, user_id: i64) -> Result<UserProfile> {
        let spec = ProfileType::default().spec();
        let query = format!(
            "INSERT INTO user_profiles
                 (user_id, profile_type, coin_level, earn_per_tab, profit_per_hour, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {}",
            PROFILE_COLUMNS
        );
        let inserted = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(spec.profile_type.as_str())
            .bind(spec.coin_level)
            .bind(spec.earn_per_tab)
            .bind(spec.profit_per_hour)
            .bind(spec.image)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(profile) => Ok(profile),
            // Conflict path: the profile already existed.
            None => self
                .get_by_user(user_id)
                .await?
                .ok_or_else(|| Error::NotFound("User profile not found".to_string())),
        }
    }

    pub async fn get_by_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let query = format!(
            "SELECT {} FROM user_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        );
        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    /// Tap earnings: `coin += earn_per_tab * coin_point`, promoting
    /// through any tier thresholds the new balance crosses.
    pub async fn add_tap_coins(&self, user_id: i64, coin_point: i64) -> Result<UserProfile> {
        let profile = self
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User profile not found".to_string()))?;

        let earned = Decimal::from(i64::from(profile.earn_per_tab) * coin_point);
        let new_coin = profile.coin + earned;

        let current = profile.tier();
        let resolved = resolve_tier(current, new_coin);

        let updated = if resolved != current {
            let spec = resolved.spec();
            let query = format!(
                "UPDATE user_profiles
                 SET coin = $2, profile_type = $3, coin_level = $4, earn_per_tab = $5,
                     profit_per_hour = $6, image = $7, updated_at = NOW()
                 WHERE uuid = $1
                 RETURNING {}",
                PROFILE_COLUMNS
            );
            sqlx::query_as::<_, UserProfile>(&query)
                .bind(profile.uuid)
                .bind(new_coin)
                .bind(spec.profile_type.as_str())
                .bind(spec.coin_level)
                .bind(spec.earn_per_tab)
                .bind(spec.profit_per_hour)
                .bind(spec.image)
                .fetch_one(&self.pool)
                .await?
        } else {
            let query = format!(
                "UPDATE user_profiles SET coin = $2, updated_at = NOW()
                 WHERE uuid = $1 RETURNING {}",
                PROFILE_COLUMNS
            );
            sqlx::query_as::<_, UserProfile>(&query)
                .bind(profile.uuid)
                .bind(new_coin)
                .fetch_one(&self.pool)
                .await?
        };

        if resolved != current {
            tracing::info!(
                user_id,
                from = current.as_str(),
                to = resolved.as_str(),
                "profile promoted"
            );
        }

        Ok(updated)
    }

    /// Credit coins without touching tier state; used inside referral
    /// and channel-task transactions.
    pub async fn credit(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i64,
        amount: Decimal,
    ) -> Result<()> {
        let res = sqlx::query(
            "UPDATE user_profiles SET coin = coin + $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("User profile not found".to_string()));
        }
        Ok(())
    }

    /// Passive income tick: every profile earns its `profit_per_hour`.
    pub async fn accrue_hourly_profit(&self) -> Result<u64> {
        let res = sqlx::query(
            "UPDATE user_profiles
             SET coin = coin + CAST(profit_per_hour AS NUMERIC), updated_at = NOW()
             WHERE profit_per_hour > 0",
        )
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    /// The full tier ladder with members ranked by balance
    /// (rank 1 = highest). Tiers without members still show up with
    /// their static image and threshold.
    pub async fn list_tiers(&self) -> Result<Vec<TierResponse>> {
        let query = format!(
            "SELECT {} FROM user_profiles ORDER BY coin DESC",
            PROFILE_COLUMNS
        );
        let profiles = sqlx::query_as::<_, UserProfile>(&query)
            .fetch_all(&self.pool)
            .await?;

        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id).collect();
        let members = sqlx::query_as::<_, User>(
            "SELECT id, tg_id, username, first_name, last_name, email, avatar, password_hash, \
             is_sound, is_active, created_at, updated_at FROM users WHERE id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await?;
        let users: std::collections::HashMap<i64, User> =
            members.into_iter().map(|u| (u.id, u)).collect();

        let mut result = Vec::with_capacity(TIERS.len());
        for spec in TIERS.iter() {
            let mut members = Vec::new();
            for profile in profiles
                .iter()
                .filter(|p| p.tier() == spec.profile_type)
            {
                let Some(user) = users.get(&profile.user_id) else {
                    continue;
                };
                members.push(RankedMember {
                    rank: members.len() as i64 + 1,
                    user: UserBrief::from(user.clone()),
                    user_profile: UserProfileResponse::from(profile.clone()),
                });
            }
            result.push(TierResponse {
                name: spec.profile_type.as_str().to_string(),
                image: media_url(spec.image),
                coin_level: spec.coin_level,
                users_data: members,
            });
        }
        Ok(result)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_is_total_and_ordered() {
        assert_eq!(TIERS.len(), 11);
        assert_eq!(ProfileType::ALL.len(), 11);
        for (i, tier) in ProfileType::ALL.iter().enumerate() {
            let spec = tier.spec();
            assert_eq!(spec.profile_type, *tier);
            assert!(!spec.image.is_empty());
            assert!(spec.earn_per_tab > 0);
            assert!(spec.profit_per_hour > 0.0);
            if i > 0 {
                assert!(spec.coin_level > ProfileType::ALL[i - 1].spec().coin_level);
            }
        }
        assert_eq!(ProfileType::FiptLegend.next(), None);
    }

    #[test]
    fn resolve_tier_walks_the_ladder() {
        let start = ProfileType::RookieVoyeur;
        assert_eq!(resolve_tier(start, Decimal::from(0)), start);
        assert_eq!(resolve_tier(start, Decimal::from(4_999)), start);
        assert_eq!(
            resolve_tier(start, Decimal::from(5_000)),
            ProfileType::LateNightScroller
        );
        // A large windfall can jump several tiers at once.
        assert_eq!(
            resolve_tier(start, Decimal::from(120_000)),
            ProfileType::PrivateTeaser
        );
    }

    #[test]
    fn resolve_tier_stops_at_the_top() {
        assert_eq!(
            resolve_tier(ProfileType::FiptLegend, Decimal::from(i64::MAX)),
            ProfileType::FiptLegend
        );
        assert_eq!(
            resolve_tier(ProfileType::RookieVoyeur, Decimal::from(i64::MAX)),
            ProfileType::FiptLegend
        );
    }
}
