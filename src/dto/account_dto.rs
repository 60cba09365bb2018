use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::profile::UserProfile;
use crate::models::user::User;
use crate::utils::media::media_url_opt;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TelegramAuthPayload {
    // Telegram's own WebApp SDK camel-cases this field.
    #[serde(alias = "initData")]
    #[validate(length(min = 1))]
    pub init_data: String,
    #[serde(alias = "referal_code")]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TelegramAuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PasswordLoginPayload {
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshPayload {
    #[validate(length(min = 1))]
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub uuid: Uuid,
    pub profile_type: String,
    pub coin: Decimal,
    pub coin_level: i64,
    pub earn_per_tab: i32,
    pub profit_per_hour: f64,
    pub image: Option<String>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            uuid: value.uuid,
            profile_type: value.profile_type,
            coin: value.coin,
            coin_level: value.coin_level,
            earn_per_tab: value.earn_per_tab,
            profit_per_hour: value.profit_per_hour,
            image: media_url_opt(value.image.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBrief {
    pub id: i64,
    pub tg_id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

impl From<User> for UserBrief {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            tg_id: value.tg_id,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
            avatar: media_url_opt(value.avatar.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub tg_id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_sound: bool,
    pub user_profile: Option<UserProfileResponse>,
}

impl UserResponse {
    pub fn from_parts(user: User, profile: Option<UserProfile>) -> Self {
        Self {
            id: user.id,
            tg_id: user.tg_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar: media_url_opt(user.avatar.as_deref()),
            is_sound: user.is_sound,
            user_profile: profile.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoinUpdatePayload {
    #[validate(range(min = 1))]
    pub coin_point: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SoundPayload {
    pub sound: bool,
}

/// One member of a tier listing, ranked by balance within the tier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedMember {
    pub rank: i64,
    pub user: UserBrief,
    pub user_profile: UserProfileResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TierResponse {
    pub name: String,
    pub image: String,
    pub coin_level: i64,
    pub users_data: Vec<RankedMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferralResponse {
    pub uuid: Uuid,
    pub invited_user: UserBrief,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferralPointsResponse {
    pub uuid: Uuid,
    pub points: Decimal,
}
