use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::account_dto::{
        CoinUpdatePayload, PasswordLoginPayload, ReferralPointsResponse, ReferralResponse,
        RefreshPayload, RefreshResponse, SoundPayload, TelegramAuthPayload, TelegramAuthResponse,
        TierResponse, TokenPairResponse, UserProfileResponse, UserResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    utils::telegram_auth::{verify_init_data, InitDataError},
    utils::time::unix_now,
    utils::token,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/account/auth/telegram",
    request_body = TelegramAuthPayload,
    responses(
        (status = 200, description = "Authenticated via Telegram", body = TelegramAuthResponse),
        (status = 400, description = "Malformed init data"),
        (status = 403, description = "Telegram verification failed")
    )
)]
#[axum::debug_handler]
pub async fn telegram_auth(
    State(state): State<AppState>,
    Json(payload): Json<TelegramAuthPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let config = crate::config::get_config();

    let tg_user = verify_init_data(&payload.init_data, &config.telegram_bot_token, unix_now())
        .map_err(|e| match e {
            InitDataError::BadSignature | InitDataError::Expired => {
                Error::Forbidden("Invalid Telegram authentication".to_string())
            }
            other => Error::BadRequest(other.to_string()),
        })?;

    let (user, created) = state.account_service.upsert_telegram_user(&tg_user).await?;
    if created {
        state.profile_service.create_for_user(user.id).await?;
    }

    if let Some(code) = payload.referral_code.as_deref() {
        if let Ok(inviter_tg_id) = code.parse::<i64>() {
            state
                .referral_service
                .create_referral(inviter_tg_id, user.id)
                .await?;
        }
    }

    if let Some(photo_url) = tg_user.photo_url.clone() {
        let accounts = state.account_service.clone();
        let (user_id, tg_id) = (user.id, tg_user.id);
        tokio::spawn(async move {
            if let Err(e) = accounts.mirror_avatar(user_id, tg_id, &photo_url).await {
                tracing::warn!("Failed to mirror Telegram avatar: {:?}", e);
            }
        });
    }

    let pair = token::issue_pair(
        user.id,
        &config.jwt_secret,
        config.access_token_ttl_minutes,
        config.refresh_token_ttl_days,
    )?;
    Ok(Json(TelegramAuthResponse {
        access_token: pair.access,
        refresh_token: pair.refresh,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/auth/token",
    request_body = PasswordLoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = TokenPairResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn password_login(
    State(state): State<AppState>,
    Json(payload): Json<PasswordLoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .account_service
        .password_login(&payload.identifier, &payload.password)
        .await?;

    let config = crate::config::get_config();
    let pair = token::issue_pair(
        user.id,
        &config.jwt_secret,
        config.access_token_ttl_minutes,
        config.refresh_token_ttl_days,
    )?;
    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/auth/token/refresh",
    request_body = RefreshPayload,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
#[axum::debug_handler]
pub async fn refresh_token(Json(payload): Json<RefreshPayload>) -> Result<impl IntoResponse> {
    payload.validate()?;
    let config = crate::config::get_config();
    let access = token::refresh_access(
        &payload.refresh,
        &config.jwt_secret,
        config.access_token_ttl_minutes,
    )?;
    Ok(Json(RefreshResponse { access }))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/profile",
    responses(
        (status = 200, description = "Authenticated user with profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let user = state
        .account_service
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    let profile = state.profile_service.get_by_user(user_id).await?;
    Ok(Json(UserResponse::from_parts(user, profile)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/account/coin",
    request_body = CoinUpdatePayload,
    responses(
        (status = 200, description = "Coin balance updated", body = UserProfileResponse),
        (status = 400, description = "coin_point is required"),
        (status = 404, description = "User profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_coin(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CoinUpdatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let profile = state
        .profile_service
        .add_tap_coins(user_id, payload.coin_point)
        .await?;
    Ok(Json(UserProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/account/sound",
    request_body = SoundPayload,
    responses(
        (status = 200, description = "Sound flag updated", body = UserResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_sound(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SoundPayload>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let user = state.account_service.set_sound(user_id, payload.sound).await?;
    let profile = state.profile_service.get_by_user(user_id).await?;
    Ok(Json(UserResponse::from_parts(user, profile)))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/profiles",
    responses(
        (status = 200, description = "Tier ladder with ranked members", body = Vec<TierResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_profiles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tiers = state.profile_service.list_tiers().await?;
    Ok(Json(tiers))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/referrals",
    responses(
        (status = 200, description = "Users invited by the caller", body = Vec<ReferralResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_referrals(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let referrals = state.referral_service.list_for_inviter(user_id).await?;
    let response: Vec<ReferralResponse> = referrals
        .into_iter()
        .map(|(referral, invited)| ReferralResponse {
            uuid: referral.uuid,
            invited_user: invited.into(),
            created_at: referral.created_at,
        })
        .collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/referral-points",
    responses(
        (status = 200, description = "Global referral points", body = Vec<ReferralPointsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn referral_points(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let points = state.referral_service.points().await?;
    let response: Vec<ReferralPointsResponse> = points
        .into_iter()
        .map(|p| ReferralPointsResponse {
            uuid: p.uuid,
            points: p.points,
        })
        .collect();
    Ok((StatusCode::OK, Json(response)))
}
