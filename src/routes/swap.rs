use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::swap_dto::{CreateSwapPayload, SwapResponse},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/token_swap/token-swap",
    request_body = CreateSwapPayload,
    responses(
        (status = 201, description = "Token swap recorded", body = SwapResponse),
        (status = 400, description = "Invalid amounts")
    )
)]
#[axum::debug_handler]
pub async fn create_swap(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateSwapPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let swap = state.swap_service.create(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(SwapResponse::from(swap))))
}
