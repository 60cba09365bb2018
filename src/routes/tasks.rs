use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::task_dto::{ChannelCheckQuery, ChannelCheckResponse, TaskGroupResponse},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/account/channels",
    responses(
        (status = 200, description = "Channel tasks grouped by type", body = Vec<TaskGroupResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_channels(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let groups = state.task_service.list_grouped(user_id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/channels/{uuid}/check",
    params(
        ("uuid" = Uuid, Path, description = "Channel task UUID"),
        ("secret_code" = Option<String>, Query, description = "Verification code, required for YouTube tasks")
    ),
    responses(
        (status = 200, description = "Connected or already connected", body = ChannelCheckResponse),
        (status = 400, description = "Invalid secret code"),
        (status = 404, description = "Channel not found")
    )
)]
#[axum::debug_handler]
pub async fn check_channel(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
    Query(query): Query<ChannelCheckQuery>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let outcome = state
        .task_service
        .connect(user_id, uuid, query.secret_code.as_deref())
        .await?;
    Ok(Json(ChannelCheckResponse {
        msg: outcome.message().to_string(),
    }))
}
