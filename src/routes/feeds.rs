use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::feed_dto::{
        CreateCommentPayload, FeedCategoryResponse, FeedCommentResponse, FeedDetailResponse,
        FeedLikeResponse, FeedListQuery, FeedResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/feeds/categories",
    responses(
        (status = 200, description = "Feed categories", body = Vec<FeedCategoryResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.feed_service.list_categories().await?;
    let response: Vec<FeedCategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/feeds/feeds",
    params(
        ("category" = Option<Uuid>, Query, description = "Filter by category UUID")
    ),
    responses(
        (status = 200, description = "Interleaved feed page", body = Vec<FeedResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_feeds(
    State(state): State<AppState>,
    Query(query): Query<FeedListQuery>,
) -> Result<impl IntoResponse> {
    let feeds = state.feed_service.list_page(query.category).await?;

    let category_uuids: Vec<Uuid> = feeds.iter().map(|f| f.category_uuid).collect();
    let categories = state.feed_service.categories_by_uuid(&category_uuids).await?;

    let feed_uuids: Vec<Uuid> = feeds.iter().map(|f| f.uuid).collect();
    let mut comments_by_feed: std::collections::HashMap<Uuid, Vec<FeedCommentResponse>> =
        std::collections::HashMap::new();
    for (comment, user) in state.feed_service.comments_for_feeds(&feed_uuids).await? {
        comments_by_feed
            .entry(comment.feed_uuid)
            .or_default()
            .push(FeedCommentResponse::from_parts(comment, user));
    }

    let mut response = Vec::with_capacity(feeds.len());
    for feed in feeds {
        let Some(category) = categories.get(&feed.category_uuid).cloned() else {
            continue;
        };
        let comments = comments_by_feed.remove(&feed.uuid).unwrap_or_default();
        response.push(FeedResponse::from_parts(feed, category, comments));
    }
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/feeds/feeds/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Feed UUID")
    ),
    responses(
        (status = 200, description = "Feed detail", body = FeedDetailResponse),
        (status = 404, description = "Feed not found")
    )
)]
#[axum::debug_handler]
pub async fn get_feed(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let feed = state.feed_service.get_feed(uuid).await?;
    let category = state.feed_service.get_category(feed.category_uuid).await?;

    let likes = state
        .feed_service
        .likes_for_feed(feed.uuid)
        .await?
        .into_iter()
        .map(|(like, user)| FeedLikeResponse::from_parts(like, user))
        .collect();
    let comments = state
        .feed_service
        .comments_for_feeds(&[feed.uuid])
        .await?
        .into_iter()
        .map(|(comment, user)| FeedCommentResponse::from_parts(comment, user))
        .collect();

    Ok(Json(FeedDetailResponse::from_parts(
        feed, category, likes, comments,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/feeds/feeds/comments/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Feed UUID")
    ),
    request_body = CreateCommentPayload,
    responses(
        (status = 200, description = "Comment created", body = FeedCommentResponse),
        (status = 404, description = "Feed not found")
    )
)]
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let user = state
        .account_service
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    let comment = state
        .feed_service
        .create_comment(user_id, uuid, &payload.text)
        .await?;
    Ok(Json(FeedCommentResponse::from_parts(comment, user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/feeds/feeds/comments/like/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Comment UUID")
    ),
    responses(
        (status = 200, description = "Comment liked"),
        (status = 400, description = "Already liked"),
        (status = 404, description = "Comment not found")
    )
)]
#[axum::debug_handler]
pub async fn like_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    state.feed_service.like_comment(user_id, uuid).await?;
    Ok((StatusCode::OK, Json(json!({"msg": "Comment liked"}))))
}

#[utoipa::path(
    post,
    path = "/api/v1/feeds/feeds/comments/dislike/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Comment UUID")
    ),
    responses(
        (status = 200, description = "Comment like removed"),
        (status = 404, description = "Comment like not found")
    )
)]
#[axum::debug_handler]
pub async fn dislike_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    state.feed_service.unlike_comment(user_id, uuid).await?;
    Ok((StatusCode::OK, Json(json!({"msg": "Comment like removed"}))))
}

#[utoipa::path(
    post,
    path = "/api/v1/feeds/feeds/likes/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Feed UUID")
    ),
    responses(
        (status = 200, description = "Feed liked", body = FeedLikeResponse),
        (status = 400, description = "Already liked"),
        (status = 404, description = "Feed not found")
    )
)]
#[axum::debug_handler]
pub async fn like_feed(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let user = state
        .account_service
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    let like = state.feed_service.like_feed(user_id, uuid).await?;
    Ok(Json(FeedLikeResponse::from_parts(like, user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/feeds/feeds/dislike/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Feed UUID")
    ),
    responses(
        (status = 200, description = "Feed like removed"),
        (status = 404, description = "Feed like not found")
    )
)]
#[axum::debug_handler]
pub async fn dislike_feed(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    state.feed_service.unlike_feed(user_id, uuid).await?;
    Ok((StatusCode::OK, Json(json!({"msg": "Feed like removed"}))))
}
