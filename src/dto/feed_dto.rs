use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::account_dto::UserBrief;
use crate::models::feed::{Feed, FeedCategory, FeedComment, FeedLike};
use crate::models::user::User;
use crate::utils::media::media_url_opt;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedCategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<FeedCategory> for FeedCategoryResponse {
    fn from(value: FeedCategory) -> Self {
        Self {
            uuid: value.uuid,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct FeedListQuery {
    /// Filter by category UUID.
    pub category: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedCommentResponse {
    pub uuid: Uuid,
    pub user: UserBrief,
    pub feed: Uuid,
    pub text: String,
    pub comment_like_count: i64,
    pub created_at: DateTime<Utc>,
}

impl FeedCommentResponse {
    pub fn from_parts(comment: FeedComment, user: User) -> Self {
        Self {
            uuid: comment.uuid,
            user: user.into(),
            feed: comment.feed_uuid,
            text: comment.text,
            comment_like_count: comment.comment_like_count.unwrap_or(0),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedLikeResponse {
    pub uuid: Uuid,
    pub user: UserBrief,
    pub feed: Uuid,
    pub created_at: DateTime<Utc>,
}

impl FeedLikeResponse {
    pub fn from_parts(like: FeedLike, user: User) -> Self {
        Self {
            uuid: like.uuid,
            user: user.into(),
            feed: like.feed_uuid,
            created_at: like.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_file: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub feed_type: String,
    pub feed_category: FeedCategoryResponse,
    pub feed_like_count: i64,
    pub feed_comment_count: i64,
    pub comment_list: Vec<FeedCommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl FeedResponse {
    pub fn from_parts(
        feed: Feed,
        category: FeedCategory,
        comments: Vec<FeedCommentResponse>,
    ) -> Self {
        Self {
            uuid: feed.uuid,
            name: feed.name,
            description: feed.description,
            video_file: media_url_opt(feed.video_file.as_deref()),
            thumbnail: media_url_opt(feed.thumbnail.as_deref()),
            feed_type: feed.feed_type,
            feed_category: category.into(),
            feed_like_count: feed.like_count.unwrap_or(0),
            feed_comment_count: feed.comment_count.unwrap_or(0),
            comment_list: comments,
            created_at: feed.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedDetailResponse {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_file: Option<String>,
    pub send_feed: i32,
    pub feeds_source: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub feed_type: String,
    pub feed_category: FeedCategoryResponse,
    pub feed_like_count: i64,
    pub feed_comment_count: i64,
    pub feed_like_list: Vec<FeedLikeResponse>,
    pub feed_comment_list: Vec<FeedCommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl FeedDetailResponse {
    pub fn from_parts(
        feed: Feed,
        category: FeedCategory,
        likes: Vec<FeedLikeResponse>,
        comments: Vec<FeedCommentResponse>,
    ) -> Self {
        Self {
            uuid: feed.uuid,
            name: feed.name,
            description: feed.description,
            video_file: media_url_opt(feed.video_file.as_deref()),
            send_feed: feed.send_feed,
            feeds_source: feed.feeds_source,
            thumbnail: media_url_opt(feed.thumbnail.as_deref()),
            feed_type: feed.feed_type,
            feed_category: category.into(),
            feed_like_count: feed.like_count.unwrap_or(0),
            feed_comment_count: feed.comment_count.unwrap_or(0),
            feed_like_list: likes,
            feed_comment_list: comments,
            created_at: feed.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentPayload {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}
