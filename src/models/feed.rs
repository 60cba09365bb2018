use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedType {
    Reels,
    Advertisement,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Reels => "reels",
            FeedType::Advertisement => "advertisement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedCategory {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feed {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_file: Option<String>,
    pub thumbnail: Option<String>,
    pub feed_type: String,
    pub category_uuid: Uuid,
    pub send_feed: i32,
    pub feeds_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedLike {
    pub uuid: Uuid,
    pub user_id: i64,
    pub feed_uuid: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedComment {
    pub uuid: Uuid,
    pub user_id: i64,
    pub feed_uuid: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub comment_like_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedCommentLike {
    pub uuid: Uuid,
    pub user_id: i64,
    pub comment_uuid: Uuid,
    pub created_at: DateTime<Utc>,
}
