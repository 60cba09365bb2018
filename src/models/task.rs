use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Channel kinds a subscription task can point at. YouTube tasks are
/// verified with a secret code shown at the end of the video.
pub const CHANNEL_TYPES: [&str; 4] = ["youtube", "telegram", "x", "instagram"];

/// Task groups the client renders as separate lists.
pub const TASK_TYPES: [&str; 3] = ["video", "social", "special"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelTask {
    pub uuid: Uuid,
    pub channel_name: String,
    pub channel_link: String,
    pub channel_coin: i64,
    pub channel_type: String,
    pub task_type: String,
    pub secret_code: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelConnection {
    pub uuid: Uuid,
    pub user_id: i64,
    pub channel_uuid: Uuid,
    pub created_at: DateTime<Utc>,
}
