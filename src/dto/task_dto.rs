use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::task::ChannelTask;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChannelTaskResponse {
    pub uuid: Uuid,
    pub channel_name: String,
    pub channel_coin: i64,
    pub channel_link: String,
    pub channel_type: String,
    pub description: Option<String>,
    pub is_applied: bool,
}

impl ChannelTaskResponse {
    pub fn from_parts(task: ChannelTask, is_applied: bool) -> Self {
        Self {
            uuid: task.uuid,
            channel_name: task.channel_name,
            channel_coin: task.channel_coin,
            channel_link: task.channel_link,
            channel_type: task.channel_type,
            description: task.description,
            is_applied,
        }
    }
}

/// Tasks grouped under their task type; every known group is present
/// even when empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskGroupResponse {
    pub task_type: String,
    pub tasks: Vec<ChannelTaskResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct ChannelCheckQuery {
    pub secret_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChannelCheckResponse {
    pub msg: String,
}
