use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::task_dto::{ChannelTaskResponse, TaskGroupResponse};
use crate::error::{Error, Result};
use crate::models::task::{ChannelTask, TASK_TYPES};
use crate::services::profile_service::ProfileService;

const TASK_COLUMNS: &str = "uuid, channel_name, channel_link, channel_coin, channel_type, \
     task_type, secret_code, description, created_at";

/// Outcome of a channel check, surfaced verbatim to the client.
pub enum ConnectOutcome {
    Connected,
    AlreadyConnected,
}

impl ConnectOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ConnectOutcome::Connected => "Successfully connected",
            ConnectOutcome::AlreadyConnected => "Already connected",
        }
    }
}

#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All subscription tasks grouped by task type, with the caller's
    /// completion flag on each. Every known group appears even when it
    /// has no tasks.
    pub async fn list_grouped(&self, user_id: i64) -> Result<Vec<TaskGroupResponse>> {
        let query = format!(
            "SELECT {} FROM channel_tasks ORDER BY created_at",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, ChannelTask>(&query)
            .fetch_all(&self.pool)
            .await?;

        let applied: Vec<(Uuid,)> =
            sqlx::query_as("SELECT channel_uuid FROM channel_connections WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        let applied: std::collections::HashSet<Uuid> =
            applied.into_iter().map(|(uuid,)| uuid).collect();

        let mut groups = Vec::with_capacity(TASK_TYPES.len());
        for task_type in TASK_TYPES {
            let entries = tasks
                .iter()
                .filter(|t| t.task_type == task_type)
                .map(|t| {
                    let is_applied = applied.contains(&t.uuid);
                    ChannelTaskResponse::from_parts(t.clone(), is_applied)
                })
                .collect();
            groups.push(TaskGroupResponse {
                task_type: task_type.to_string(),
                tasks: entries,
            });
        }
        Ok(groups)
    }

    /// Mark a channel task completed for the user and credit the task
    /// reward; connection and credit commit together. YouTube tasks
    /// require the matching secret code.
    pub async fn connect(
        &self,
        user_id: i64,
        channel_uuid: Uuid,
        secret_code: Option<&str>,
    ) -> Result<ConnectOutcome> {
        let query = format!("SELECT {} FROM channel_tasks WHERE uuid = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, ChannelTask>(&query)
            .bind(channel_uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Channel not found".to_string()))?;

        if task.channel_type == "youtube" && task.secret_code.as_deref() != secret_code {
            return Err(Error::BadRequest("Invalid secret code".to_string()));
        }

        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            "INSERT INTO channel_connections (user_id, channel_uuid) VALUES ($1, $2)
             ON CONFLICT (user_id, channel_uuid) DO NOTHING",
        )
        .bind(user_id)
        .bind(task.uuid)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(ConnectOutcome::AlreadyConnected);
        }

        ProfileService::credit(&mut tx, user_id, Decimal::from(task.channel_coin)).await?;
        tx.commit().await?;

        tracing::info!(user_id, channel = %task.channel_name, "channel task completed");
        Ok(ConnectOutcome::Connected)
    }
}
