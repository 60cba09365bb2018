use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::verify_password;
use crate::utils::telegram_auth::TelegramUser;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, tg_id, username, first_name, last_name, email, avatar, \
     password_hash, is_sound, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or refresh the local account for a verified Telegram
    /// identity. Returns the user and whether it was just created.
    pub async fn upsert_telegram_user(&self, tg: &TelegramUser) -> Result<(User, bool)> {
        let username = tg
            .username
            .clone()
            .unwrap_or_else(|| format!("tg_{}", tg.id));

        let existing = self.get_by_tg_id(tg.id).await?;
        let user = match existing {
            Some(current) => {
                let query = format!(
                    "UPDATE users
                     SET username = $2, first_name = $3, last_name = $4, updated_at = NOW()
                     WHERE id = $1
                     RETURNING {}",
                    USER_COLUMNS
                );
                let user = sqlx::query_as::<_, User>(&query)
                    .bind(current.id)
                    .bind(&username)
                    .bind(&tg.first_name)
                    .bind(&tg.last_name)
                    .fetch_one(&self.pool)
                    .await?;
                (user, false)
            }
            None => {
                let query = format!(
                    "INSERT INTO users (tg_id, username, first_name, last_name, avatar)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING {}",
                    USER_COLUMNS
                );
                let user = sqlx::query_as::<_, User>(&query)
                    .bind(tg.id)
                    .bind(&username)
                    .bind(&tg.first_name)
                    .bind(&tg.last_name)
                    .bind(&tg.photo_url)
                    .fetch_one(&self.pool)
                    .await?;
                (user, true)
            }
        };

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_by_tg_id(&self, tg_id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE tg_id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(tg_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_many(&self, ids: &[i64]) -> Result<Vec<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Username/password login for accounts that set a password.
    pub async fn password_login(&self, identifier: &str, password: &str) -> Result<User> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("User not found".to_string()))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(Error::Unauthorized("Password login is not enabled".to_string()));
        };
        let ok = verify_password(password, hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }
        Ok(user)
    }

    pub async fn set_sound(&self, user_id: i64, sound: bool) -> Result<User> {
        let query = format!(
            "UPDATE users SET is_sound = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(sound)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    /// Mirror the Telegram profile photo into the local media store so
    /// avatar URLs keep working after the remote link rotates. Runs
    /// best-effort; the remote URL stays in place when the download
    /// fails.
    pub async fn mirror_avatar(&self, user_id: i64, tg_id: i64, photo_url: &str) -> Result<()> {
        let bytes = reqwest::get(photo_url).await?.error_for_status()?.bytes().await?;

        let media_dir = crate::config::get_config().media_dir.clone();
        let rel_path = format!("avatars/tg_{}.jpg", tg_id);
        let dir = std::path::Path::new(&media_dir).join("avatars");
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(std::path::Path::new(&media_dir).join(&rel_path), &bytes).await?;

        sqlx::query("UPDATE users SET avatar = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(&rel_path)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
