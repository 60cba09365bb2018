use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::feed::{Feed, FeedCategory, FeedComment, FeedLike, FeedType};
use crate::models::user::User;

/// One feed page is 24 slots; the 1-indexed slots below are reserved
/// for sponsored content.
pub const FEED_PAGE_SLOTS: usize = 24;
pub const SPONSORED_SLOTS: [usize; 4] = [5, 10, 15, 20];

const REELS_SAMPLE: i64 = 20;
const ADS_SAMPLE: i64 = 4;

const FEED_COLUMNS: &str = "f.uuid, f.name, f.description, f.video_file, f.thumbnail, \
     f.feed_type, f.category_uuid, f.send_feed, f.feeds_source, f.created_at, \
     (SELECT COUNT(*) FROM feed_likes l WHERE l.feed_uuid = f.uuid) AS like_count, \
     (SELECT COUNT(*) FROM feed_comments c WHERE c.feed_uuid = f.uuid) AS comment_count";

const USER_COLUMNS: &str = "id, tg_id, username, first_name, last_name, email, avatar, \
     password_hash, is_sound, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct FeedService {
    pool: PgPool,
}

/// Merge organic and sponsored items into a fixed-size page. Slots in
/// [`SPONSORED_SLOTS`] draw from the sponsored pool, every other slot
/// draws from the organic pool in order; an exhausted pool just leaves
/// its slots out.
pub fn interleave<T>(organic: Vec<T>, sponsored: Vec<T>) -> Vec<T> {
    let mut result = Vec::with_capacity(FEED_PAGE_SLOTS);
    let mut organic_iter = organic.into_iter();
    let mut sponsored_iter = sponsored.into_iter();

    for slot in 1..=FEED_PAGE_SLOTS {
        if SPONSORED_SLOTS.contains(&slot) {
            if let Some(item) = sponsored_iter.next() {
                result.push(item);
            }
        } else if let Some(item) = organic_iter.next() {
            result.push(item);
        }
    }
    result
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<FeedCategory>> {
        let categories = sqlx::query_as::<_, FeedCategory>(
            "SELECT uuid, name, created_at FROM feed_categories ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn get_category(&self, uuid: Uuid) -> Result<FeedCategory> {
        let category = sqlx::query_as::<_, FeedCategory>(
            "SELECT uuid, name, created_at FROM feed_categories WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn categories_by_uuid(
        &self,
        uuids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, FeedCategory>> {
        let categories = sqlx::query_as::<_, FeedCategory>(
            "SELECT uuid, name, created_at FROM feed_categories WHERE uuid = ANY($1)",
        )
        .bind(uuids)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories.into_iter().map(|c| (c.uuid, c)).collect())
    }

    async fn sample(
        &self,
        feed_type: FeedType,
        category: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Feed>> {
        let mut query = format!(
            "SELECT {} FROM feeds f WHERE f.feed_type = $1",
            FEED_COLUMNS
        );
        if category.is_some() {
            query.push_str(" AND f.category_uuid = $3");
        }
        query.push_str(" ORDER BY RANDOM() LIMIT $2");

        let mut statement = sqlx::query_as::<_, Feed>(&query)
            .bind(feed_type.as_str())
            .bind(limit);
        if let Some(category) = category {
            statement = statement.bind(category);
        }
        let feeds = statement.fetch_all(&self.pool).await?;
        Ok(feeds)
    }

    /// A page of randomly sampled reels with sponsored items pinned to
    /// their reserved slots.
    pub async fn list_page(&self, category: Option<Uuid>) -> Result<Vec<Feed>> {
        let reels = self.sample(FeedType::Reels, category, REELS_SAMPLE).await?;
        let ads = self
            .sample(FeedType::Advertisement, category, ADS_SAMPLE)
            .await?;
        Ok(interleave(reels, ads))
    }

    pub async fn get_feed(&self, uuid: Uuid) -> Result<Feed> {
        let query = format!("SELECT {} FROM feeds f WHERE f.uuid = $1", FEED_COLUMNS);
        let feed = sqlx::query_as::<_, Feed>(&query)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Feed not found".to_string()))?;
        Ok(feed)
    }

    /// Comments (with their authors and like counts) for a set of
    /// feeds, oldest first.
    pub async fn comments_for_feeds(
        &self,
        feed_uuids: &[Uuid],
    ) -> Result<Vec<(FeedComment, User)>> {
        let comments = sqlx::query_as::<_, FeedComment>(
            "SELECT c.uuid, c.user_id, c.feed_uuid, c.text, c.created_at, \
             (SELECT COUNT(*) FROM feed_comment_likes cl WHERE cl.comment_uuid = c.uuid) AS comment_like_count \
             FROM feed_comments c WHERE c.feed_uuid = ANY($1) ORDER BY c.created_at",
        )
        .bind(feed_uuids)
        .fetch_all(&self.pool)
        .await?;
        self.attach_users(comments, |c| c.user_id).await
    }

    pub async fn likes_for_feed(&self, feed_uuid: Uuid) -> Result<Vec<(FeedLike, User)>> {
        let likes = sqlx::query_as::<_, FeedLike>(
            "SELECT uuid, user_id, feed_uuid, created_at FROM feed_likes
             WHERE feed_uuid = $1 ORDER BY created_at",
        )
        .bind(feed_uuid)
        .fetch_all(&self.pool)
        .await?;
        self.attach_users(likes, |l| l.user_id).await
    }

    async fn attach_users<T>(
        &self,
        items: Vec<T>,
        user_id: impl Fn(&T) -> i64,
    ) -> Result<Vec<(T, User)>> {
        let ids: Vec<i64> = items.iter().map(&user_id).collect();
        let query = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;
        let by_id: std::collections::HashMap<i64, User> =
            users.into_iter().map(|u| (u.id, u)).collect();
        Ok(items
            .into_iter()
            .filter_map(|item| by_id.get(&user_id(&item)).cloned().map(|u| (item, u)))
            .collect())
    }

    pub async fn create_comment(
        &self,
        user_id: i64,
        feed_uuid: Uuid,
        text: &str,
    ) -> Result<FeedComment> {
        self.get_feed(feed_uuid).await?;
        let comment = sqlx::query_as::<_, FeedComment>(
            "INSERT INTO feed_comments (user_id, feed_uuid, text) VALUES ($1, $2, $3)
             RETURNING uuid, user_id, feed_uuid, text, created_at, 0::BIGINT AS comment_like_count",
        )
        .bind(user_id)
        .bind(feed_uuid)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn like_feed(&self, user_id: i64, feed_uuid: Uuid) -> Result<FeedLike> {
        self.get_feed(feed_uuid).await?;
        let like = sqlx::query_as::<_, FeedLike>(
            "INSERT INTO feed_likes (user_id, feed_uuid) VALUES ($1, $2)
             ON CONFLICT (user_id, feed_uuid) DO NOTHING
             RETURNING uuid, user_id, feed_uuid, created_at",
        )
        .bind(user_id)
        .bind(feed_uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::BadRequest("Feed is already liked".to_string()))?;
        Ok(like)
    }

    pub async fn unlike_feed(&self, user_id: i64, feed_uuid: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM feed_likes WHERE user_id = $1 AND feed_uuid = $2")
            .bind(user_id)
            .bind(feed_uuid)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Feed like not found".to_string()));
        }
        Ok(())
    }

    pub async fn like_comment(&self, user_id: i64, comment_uuid: Uuid) -> Result<()> {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT uuid FROM feed_comments WHERE uuid = $1")
                .bind(comment_uuid)
                .fetch_optional(&self.pool)
                .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Comment not found".to_string()));
        }

        let inserted = sqlx::query(
            "INSERT INTO feed_comment_likes (user_id, comment_uuid) VALUES ($1, $2)
             ON CONFLICT (user_id, comment_uuid) DO NOTHING",
        )
        .bind(user_id)
        .bind(comment_uuid)
        .execute(&self.pool)
        .await?;
        if inserted.rows_affected() == 0 {
            return Err(Error::BadRequest("Comment is already liked".to_string()));
        }
        Ok(())
    }

    pub async fn unlike_comment(&self, user_id: i64, comment_uuid: Uuid) -> Result<()> {
        let res =
            sqlx::query("DELETE FROM feed_comment_likes WHERE user_id = $1 AND comment_uuid = $2")
                .bind(user_id)
                .bind(comment_uuid)
                .execute(&self.pool)
                .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Comment like not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pools_fill_all_slots() {
        let organic: Vec<i32> = (1..=20).collect();
        let sponsored: Vec<i32> = (101..=104).collect();
        let page = interleave(organic, sponsored);

        assert_eq!(page.len(), FEED_PAGE_SLOTS);
        // 0-indexed positions of the sponsored slots.
        assert_eq!(page[4], 101);
        assert_eq!(page[9], 102);
        assert_eq!(page[14], 103);
        assert_eq!(page[19], 104);
        let organic_only: Vec<i32> = page.iter().copied().filter(|v| *v < 100).collect();
        assert_eq!(organic_only, (1..=20).collect::<Vec<i32>>());
    }

    #[test]
    fn exhausted_sponsored_pool_skips_its_slots() {
        let organic: Vec<i32> = (1..=20).collect();
        let page = interleave(organic.clone(), vec![101]);
        assert_eq!(page.len(), 21);
        assert_eq!(page[4], 101);
        let organic_only: Vec<i32> = page.iter().copied().filter(|v| *v < 100).collect();
        assert_eq!(organic_only, organic);
    }

    #[test]
    fn exhausted_organic_pool_keeps_sponsored_order() {
        let page = interleave(vec![1, 2, 3], vec![101, 102, 103, 104]);
        assert_eq!(page, vec![1, 2, 3, 101, 102, 103, 104]);
    }

    #[test]
    fn empty_pools_yield_an_empty_page() {
        let page: Vec<i32> = interleave(vec![], vec![]);
        assert!(page.is_empty());
    }
}
