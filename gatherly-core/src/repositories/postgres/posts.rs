// src/repositories/postgres/posts.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;
use crate::Error;
use gatherly_common::models::Post;

/// Read access to content items and their interaction counters.
#[async_trait]
pub trait PostsRepository: Send + Sync {
    async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>, Error>;

    /// All posts created at or after `since`, oldest first.
    async fn list_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Post>, Error>;

    /// Shares are tracked in a side table; absent row means zero.
    async fn get_shares_count(&self, post_id: Uuid) -> Result<i64, Error>;
}

#[derive(Clone)]
pub struct PostgresPostsRepository {
    pool: Pool<Postgres>,
}

impl PostgresPostsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostsRepository for PostgresPostsRepository {
    async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>, Error> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            SELECT post_id, author_id, content,
                   like_count, comment_count, view_count, created_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Post>, Error> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT post_id, author_id, content,
                   like_count, comment_count, view_count, created_at
            FROM posts
            WHERE created_at >= $1
            ORDER BY created_at ASC
            "#,
        )
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_shares_count(&self, post_id: Uuid) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT shares_count
            FROM post_shares
            WHERE post_id = $1
            "#,
        )
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(r.try_get("shares_count")?),
            None => Ok(0),
        }
    }
}
