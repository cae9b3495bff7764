// src/repositories/postgres/engagement.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use crate::Error;
use gatherly_common::models::PostEngagement;

/// Persistence for the derived engagement rows.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Insert-or-overwrite keyed by post id. Re-running with unchanged
    /// counters must persist the same row.
    async fn upsert(&self, engagement: &PostEngagement) -> Result<(), Error>;

    async fn get(&self, post_id: Uuid) -> Result<Option<PostEngagement>, Error>;
}

#[derive(Clone)]
pub struct PostgresEngagementRepository {
    pool: Pool<Postgres>,
}

impl PostgresEngagementRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn upsert(&self, engagement: &PostEngagement) -> Result<(), Error> {
        // Overwrite rather than increment: the score is always fully
        // recomputed from current counters.
        sqlx::query(
            r#"
            INSERT INTO post_engagement (
                post_id, score, like_points, comment_points,
                view_points, shares_count, computed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (post_id) DO UPDATE
              SET score = EXCLUDED.score,
                  like_points = EXCLUDED.like_points,
                  comment_points = EXCLUDED.comment_points,
                  view_points = EXCLUDED.view_points,
                  shares_count = EXCLUDED.shares_count,
                  computed_at = EXCLUDED.computed_at
            "#,
        )
            .bind(engagement.post_id)
            .bind(engagement.score)
            .bind(engagement.like_points)
            .bind(engagement.comment_points)
            .bind(engagement.view_points)
            .bind(engagement.shares_count)
            .bind(engagement.computed_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, post_id: Uuid) -> Result<Option<PostEngagement>, Error> {
        let row = sqlx::query_as::<_, PostEngagement>(
            r#"
            SELECT post_id, score, like_points, comment_points,
                   view_points, shares_count, computed_at
            FROM post_engagement
            WHERE post_id = $1
            "#,
        )
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}
