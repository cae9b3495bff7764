// src/repositories/postgres/moderation_queue.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use crate::Error;
use gatherly_common::models::ModerationFlag;

#[async_trait]
pub trait ModerationQueueRepository: Send + Sync {
    async fn insert_flag(&self, flag: &ModerationFlag) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct PostgresModerationQueueRepository {
    pool: Pool<Postgres>,
}

impl PostgresModerationQueueRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationQueueRepository for PostgresModerationQueueRepository {
    async fn insert_flag(&self, flag: &ModerationFlag) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO moderation_queue (
                queue_id, post_id, report_count, flagged_at
            )
            VALUES ($1, $2, $3, $4)
            "#,
        )
            .bind(flag.queue_id)
            .bind(flag.post_id)
            .bind(flag.report_count)
            .bind(flag.flagged_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
