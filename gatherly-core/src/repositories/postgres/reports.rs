// src/repositories/postgres/reports.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;
use crate::Error;
use gatherly_common::models::Report;

#[async_trait]
pub trait ReportsRepository: Send + Sync {
    /// Insert a report. Returns false when the (reporter_id, post_id)
    /// uniqueness backstop swallowed the row, i.e. a concurrent or earlier
    /// duplicate won.
    async fn insert_report(&self, report: &Report) -> Result<bool, Error>;

    /// How many reports this reporter filed at or after `since`.
    async fn count_reports_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, Error>;

    /// Creation time of the reporter's oldest report at or after `since`.
    async fn oldest_report_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, Error>;

    async fn report_exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, Error>;

    async fn count_pending_for_post(&self, post_id: Uuid) -> Result<i64, Error>;
}

#[derive(Clone)]
pub struct PostgresReportsRepository {
    pool: Pool<Postgres>,
}

impl PostgresReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportsRepository for PostgresReportsRepository {
    async fn insert_report(&self, report: &Report) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO reports (
                report_id, reporter_id, post_id, reason,
                description, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (reporter_id, post_id) DO NOTHING
            "#,
        )
            .bind(report.report_id)
            .bind(report.reporter_id)
            .bind(report.post_id)
            .bind(report.reason)
            .bind(&report.description)
            .bind(report.status)
            .bind(report.created_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_reports_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS cnt
            FROM reports
            WHERE reporter_id = $1 AND created_at >= $2
            "#,
        )
            .bind(reporter_id)
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("cnt")?)
    }

    async fn oldest_report_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let row = sqlx::query(
            r#"
            SELECT MIN(created_at) AS oldest
            FROM reports
            WHERE reporter_id = $1 AND created_at >= $2
            "#,
        )
            .bind(reporter_id)
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("oldest")?)
    }

    async fn report_exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reports
                WHERE reporter_id = $1 AND post_id = $2
            ) AS present
            "#,
        )
            .bind(reporter_id)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("present")?)
    }

    async fn count_pending_for_post(&self, post_id: Uuid) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS cnt
            FROM reports
            WHERE post_id = $1 AND status = 'pending'
            "#,
        )
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("cnt")?)
    }
}
