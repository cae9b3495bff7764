// src/services/engagement_service.rs

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::error;
use uuid::Uuid;

use crate::Error;
use crate::repositories::postgres::engagement::EngagementRepository;
use crate::repositories::postgres::posts::PostsRepository;
use crate::scoring::engagement::engagement_breakdown;
use gatherly_common::models::{BatchOutcome, Post, PostEngagement};

/// Batch selection window: posts created within the trailing week.
const REFRESH_WINDOW_DAYS: i64 = 7;

/// Recomputes and persists derived engagement rows, one post at a time or
/// as a windowed batch. Safe to run concurrently with itself: the upsert is
/// keyed by post id and every pass fully recomputes from current counters,
/// so last-write-wins.
pub struct EngagementService<P, E>
where
    P: PostsRepository,
    E: EngagementRepository,
{
    posts_repo: Arc<P>,
    engagement_repo: Arc<E>,
}

impl<P, E> EngagementService<P, E>
where
    P: PostsRepository,
    E: EngagementRepository,
{
    pub fn new(posts_repo: Arc<P>, engagement_repo: Arc<E>) -> Self {
        Self {
            posts_repo,
            engagement_repo,
        }
    }

    /// Refresh one post, e.g. right after an interaction changed a counter.
    pub async fn refresh_post(&self, post_id: Uuid) -> Result<PostEngagement, Error> {
        self.refresh_post_at(post_id, Utc::now()).await
    }

    /// Same as [`refresh_post`](Self::refresh_post) with the computation
    /// instant pinned by the caller.
    pub async fn refresh_post_at(
        &self,
        post_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PostEngagement, Error> {
        let post = self
            .posts_repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {} not found", post_id)))?;

        let engagement = self.recompute(&post, now).await?;
        self.engagement_repo.upsert(&engagement).await?;
        Ok(engagement)
    }

    /// Refresh every post created within the trailing window. A failed
    /// selection query aborts the pass; a failure on an individual post is
    /// logged and skipped.
    pub async fn refresh_recent(&self) -> Result<BatchOutcome, Error> {
        self.refresh_recent_at(Utc::now()).await
    }

    /// Same as [`refresh_recent`](Self::refresh_recent) with the computation
    /// instant pinned by the caller.
    pub async fn refresh_recent_at(&self, now: DateTime<Utc>) -> Result<BatchOutcome, Error> {
        let since = now - Duration::days(REFRESH_WINDOW_DAYS);
        let posts = self.posts_repo.list_created_since(since).await?;
        let mut outcome = BatchOutcome::default();
        for post in &posts {
            let engagement = match self.recompute(post, now).await {
                Ok(e) => e,
                Err(e) => {
                    error!("Failed to recompute engagement for post {}: {:?}", post.post_id, e);
                    outcome.failed += 1;
                    continue;
                }
            };
            if let Err(e) = self.engagement_repo.upsert(&engagement).await {
                error!("Failed to upsert engagement for post {}: {:?}", post.post_id, e);
                outcome.failed += 1;
                continue;
            }
            outcome.processed += 1;
            outcome.results.push(engagement);
        }
        Ok(outcome)
    }

    async fn recompute(&self, post: &Post, now: DateTime<Utc>) -> Result<PostEngagement, Error> {
        let shares = self.posts_repo.get_shares_count(post.post_id).await?;

        let breakdown = engagement_breakdown(
            post.like_count.max(0),
            post.comment_count.max(0),
            post.view_count.max(0),
            post.created_at,
            now,
        );

        Ok(PostEngagement {
            post_id: post.post_id,
            score: breakdown.score,
            like_points: breakdown.like_points,
            comment_points: breakdown.comment_points,
            view_points: breakdown.view_points,
            shares_count: shares.max(0),
            computed_at: now,
        })
    }
}
