// src/services/moderation_service.rs

use std::str::FromStr;
use std::sync::Arc;
use chrono::{Duration, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::Error;
use crate::repositories::postgres::moderation_queue::ModerationQueueRepository;
use crate::repositories::postgres::posts::PostsRepository;
use crate::repositories::postgres::reports::ReportsRepository;
use gatherly_common::models::{
    ModerationFlag, NewReport, Report, ReportDecision, ReportReason, ReportRejection,
    ReportStatus,
};

/// Admission policy for report submission.
#[derive(Debug, Clone)]
pub struct ReportPolicy {
    /// Rolling window over which reports per reporter are counted.
    pub window_secs: i64,
    /// Maximum reports one reporter may file inside the window.
    pub max_reports_per_window: i64,
    pub max_description_chars: usize,
    /// Pending-report count at which a post is flagged for staff review.
    pub escalation_threshold: i64,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            window_secs: 3600,
            max_reports_per_window: 5,
            max_description_chars: 500,
            escalation_threshold: 3,
        }
    }
}

/// Admission control in front of report creation. Checks run in a fixed
/// order: input validation, post lookup, rate window, duplicate, self-report,
/// then the insert. Rejections are data, not errors, so each one keeps its
/// own reason code all the way to the caller.
pub struct ModerationService<R, P, Q>
where
    R: ReportsRepository,
    P: PostsRepository,
    Q: ModerationQueueRepository,
{
    reports_repo: Arc<R>,
    posts_repo: Arc<P>,
    queue_repo: Arc<Q>,
    policy: ReportPolicy,
}

impl<R, P, Q> ModerationService<R, P, Q>
where
    R: ReportsRepository,
    P: PostsRepository,
    Q: ModerationQueueRepository,
{
    pub fn new(reports_repo: Arc<R>, posts_repo: Arc<P>, queue_repo: Arc<Q>) -> Self {
        Self::with_policy(reports_repo, posts_repo, queue_repo, ReportPolicy::default())
    }

    pub fn with_policy(
        reports_repo: Arc<R>,
        posts_repo: Arc<P>,
        queue_repo: Arc<Q>,
        policy: ReportPolicy,
    ) -> Self {
        Self {
            reports_repo,
            posts_repo,
            queue_repo,
            policy,
        }
    }

    pub async fn submit_report(
        &self,
        reporter_id: Uuid,
        submission: &NewReport,
    ) -> Result<ReportDecision, Error> {
        // Validation first; nothing below touches the store until it passes.
        let reason = match ReportReason::from_str(&submission.reason) {
            Ok(r) => r,
            Err(_) => {
                return Ok(ReportDecision::Rejected(ReportRejection::InvalidReason(
                    submission.reason.clone(),
                )));
            }
        };

        if let Some(desc) = &submission.description {
            let len = desc.chars().count();
            if len > self.policy.max_description_chars {
                return Ok(ReportDecision::Rejected(ReportRejection::DescriptionTooLong {
                    len,
                    max: self.policy.max_description_chars,
                }));
            }
        }

        let post = self
            .posts_repo
            .get_post(submission.post_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {} not found", submission.post_id)))?;

        let now = Utc::now();
        let window_start = now - Duration::seconds(self.policy.window_secs);

        let recent = self
            .reports_repo
            .count_reports_since(reporter_id, window_start)
            .await?;
        if recent >= self.policy.max_reports_per_window {
            let retry_after_secs = match self
                .reports_repo
                .oldest_report_since(reporter_id, window_start)
                .await?
            {
                Some(oldest) => {
                    (oldest + Duration::seconds(self.policy.window_secs) - now)
                        .num_seconds()
                        .max(1)
                }
                None => self.policy.window_secs,
            };
            return Ok(ReportDecision::Rejected(ReportRejection::RateLimited {
                retry_after_secs,
            }));
        }

        if self
            .reports_repo
            .report_exists(reporter_id, submission.post_id)
            .await?
        {
            return Ok(ReportDecision::Rejected(ReportRejection::Duplicate));
        }

        if post.author_id == reporter_id {
            return Ok(ReportDecision::Rejected(ReportRejection::SelfReport));
        }

        let report = Report {
            report_id: Uuid::new_v4(),
            reporter_id,
            post_id: submission.post_id,
            reason,
            description: submission.description.clone(),
            status: ReportStatus::Pending,
            created_at: now,
        };

        // The unique (reporter_id, post_id) constraint is the real duplicate
        // guard; a lost race shows up here as zero rows inserted.
        let inserted = self.reports_repo.insert_report(&report).await?;
        if !inserted {
            return Ok(ReportDecision::Rejected(ReportRejection::Duplicate));
        }

        self.maybe_escalate(submission.post_id).await;

        Ok(ReportDecision::Accepted(report))
    }

    /// Fire-and-forget: a failure to enqueue never rolls back the report.
    async fn maybe_escalate(&self, post_id: Uuid) {
        let pending = match self.reports_repo.count_pending_for_post(post_id).await {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to count pending reports for post {}: {:?}", post_id, e);
                return;
            }
        };

        if pending < self.policy.escalation_threshold {
            return;
        }

        let flag = ModerationFlag {
            queue_id: Uuid::new_v4(),
            post_id,
            report_count: pending,
            flagged_at: Utc::now(),
        };
        if let Err(e) = self.queue_repo.insert_flag(&flag).await {
            error!("Failed to flag post {} for moderation: {:?}", post_id, e);
        } else {
            info!("Post {} flagged for moderation with {} pending reports", post_id, pending);
        }
    }
}
