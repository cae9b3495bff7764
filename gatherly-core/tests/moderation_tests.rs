// File: gatherly-core/tests/moderation_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use gatherly_common::models::{
    ModerationFlag, NewReport, Post, Report, ReportDecision, ReportReason, ReportRejection,
    ReportStatus,
};
use gatherly_core::Error;
use gatherly_core::repositories::postgres::moderation_queue::ModerationQueueRepository;
use gatherly_core::repositories::postgres::posts::PostsRepository;
use gatherly_core::repositories::postgres::reports::ReportsRepository;
use gatherly_core::services::ModerationService;

#[derive(Default)]
struct MockPostsRepo {
    posts: Mutex<HashMap<Uuid, Post>>,
}

#[async_trait]
impl PostsRepository for MockPostsRepo {
    async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>, Error> {
        Ok(self.posts.lock().unwrap().get(&post_id).cloned())
    }

    async fn list_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Post>, Error> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.created_at >= since)
            .cloned()
            .collect())
    }

    async fn get_shares_count(&self, _post_id: Uuid) -> Result<i64, Error> {
        Ok(0)
    }
}

/// In-memory reports table honoring the (reporter_id, post_id) uniqueness
/// backstop the real schema declares.
#[derive(Default)]
struct MockReportsRepo {
    reports: Mutex<Vec<Report>>,
    /// When set, the next insert reports a conflict even though the
    /// pre-check saw nothing, mimicking a lost race.
    conflict_next_insert: Mutex<bool>,
}

#[async_trait]
impl ReportsRepository for MockReportsRepo {
    async fn insert_report(&self, report: &Report) -> Result<bool, Error> {
        let mut conflict = self.conflict_next_insert.lock().unwrap();
        if *conflict {
            *conflict = false;
            return Ok(false);
        }
        drop(conflict);
        let mut reports = self.reports.lock().unwrap();
        let duplicate = reports
            .iter()
            .any(|r| r.reporter_id == report.reporter_id && r.post_id == report.post_id);
        if duplicate {
            return Ok(false);
        }
        reports.push(report.clone());
        Ok(true)
    }

    async fn count_reports_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, Error> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.reporter_id == reporter_id && r.created_at >= since)
            .count() as i64)
    }

    async fn oldest_report_since(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.reporter_id == reporter_id && r.created_at >= since)
            .map(|r| r.created_at)
            .min())
    }

    async fn report_exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, Error> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.reporter_id == reporter_id && r.post_id == post_id))
    }

    async fn count_pending_for_post(&self, post_id: Uuid) -> Result<i64, Error> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.post_id == post_id && r.status == ReportStatus::Pending)
            .count() as i64)
    }
}

#[derive(Default)]
struct MockQueueRepo {
    flags: Mutex<Vec<ModerationFlag>>,
}

#[async_trait]
impl ModerationQueueRepository for MockQueueRepo {
    async fn insert_flag(&self, flag: &ModerationFlag) -> Result<(), Error> {
        self.flags.lock().unwrap().push(flag.clone());
        Ok(())
    }
}

struct Fixture {
    posts_repo: Arc<MockPostsRepo>,
    reports_repo: Arc<MockReportsRepo>,
    queue_repo: Arc<MockQueueRepo>,
    service: ModerationService<MockReportsRepo, MockPostsRepo, MockQueueRepo>,
}

fn fixture() -> Fixture {
    let posts_repo = Arc::new(MockPostsRepo::default());
    let reports_repo = Arc::new(MockReportsRepo::default());
    let queue_repo = Arc::new(MockQueueRepo::default());
    let service = ModerationService::new(
        reports_repo.clone(),
        posts_repo.clone(),
        queue_repo.clone(),
    );
    Fixture {
        posts_repo,
        reports_repo,
        queue_repo,
        service,
    }
}

fn add_post(fx: &Fixture, author_id: Uuid) -> Uuid {
    let post = Post {
        post_id: Uuid::new_v4(),
        author_id,
        content: "questionable content".into(),
        like_count: 0,
        comment_count: 0,
        view_count: 0,
        created_at: Utc::now(),
    };
    let id = post.post_id;
    fx.posts_repo.posts.lock().unwrap().insert(id, post);
    id
}

fn seed_report(fx: &Fixture, reporter_id: Uuid, post_id: Uuid, age: Duration) {
    fx.reports_repo.reports.lock().unwrap().push(Report {
        report_id: Uuid::new_v4(),
        reporter_id,
        post_id,
        reason: ReportReason::Spam,
        description: None,
        status: ReportStatus::Pending,
        created_at: Utc::now() - age,
    });
}

fn submission(post_id: Uuid, reason: &str) -> NewReport {
    NewReport {
        post_id,
        reason: reason.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn valid_report_is_committed_as_pending() -> Result<(), Error> {
    let fx = fixture();
    let post_id = add_post(&fx, Uuid::new_v4());
    let reporter = Uuid::new_v4();

    let decision = fx.service.submit_report(reporter, &submission(post_id, "spam")).await?;
    let report = match decision {
        ReportDecision::Accepted(r) => r,
        other => panic!("expected acceptance, got {:?}", other),
    };
    assert_eq!(report.reporter_id, reporter);
    assert_eq!(report.post_id, post_id);
    assert_eq!(report.reason, ReportReason::Spam);
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(fx.reports_repo.reports.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_reason_is_rejected_without_store_access() -> Result<(), Error> {
    let fx = fixture();
    let post_id = add_post(&fx, Uuid::new_v4());

    let decision = fx
        .service
        .submit_report(Uuid::new_v4(), &submission(post_id, "because"))
        .await?;
    assert!(matches!(
        decision,
        ReportDecision::Rejected(ReportRejection::InvalidReason(_))
    ));
    assert!(fx.reports_repo.reports.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn overlong_description_is_rejected() -> Result<(), Error> {
    let fx = fixture();
    let post_id = add_post(&fx, Uuid::new_v4());

    let mut sub = submission(post_id, "spam");
    sub.description = Some("x".repeat(501));
    let decision = fx.service.submit_report(Uuid::new_v4(), &sub).await?;
    assert!(matches!(
        decision,
        ReportDecision::Rejected(ReportRejection::DescriptionTooLong { len: 501, max: 500 })
    ));

    // Boundary: exactly 500 characters passes.
    let mut sub = submission(post_id, "spam");
    sub.description = Some("x".repeat(500));
    let decision = fx.service.submit_report(Uuid::new_v4(), &sub).await?;
    assert!(matches!(decision, ReportDecision::Accepted(_)));
    Ok(())
}

#[tokio::test]
async fn reporting_a_missing_post_is_not_found() {
    let fx = fixture();
    let err = fx
        .service
        .submit_report(Uuid::new_v4(), &submission(Uuid::new_v4(), "spam"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn fifth_report_in_window_passes_sixth_is_rate_limited() -> Result<(), Error> {
    let fx = fixture();
    let reporter = Uuid::new_v4();

    // Four prior reports inside the trailing hour: the fifth goes through.
    for _ in 0..4 {
        let other_post = add_post(&fx, Uuid::new_v4());
        seed_report(&fx, reporter, other_post, Duration::minutes(30));
    }
    let post_id = add_post(&fx, Uuid::new_v4());
    let decision = fx.service.submit_report(reporter, &submission(post_id, "spam")).await?;
    assert!(matches!(decision, ReportDecision::Accepted(_)));

    // Now five inside the window: the sixth is turned away with a retry hint.
    let another_post = add_post(&fx, Uuid::new_v4());
    let decision = fx
        .service
        .submit_report(reporter, &submission(another_post, "harassment"))
        .await?;
    match decision {
        ReportDecision::Rejected(ReportRejection::RateLimited { retry_after_secs }) => {
            assert!(retry_after_secs > 0);
            assert!(retry_after_secs <= 3600);
        }
        other => panic!("expected rate limit, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn reports_outside_the_window_do_not_count() -> Result<(), Error> {
    let fx = fixture();
    let reporter = Uuid::new_v4();

    for _ in 0..5 {
        let other_post = add_post(&fx, Uuid::new_v4());
        seed_report(&fx, reporter, other_post, Duration::hours(2));
    }
    let post_id = add_post(&fx, Uuid::new_v4());
    let decision = fx.service.submit_report(reporter, &submission(post_id, "spam")).await?;
    assert!(matches!(decision, ReportDecision::Accepted(_)));
    Ok(())
}

#[tokio::test]
async fn second_report_for_same_post_is_a_duplicate() -> Result<(), Error> {
    let fx = fixture();
    let reporter = Uuid::new_v4();
    let post_id = add_post(&fx, Uuid::new_v4());

    let first = fx.service.submit_report(reporter, &submission(post_id, "spam")).await?;
    assert!(matches!(first, ReportDecision::Accepted(_)));

    // Different reason and description; still the same (reporter, post) pair.
    let mut retry = submission(post_id, "violence");
    retry.description = Some("second attempt".into());
    let second = fx.service.submit_report(reporter, &retry).await?;
    assert!(matches!(
        second,
        ReportDecision::Rejected(ReportRejection::Duplicate)
    ));
    assert_eq!(fx.reports_repo.reports.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn lost_insert_race_surfaces_as_duplicate() -> Result<(), Error> {
    // The pre-check passes but the unique constraint swallows the insert,
    // as happens when two submissions race.
    let fx = fixture();
    let reporter = Uuid::new_v4();
    let post_id = add_post(&fx, Uuid::new_v4());
    *fx.reports_repo.conflict_next_insert.lock().unwrap() = true;

    let decision = fx.service.submit_report(reporter, &submission(post_id, "spam")).await?;
    assert!(matches!(
        decision,
        ReportDecision::Rejected(ReportRejection::Duplicate)
    ));
    assert!(fx.reports_repo.reports.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn self_report_is_rejected() -> Result<(), Error> {
    let fx = fixture();
    let author = Uuid::new_v4();
    let post_id = add_post(&fx, author);

    let decision = fx.service.submit_report(author, &submission(post_id, "spam")).await?;
    assert!(matches!(
        decision,
        ReportDecision::Rejected(ReportRejection::SelfReport)
    ));
    assert!(fx.reports_repo.reports.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn third_pending_report_flags_the_post() -> Result<(), Error> {
    let fx = fixture();
    let post_id = add_post(&fx, Uuid::new_v4());

    seed_report(&fx, Uuid::new_v4(), post_id, Duration::minutes(5));
    seed_report(&fx, Uuid::new_v4(), post_id, Duration::minutes(3));
    assert!(fx.queue_repo.flags.lock().unwrap().is_empty());

    let decision = fx
        .service
        .submit_report(Uuid::new_v4(), &submission(post_id, "inappropriate"))
        .await?;
    assert!(matches!(decision, ReportDecision::Accepted(_)));

    let flags = fx.queue_repo.flags.lock().unwrap();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].post_id, post_id);
    assert_eq!(flags[0].report_count, 3);
    Ok(())
}

#[tokio::test]
async fn below_threshold_reports_do_not_flag() -> Result<(), Error> {
    let fx = fixture();
    let post_id = add_post(&fx, Uuid::new_v4());

    let decision = fx
        .service
        .submit_report(Uuid::new_v4(), &submission(post_id, "spam"))
        .await?;
    assert!(matches!(decision, ReportDecision::Accepted(_)));
    assert!(fx.queue_repo.flags.lock().unwrap().is_empty());
    Ok(())
}
