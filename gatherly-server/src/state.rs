// gatherly-server/src/state.rs

use std::sync::Arc;

use gatherly_core::Database;
use gatherly_core::repositories::postgres::{
    PostgresEngagementRepository, PostgresModerationQueueRepository, PostgresPostsRepository,
    PostgresReportsRepository, PostgresVendorsRepository,
};
use gatherly_core::services::{EngagementService, ModerationService, VendorSearchService};

pub type Engagement = EngagementService<PostgresPostsRepository, PostgresEngagementRepository>;
pub type Moderation = ModerationService<
    PostgresReportsRepository,
    PostgresPostsRepository,
    PostgresModerationQueueRepository,
>;
pub type VendorSearch = VendorSearchService<PostgresVendorsRepository>;

/// Process-wide services, constructed once at startup and handed to every
/// handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub engagement: Arc<Engagement>,
    pub moderation: Arc<Moderation>,
    pub vendor_search: Arc<VendorSearch>,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        let posts_repo = Arc::new(PostgresPostsRepository::new(db.pool().clone()));
        let engagement_repo = Arc::new(PostgresEngagementRepository::new(db.pool().clone()));
        let reports_repo = Arc::new(PostgresReportsRepository::new(db.pool().clone()));
        let queue_repo = Arc::new(PostgresModerationQueueRepository::new(db.pool().clone()));
        let vendors_repo = Arc::new(PostgresVendorsRepository::new(db.pool().clone()));

        let engagement = Arc::new(EngagementService::new(
            posts_repo.clone(),
            engagement_repo,
        ));
        let moderation = Arc::new(ModerationService::new(
            reports_repo,
            posts_repo,
            queue_repo,
        ));
        let vendor_search = Arc::new(VendorSearchService::new(vendors_repo));

        Self {
            engagement,
            moderation,
            vendor_search,
        }
    }
}
