// gatherly-core/src/tasks/engagement_refresh.rs

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};

use crate::repositories::postgres::engagement::EngagementRepository;
use crate::repositories::postgres::posts::PostsRepository;
use crate::services::engagement_service::EngagementService;

/// Spawns a background task that periodically recomputes engagement for
/// every post in the trailing window.
pub fn spawn_engagement_refresh_task<P, E>(
    service: Arc<EngagementService<P, E>>,
    interval: Duration,
) -> JoinHandle<()>
where
    P: PostsRepository + 'static,
    E: EngagementRepository + 'static,
{
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            match service.refresh_recent().await {
                Ok(outcome) => {
                    info!(
                        "Engagement refresh pass: {} processed, {} failed",
                        outcome.processed, outcome.failed
                    );
                }
                Err(e) => {
                    error!("Engagement refresh pass aborted: {:?}", e);
                }
            }
        }
    })
}
