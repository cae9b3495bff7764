use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived engagement row for one post. Purely a function of the post's
/// counters and the computation instant; may be stale between refresh
/// passes and is never read back as a source of truth for the counters.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct PostEngagement {
    pub post_id: Uuid,
    pub score: f64,
    pub like_points: f64,
    pub comment_points: f64,
    pub view_points: f64,
    pub shares_count: i64,
    pub computed_at: DateTime<Utc>,
}

/// Outcome of one batch refresh pass.
#[derive(Debug, Serialize, Clone, Default)]
pub struct BatchOutcome {
    pub processed: usize,
    pub failed: usize,
    pub results: Vec<PostEngagement>,
}
