use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A content item in the community feed. The interaction counters live on
/// the row itself; shares are tracked out-of-band in `post_shares`.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Post {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}
