// src/scoring/engagement.rs

use chrono::{DateTime, Utc};

/// Interaction weights. Comments outweigh likes (deeper engagement signal);
/// views are the cheap, high-volume signal and count for almost nothing.
pub const LIKE_WEIGHT: f64 = 2.0;
pub const COMMENT_WEIGHT: f64 = 5.0;
pub const VIEW_WEIGHT: f64 = 0.01;

/// Decay constant in hours: score drops to 1/e of its raw value at 48h.
pub const DECAY_HOURS: f64 = 48.0;

/// Weighted components of one score computation, pre-decay, plus the decay
/// factor that was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementBreakdown {
    pub like_points: f64,
    pub comment_points: f64,
    pub view_points: f64,
    pub recency_factor: f64,
    pub score: f64,
}

/// Compute the full breakdown for one content item.
///
/// Pure math, no failure path. Counters are expected non-negative (the
/// caller clamps); a `created_at` in the future counts as age zero.
pub fn engagement_breakdown(
    like_count: i64,
    comment_count: i64,
    view_count: i64,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EngagementBreakdown {
    let like_points = like_count as f64 * LIKE_WEIGHT;
    let comment_points = comment_count as f64 * COMMENT_WEIGHT;
    let view_points = view_count as f64 * VIEW_WEIGHT;

    let age_secs = (now - created_at).num_seconds().max(0);
    let age_hours = age_secs as f64 / 3600.0;
    let recency_factor = (-age_hours / DECAY_HOURS).exp();

    let raw = like_points + comment_points + view_points;
    EngagementBreakdown {
        like_points,
        comment_points,
        view_points,
        recency_factor,
        score: raw * recency_factor,
    }
}

/// Just the final score.
pub fn engagement_score(
    like_count: i64,
    comment_count: i64,
    view_count: i64,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    engagement_breakdown(like_count, comment_count, view_count, created_at, now).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn zero_counters_score_zero_at_any_age() {
        let now = Utc::now();
        for hours in [0i64, 1, 48, 1000] {
            let created = now - Duration::hours(hours);
            assert_eq!(engagement_score(0, 0, 0, created, now), 0.0);
        }
    }

    #[test]
    fn score_strictly_decreases_with_age() {
        let now = Utc::now();
        let newer = engagement_score(10, 5, 100, now - Duration::hours(2), now);
        let older = engagement_score(10, 5, 100, now - Duration::hours(20), now);
        let oldest = engagement_score(10, 5, 100, now - Duration::hours(200), now);
        assert!(newer > older);
        assert!(older > oldest);
    }

    #[test]
    fn comment_beats_like_beats_view() {
        let now = Utc::now();
        let created = now - Duration::hours(10);
        let base = engagement_score(10, 10, 10, created, now);
        let plus_comment = engagement_score(10, 11, 10, created, now);
        let plus_like = engagement_score(11, 10, 10, created, now);
        let plus_view = engagement_score(10, 10, 11, created, now);
        assert!(plus_comment - base > plus_like - base);
        assert!(plus_like - base > plus_view - base);
        assert!(plus_view - base > 0.0);
    }

    #[test]
    fn worked_example_at_48_hours() {
        // 100 likes, 20 comments, 1000 views, exactly one decay constant old:
        // raw = 200 + 100 + 10 = 310, factor = e^-1, score ~ 114.0
        let now = Utc::now();
        let created = now - Duration::hours(48);
        let score = engagement_score(100, 20, 1000, created, now);
        assert!((score - 114.0).abs() < 0.1, "got {}", score);
    }

    #[test]
    fn future_created_at_counts_as_brand_new() {
        let now = Utc::now();
        let created = now + Duration::hours(5);
        let score = engagement_score(1, 0, 0, created, now);
        assert_eq!(score, LIKE_WEIGHT);
    }

    #[test]
    fn breakdown_components_sum_to_raw() {
        let now = Utc::now();
        let b = engagement_breakdown(3, 2, 500, now, now);
        assert_eq!(b.like_points, 6.0);
        assert_eq!(b.comment_points, 10.0);
        assert_eq!(b.view_points, 5.0);
        assert!((b.recency_factor - 1.0).abs() < 1e-9);
        assert!((b.score - 21.0).abs() < 1e-9);
    }
}
