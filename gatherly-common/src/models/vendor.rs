// File: gatherly-common/src/models/vendor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct VendorProfile {
    pub vendor_id: Uuid,
    pub display_name: String,
    pub city: Option<String>,
    /// Average review rating on a 0 to 5 scale; None until the first review.
    pub rating: Option<f64>,
    pub review_count: i64,
    /// Historical mean time-to-first-reply, in minutes.
    pub avg_response_minutes: Option<i64>,
    /// Fraction of inquiries the vendor accepted, 0 to 1.
    pub acceptance_rate: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct VendorServiceOffering {
    pub vendor_service_id: Uuid,
    pub vendor_id: Uuid,
    pub service_type: String,
    /// Price band in cents.
    pub price_min: i64,
    pub price_max: i64,
}

/// What the consumer is shopping for, as entered in the discovery flow.
#[derive(Debug, Deserialize, Clone)]
pub struct EventRequirements {
    pub budget_min: i64,
    pub budget_max: i64,
    pub service_types: Vec<String>,
    pub city: Option<String>,
}

/// Per-vendor suitability result. Computed fresh per search and discarded
/// after render; never persisted.
#[derive(Debug, Serialize, Clone)]
pub struct VendorMatch {
    /// 0 to 100 after clamping.
    pub score: u8,
    /// Rationale strings, most impactful first.
    pub reasons: Vec<String>,
}

/// One row of a discovery response: the vendor, what they offer, and how
/// well they fit the request.
#[derive(Debug, Serialize, Clone)]
pub struct VendorListing {
    pub vendor: VendorProfile,
    pub services: Vec<VendorServiceOffering>,
    #[serde(rename = "match")]
    pub match_result: VendorMatch,
}
