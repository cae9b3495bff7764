// src/services/mod.rs

pub mod engagement_service;
pub mod moderation_service;
pub mod vendor_search;

pub use engagement_service::EngagementService;
pub use moderation_service::{ModerationService, ReportPolicy};
pub use vendor_search::VendorSearchService;
