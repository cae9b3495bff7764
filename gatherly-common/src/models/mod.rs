// File: gatherly-common/src/models/mod.rs
pub mod engagement;
pub mod post;
pub mod report;
pub mod vendor;

pub use engagement::{BatchOutcome, PostEngagement};
pub use post::Post;
pub use report::{
    ModerationFlag, NewReport, Report, ReportDecision, ReportReason, ReportRejection,
    ReportStatus,
};
pub use vendor::{
    EventRequirements, VendorListing, VendorMatch, VendorProfile, VendorServiceOffering,
};
