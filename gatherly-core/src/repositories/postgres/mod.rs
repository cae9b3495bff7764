// src/repositories/postgres/mod.rs

pub mod engagement;
pub mod moderation_queue;
pub mod posts;
pub mod reports;
pub mod vendors;

pub use engagement::{EngagementRepository, PostgresEngagementRepository};
pub use moderation_queue::{ModerationQueueRepository, PostgresModerationQueueRepository};
pub use posts::{PostgresPostsRepository, PostsRepository};
pub use reports::{PostgresReportsRepository, ReportsRepository};
pub use vendors::{PostgresVendorsRepository, VendorsRepository};
