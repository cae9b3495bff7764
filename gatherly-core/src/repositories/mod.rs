// src/repositories/mod.rs

pub mod postgres;

pub use postgres::{
    EngagementRepository, ModerationQueueRepository, PostgresEngagementRepository,
    PostgresModerationQueueRepository, PostgresPostsRepository, PostgresReportsRepository,
    PostgresVendorsRepository, PostsRepository, ReportsRepository, VendorsRepository,
};
