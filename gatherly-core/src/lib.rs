// gatherly-core/src/lib.rs

pub mod db;
pub mod repositories;
pub mod scoring;
pub mod services;
pub mod tasks;

pub use db::Database;
pub use gatherly_common::error::Error;
