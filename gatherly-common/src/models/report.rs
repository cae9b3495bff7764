// File: gatherly-common/src/models/report.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Add sqlx::Type so that SQLx knows how to decode this enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Harassment,
    Inappropriate,
    Violence,
    Misinformation,
    Other,
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportReason::Spam => write!(f, "spam"),
            ReportReason::Harassment => write!(f, "harassment"),
            ReportReason::Inappropriate => write!(f, "inappropriate"),
            ReportReason::Violence => write!(f, "violence"),
            ReportReason::Misinformation => write!(f, "misinformation"),
            ReportReason::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ReportReason {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spam" => Ok(ReportReason::Spam),
            "harassment" => Ok(ReportReason::Harassment),
            "inappropriate" => Ok(ReportReason::Inappropriate),
            "violence" => Ok(ReportReason::Violence),
            "misinformation" => Ok(ReportReason::Misinformation),
            "other" => Ok(ReportReason::Other),
            _ => Err(format!("Unknown report reason: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Reviewed => write!(f, "reviewed"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Report {
    pub report_id: Uuid,
    pub reporter_id: Uuid,
    pub post_id: Uuid,
    pub reason: ReportReason,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Submission payload, validated before any store access.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub post_id: Uuid,
    pub reason: String,
    pub description: Option<String>,
}

/// Why a submission was turned away. Each variant maps to its own
/// user-facing message; they are never collapsed into one generic error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRejection {
    InvalidReason(String),
    DescriptionTooLong { len: usize, max: usize },
    RateLimited { retry_after_secs: i64 },
    Duplicate,
    SelfReport,
}

impl fmt::Display for ReportRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportRejection::InvalidReason(r) => {
                write!(f, "'{}' is not a valid report reason", r)
            }
            ReportRejection::DescriptionTooLong { len, max } => {
                write!(f, "description is {} characters; the maximum is {}", len, max)
            }
            ReportRejection::RateLimited { retry_after_secs } => {
                write!(f, "too many reports; retry in {} seconds", retry_after_secs)
            }
            ReportRejection::Duplicate => {
                write!(f, "you have already reported this post")
            }
            ReportRejection::SelfReport => {
                write!(f, "you cannot report your own post")
            }
        }
    }
}

/// Outcome of a submission attempt that made it past the handler boundary.
#[derive(Debug, Clone)]
pub enum ReportDecision {
    Accepted(Report),
    Rejected(ReportRejection),
}

/// Moderation-queue entry created when a post accumulates enough pending
/// reports to warrant staff attention.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct ModerationFlag {
    pub queue_id: Uuid,
    pub post_id: Uuid,
    pub report_count: i64,
    pub flagged_at: DateTime<Utc>,
}
