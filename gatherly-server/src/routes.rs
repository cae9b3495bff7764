// gatherly-server/src/routes.rs

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;
use uuid::Uuid;

use gatherly_common::Error;
use gatherly_common::models::{EventRequirements, NewReport, ReportDecision, ReportRejection};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/engagement/refresh", post(refresh_engagement))
        .route("/api/reports", post(submit_report))
        .route("/api/vendors/search", get(search_vendors))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// `{ post_id?: uuid, batch_mode?: bool }`; exactly one must be set.
#[derive(Debug, Deserialize)]
struct RefreshRequest {
    post_id: Option<Uuid>,
    batch_mode: Option<bool>,
}

async fn refresh_engagement(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> (StatusCode, Json<Value>) {
    let batch = req.batch_mode.unwrap_or(false);

    match (req.post_id, batch) {
        (Some(post_id), false) => match state.engagement.refresh_post(post_id).await {
            Ok(engagement) => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "processed": 1,
                    "results": [engagement],
                })),
            ),
            Err(e) => store_error(e),
        },
        (None, true) => match state.engagement.refresh_recent().await {
            Ok(outcome) => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "processed": outcome.processed,
                    "failed": outcome.failed,
                    "results": outcome.results,
                })),
            ),
            Err(e) => store_error(e),
        },
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "set exactly one of post_id or batch_mode" })),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct ReportRequest {
    post_id: Uuid,
    reason: String,
    description: Option<String>,
}

async fn submit_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReportRequest>,
) -> (StatusCode, Json<Value>) {
    // Auth lives in front of this service; the gateway hands us the caller.
    let reporter_id = match headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
    {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "missing or invalid x-user-id header" })),
            );
        }
    };

    let submission = NewReport {
        post_id: req.post_id,
        reason: req.reason,
        description: req.description,
    };

    match state.moderation.submit_report(reporter_id, &submission).await {
        Ok(ReportDecision::Accepted(report)) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "report_id": report.report_id,
                "message": "Report submitted. Our moderation team will review it.",
            })),
        ),
        Ok(ReportDecision::Rejected(rejection)) => rejection_response(rejection),
        Err(e) => store_error(e),
    }
}

fn rejection_response(rejection: ReportRejection) -> (StatusCode, Json<Value>) {
    match rejection {
        ReportRejection::RateLimited { retry_after_secs } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": rejection.to_string(),
                "retry_after": retry_after_secs,
            })),
        ),
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": other.to_string() })),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct VendorSearchParams {
    budget_min: Option<i64>,
    budget_max: Option<i64>,
    /// Comma-separated service types.
    services: Option<String>,
    city: Option<String>,
}

async fn search_vendors(
    State(state): State<AppState>,
    Query(params): Query<VendorSearchParams>,
) -> (StatusCode, Json<Value>) {
    let service_types = params
        .services
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let req = EventRequirements {
        budget_min: params.budget_min.unwrap_or(0),
        budget_max: params.budget_max.unwrap_or(i64::MAX),
        service_types,
        city: params.city,
    };

    match state.vendor_search.search(&req).await {
        Ok(listings) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": listings.len(),
                "vendors": listings,
            })),
        ),
        Err(e) => store_error(e),
    }
}

/// Store errors surface as a summary only; the detail goes to the log.
fn store_error(e: Error) -> (StatusCode, Json<Value>) {
    match e {
        Error::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))),
        other => {
            error!("Request failed: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error, please retry later" })),
            )
        }
    }
}
