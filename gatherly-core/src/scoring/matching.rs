// src/scoring/matching.rs

use gatherly_common::models::{EventRequirements, VendorMatch, VendorProfile, VendorServiceOffering};

/// Maximum points each sub-criterion can contribute. They sum to 100, so the
/// clamp at the end only matters if the weights ever change independently.
const BUDGET_WEIGHT: f64 = 35.0;
const COVERAGE_WEIGHT: f64 = 30.0;
const REPUTATION_WEIGHT: f64 = 20.0;
const RESPONSIVENESS_WEIGHT: f64 = 15.0;

/// Unrated vendors get this normalized reputation instead of zero, so a new
/// vendor is not excluded outright.
const UNRATED_REPUTATION_FLOOR: f64 = 0.5;

/// Score one vendor against the consumer's requirements.
///
/// Every sub-criterion contributes a bounded, non-negative amount; missing
/// or malformed vendor attributes earn that sub-criterion's minimum credit
/// rather than an error. Reasons come back ordered by contributed points,
/// largest first.
pub fn match_vendor(
    vendor: &VendorProfile,
    offerings: &[VendorServiceOffering],
    req: &EventRequirements,
) -> VendorMatch {
    let mut earned: Vec<(f64, String)> = Vec::new();

    let requested: Vec<String> = req
        .service_types
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let matched: Vec<&VendorServiceOffering> = offerings
        .iter()
        .filter(|o| requested.contains(&o.service_type.to_lowercase()))
        .collect();

    // Budget fit: overlap of the matched services' combined price band with
    // the event budget. When nothing was requested, every offering is in
    // scope so a budget-only search still ranks on price.
    let budget_pool: Vec<&VendorServiceOffering> = if requested.is_empty() {
        offerings.iter().collect()
    } else {
        matched.clone()
    };
    let budget_points = budget_fit_points(&budget_pool, req.budget_min, req.budget_max);
    if budget_points > 0.0 {
        let reason = if budget_points >= BUDGET_WEIGHT {
            "pricing fits your budget".to_string()
        } else {
            "pricing is close to your budget".to_string()
        };
        earned.push((budget_points, reason));
    }

    // Service coverage: fraction of requested service types on offer.
    if !requested.is_empty() {
        let mut covered = 0usize;
        for want in &requested {
            if offerings.iter().any(|o| o.service_type.to_lowercase() == *want) {
                covered += 1;
            }
        }
        let coverage_points = COVERAGE_WEIGHT * covered as f64 / requested.len() as f64;
        if coverage_points > 0.0 {
            earned.push((
                coverage_points,
                format!("offers {} of {} requested services", covered, requested.len()),
            ));
        }
    }

    // Reputation: rating normalized 0-5 -> 0-1, with a floor for vendors
    // that have no reviews yet.
    let (reputation_norm, reputation_reason) = match vendor.rating {
        Some(r) if vendor.review_count > 0 => {
            let norm = (r / 5.0).clamp(0.0, 1.0);
            (norm, format!("rated {:.1} from {} reviews", r, vendor.review_count))
        }
        _ => (UNRATED_REPUTATION_FLOOR, "no reviews yet".to_string()),
    };
    let reputation_points = REPUTATION_WEIGHT * reputation_norm;
    if reputation_points > 0.0 {
        earned.push((reputation_points, reputation_reason));
    }

    // Responsiveness: reply-time bucket blended with acceptance rate.
    let (time_factor, time_reason) = match vendor.avg_response_minutes {
        Some(m) if m <= 60 => (1.0, Some("typically replies within an hour")),
        Some(m) if m <= 240 => (0.7, Some("typically replies within a few hours")),
        Some(m) if m <= 1440 => (0.4, Some("typically replies within a day")),
        Some(_) => (0.15, None),
        None => (0.0, None),
    };
    let acceptance_factor = vendor.acceptance_rate.map(|a| a.clamp(0.0, 1.0)).unwrap_or(0.0);
    let responsiveness_points =
        RESPONSIVENESS_WEIGHT * (0.7 * time_factor + 0.3 * acceptance_factor);
    if responsiveness_points > 0.0 {
        let reason = time_reason
            .map(String::from)
            .unwrap_or_else(|| "responds to inquiries".to_string());
        earned.push((responsiveness_points, reason));
    }

    let total: f64 = earned.iter().map(|(p, _)| p).sum();
    let score = total.clamp(0.0, 100.0).round() as u8;

    earned.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let reasons = earned.into_iter().map(|(_, r)| r).collect();

    VendorMatch { score, reasons }
}

fn budget_fit_points(offerings: &[&VendorServiceOffering], budget_min: i64, budget_max: i64) -> f64 {
    if offerings.is_empty() || budget_max <= 0 || budget_max < budget_min {
        return 0.0;
    }

    let price_min = offerings.iter().map(|o| o.price_min).min().unwrap_or(0);
    let price_max = offerings.iter().map(|o| o.price_max).max().unwrap_or(0);

    if price_min <= budget_max && price_max >= budget_min {
        return BUDGET_WEIGHT;
    }

    // Outside the band: credit decays linearly with the relative distance.
    let rel_gap = if price_min > budget_max {
        (price_min - budget_max) as f64 / budget_max as f64
    } else {
        // price_max < budget_min, and budget_min > price_max >= 0 here.
        (budget_min - price_max) as f64 / budget_min as f64
    };

    BUDGET_WEIGHT * (1.0 - rel_gap).max(0.0)
}
