//! Overall status and review scheduling.

use chrono::{DateTime, Utc};

use crate::models::{DisqualifyingFactor, EligibilityStatus, Severity};

use super::checks::months_after;
use super::policy::ReviewWindows;

/// Fold the factor list into a single status.
///
/// Permanent factors dominate, then anything flagged for manual review.
pub fn determine_status(factors: &[DisqualifyingFactor]) -> EligibilityStatus {
    if factors.is_empty() {
        EligibilityStatus::Eligible
    } else if factors.iter().any(|f| f.is_permanent()) {
        EligibilityStatus::Ineligible
    } else if factors.iter().any(|f| f.requires_manual_review) {
        EligibilityStatus::PendingReview
    } else {
        EligibilityStatus::TemporarilyIneligible
    }
}

/// When the pet should be screened again, or `None` for terminal outcomes.
pub fn next_review_date(
    status: EligibilityStatus,
    factors: &[DisqualifyingFactor],
    now: DateTime<Utc>,
    windows: &ReviewWindows,
) -> Option<DateTime<Utc>> {
    match status {
        EligibilityStatus::Eligible => Some(months_after(now, windows.annual_months)),
        EligibilityStatus::Ineligible => None,
        EligibilityStatus::PendingReview | EligibilityStatus::TemporarilyIneligible => {
            let earliest = factors
                .iter()
                .filter(|f| f.severity == Severity::Temporary)
                .filter_map(|f| f.review_date)
                .min();
            Some(earliest.unwrap_or_else(|| months_after(now, windows.standard_months)))
        }
    }
}
