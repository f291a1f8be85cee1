//! Eligibility outcome models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::questionnaire::QuestionnaireResponse;

/// Category of a disqualifying factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorType {
    Age,
    Weight,
    Health,
    Medication,
    TransfusionHistory,
    Disease,
    Pregnancy,
    Temperament,
    Lifestyle,
    Vaccination,
    Other,
}

impl FactorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            FactorType::Age => "AGE",
            FactorType::Weight => "WEIGHT",
            FactorType::Health => "HEALTH",
            FactorType::Medication => "MEDICATION",
            FactorType::TransfusionHistory => "TRANSFUSION_HISTORY",
            FactorType::Disease => "DISEASE",
            FactorType::Pregnancy => "PREGNANCY",
            FactorType::Temperament => "TEMPERAMENT",
            FactorType::Lifestyle => "LIFESTYLE",
            FactorType::Vaccination => "VACCINATION",
            FactorType::Other => "OTHER",
        }
    }
}

/// Whether a factor can clear with time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Permanent,
    Temporary,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Permanent => "PERMANENT",
            Severity::Temporary => "TEMPORARY",
        }
    }
}

/// A single reason the animal cannot donate right now (or ever).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisqualifyingFactor {
    pub factor_type: FactorType,
    pub description: String,
    pub severity: Severity,
    /// When the factor should be re-checked; only set for temporary factors
    pub review_date: Option<DateTime<Utc>>,
    /// A veterinarian has to look at this before the animal is cleared
    #[serde(default)]
    pub requires_manual_review: bool,
}

impl DisqualifyingFactor {
    pub fn permanent(factor_type: FactorType, description: impl Into<String>) -> Self {
        Self {
            factor_type,
            description: description.into(),
            severity: Severity::Permanent,
            review_date: None,
            requires_manual_review: false,
        }
    }

    pub fn temporary(
        factor_type: FactorType,
        description: impl Into<String>,
        review_date: DateTime<Utc>,
    ) -> Self {
        Self {
            factor_type,
            description: description.into(),
            severity: Severity::Temporary,
            review_date: Some(review_date),
            requires_manual_review: false,
        }
    }

    /// Flag the factor for veterinary sign-off.
    pub fn with_manual_review(mut self) -> Self {
        self.requires_manual_review = true;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.severity == Severity::Permanent
    }
}

/// Overall donor status derived from the factor list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatus {
    Eligible,
    PendingReview,
    TemporarilyIneligible,
    Ineligible,
}

impl EligibilityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "ELIGIBLE",
            EligibilityStatus::PendingReview => "PENDING_REVIEW",
            EligibilityStatus::TemporarilyIneligible => "TEMPORARILY_INELIGIBLE",
            EligibilityStatus::Ineligible => "INELIGIBLE",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "ELIGIBLE" => Some(EligibilityStatus::Eligible),
            "PENDING_REVIEW" => Some(EligibilityStatus::PendingReview),
            "TEMPORARILY_INELIGIBLE" => Some(EligibilityStatus::TemporarilyIneligible),
            "INELIGIBLE" => Some(EligibilityStatus::Ineligible),
            _ => None,
        }
    }

    /// Terminal statuses never schedule another review.
    pub fn is_terminal(self) -> bool {
        self == EligibilityStatus::Ineligible
    }
}

/// Outcome of one questionnaire submission. Append-only: resubmitting creates
/// a new record rather than editing an old one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityRecord {
    pub record_id: String,
    pub pet_id: String,
    pub submitted_at: DateTime<Utc>,
    pub questionnaire: QuestionnaireResponse,
    pub factors: Vec<DisqualifyingFactor>,
    pub overall_status: EligibilityStatus,
    pub next_review_date: Option<DateTime<Utc>>,
}

impl EligibilityRecord {
    pub fn permanent_factors(&self) -> impl Iterator<Item = &DisqualifyingFactor> {
        self.factors.iter().filter(|f| f.is_permanent())
    }

    /// Human-readable one-liner for notifications and logs.
    pub fn summary(&self) -> String {
        match self.overall_status {
            EligibilityStatus::Eligible => "eligible to donate".to_string(),
            status => {
                let reasons: Vec<&str> =
                    self.factors.iter().map(|f| f.description.as_str()).collect();
                format!(
                    "{}: {}",
                    status.as_str().to_lowercase().replace('_', " "),
                    reasons.join("; ")
                )
            }
        }
    }
}
