//! Eligibility policy: the per-species body requirements and review windows.
//!
//! The defaults encode the program's published donor criteria. Clinics can
//! override them with a JSON document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Species;

/// Age and size limits for one species. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRequirements {
    pub min_age_years: u32,
    pub max_age_years: u32,
    pub min_weight_lbs: f64,
}

impl SpeciesRequirements {
    pub const fn new(min_age_years: u32, max_age_years: u32, min_weight_lbs: f64) -> Self {
        Self {
            min_age_years,
            max_age_years,
            min_weight_lbs,
        }
    }
}

/// How far out (in months) review dates are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewWindows {
    /// Quick re-checks: recent illness, vaccinations
    pub short_months: u32,
    /// Default re-check window
    pub standard_months: u32,
    /// Re-verification of eligible donors
    pub annual_months: u32,
}

impl Default for ReviewWindows {
    fn default() -> Self {
        Self {
            short_months: 1,
            standard_months: 3,
            annual_months: 12,
        }
    }
}

/// Policy errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid policy: {0}")]
    Invalid(String),
}

/// Full rule table consumed by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    #[serde(default)]
    pub review_windows: ReviewWindows,
    pub species: BTreeMap<Species, SpeciesRequirements>,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        let species = BTreeMap::from([
            (Species::Dog, SpeciesRequirements::new(1, 8, 55.0)),
            (Species::Cat, SpeciesRequirements::new(1, 8, 10.0)),
            (Species::Horse, SpeciesRequirements::new(2, 20, 900.0)),
            (Species::Rabbit, SpeciesRequirements::new(1, 6, 9.0)),
            (Species::Ferret, SpeciesRequirements::new(1, 5, 2.0)),
            (Species::Goat, SpeciesRequirements::new(1, 8, 60.0)),
            (Species::Sheep, SpeciesRequirements::new(1, 7, 80.0)),
            (Species::Pig, SpeciesRequirements::new(1, 5, 150.0)),
            (Species::Cow, SpeciesRequirements::new(2, 10, 800.0)),
            (Species::Llama, SpeciesRequirements::new(2, 15, 250.0)),
            (Species::Alpaca, SpeciesRequirements::new(2, 15, 250.0)),
        ]);

        Self {
            review_windows: ReviewWindows::default(),
            species,
        }
    }
}

impl EligibilityPolicy {
    /// Parse and validate a policy document.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check internal consistency of the table.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let windows = &self.review_windows;
        if windows.short_months == 0 || windows.standard_months == 0 || windows.annual_months == 0
        {
            return Err(PolicyError::Invalid(
                "review windows must be at least one month".into(),
            ));
        }

        for (species, req) in &self.species {
            if req.min_age_years > req.max_age_years {
                return Err(PolicyError::Invalid(format!(
                    "{species}: minimum age {} exceeds maximum age {}",
                    req.min_age_years, req.max_age_years
                )));
            }
            if !req.min_weight_lbs.is_finite() || req.min_weight_lbs <= 0.0 {
                return Err(PolicyError::Invalid(format!(
                    "{species}: minimum weight must be a positive number"
                )));
            }
        }

        Ok(())
    }

    /// Requirements for a species, if the policy covers it.
    pub fn requirements(&self, species: Species) -> Option<&SpeciesRequirements> {
        self.species.get(&species)
    }
}
