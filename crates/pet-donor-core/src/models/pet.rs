//! Pet models.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::eligibility::{EligibilityRecord, EligibilityStatus};
use super::species::Species;

/// A registered donor candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// Local UUID, generated at registration
    pub pet_id: String,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_date: NaiveDate,
    /// Weight in pounds
    pub weight_lbs: f64,
    pub owner_name: Option<String>,
    /// Status from the latest eligibility record; `None` until first screening
    pub eligibility_status: Option<EligibilityStatus>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Create a new pet with required fields.
    pub fn new(name: String, species: Species, birth_date: NaiveDate, weight_lbs: f64) -> Self {
        let now = Utc::now();
        Self {
            pet_id: uuid::Uuid::new_v4().to_string(),
            name,
            species,
            breed: None,
            birth_date,
            weight_lbs,
            owner_name: None,
            eligibility_status: None,
            next_review_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole years of age on `on`. Zero for birth dates after `on`.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        on.years_since(self.birth_date).unwrap_or(0)
    }

    /// Snapshot of the inputs the evaluator needs, as of `now`.
    pub fn profile_at(&self, now: DateTime<Utc>) -> PetProfile {
        PetProfile {
            species: self.species,
            age_years: self.age_on(now.date_naive()),
            weight_lbs: self.weight_lbs,
            birth_date: Some(self.birth_date),
        }
    }

    /// Project the outcome of a screening onto the pet.
    pub fn apply_eligibility(&mut self, record: &EligibilityRecord) {
        self.eligibility_status = Some(record.overall_status);
        self.next_review_date = record.next_review_date;
        self.updated_at = record.submitted_at;
    }

    /// Whether the pet has been screened at all.
    pub fn is_screened(&self) -> bool {
        self.eligibility_status.is_some()
    }

    /// A non-terminal pet whose review date has arrived.
    pub fn is_review_due(&self, now: DateTime<Utc>) -> bool {
        match (self.eligibility_status, self.next_review_date) {
            (Some(status), Some(review)) => !status.is_terminal() && review <= now,
            _ => false,
        }
    }
}

/// Evaluation input: the parts of a pet the rules look at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PetProfile {
    pub species: Species,
    pub age_years: u32,
    pub weight_lbs: f64,
    /// Lets the age rule schedule the exact birthday the minimum is reached
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl PetProfile {
    /// Profile without a birth date; age reviews fall back to whole years.
    pub fn new(species: Species, age_years: u32, weight_lbs: f64) -> Self {
        Self {
            species,
            age_years,
            weight_lbs,
            birth_date: None,
        }
    }

    /// The date the animal turns `years` old, if a birth date is known.
    pub fn birthday(&self, years: u32) -> Option<NaiveDate> {
        let born = self.birth_date?;
        let date = born.checked_add_months(Months::new(years.checked_mul(12)?))?;
        // A Feb 29 birth clamps to Feb 28, but the age only ticks over a day later.
        if date.years_since(born) < Some(years) {
            date.succ_opt()
        } else {
            Some(date)
        }
    }
}
