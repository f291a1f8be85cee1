//! Donor workflow orchestration.
//!
//! Submit questionnaire → evaluate → append record → project status onto pet.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::eligibility::{EligibilityError, EligibilityEvaluator, EligibilityPolicy};
use crate::models::{EligibilityRecord, EligibilityStatus, Pet, QuestionnaireResponse, Species};
use crate::store::{DonorStore, StoreError};

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Pet not found: {0}")]
    PetNotFound(String),

    #[error("Invalid pet: {0}")]
    InvalidPet(String),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Owner-supplied details for a new donor candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRegistration {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_date: NaiveDate,
    pub weight_lbs: f64,
    pub owner_name: Option<String>,
}

/// Service composing a store with the eligibility evaluator.
pub struct EligibilityService<S> {
    store: Arc<S>,
    evaluator: EligibilityEvaluator,
}

impl<S> EligibilityService<S>
where
    S: DonorStore + 'static,
{
    /// Create a service using the default donor policy.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, EligibilityPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: EligibilityPolicy) -> Self {
        Self {
            store,
            evaluator: EligibilityEvaluator::new(policy),
        }
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    /// Validate and persist a new pet.
    pub fn register_pet(&self, registration: PetRegistration) -> ServiceResult<Pet> {
        let name = registration.name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidPet("name is required".into()));
        }
        validate_weight(registration.weight_lbs)?;
        if registration.birth_date > Utc::now().date_naive() {
            return Err(ServiceError::InvalidPet(format!(
                "birth date {} is in the future",
                registration.birth_date
            )));
        }

        let mut pet = Pet::new(
            name.to_string(),
            registration.species,
            registration.birth_date,
            registration.weight_lbs,
        );
        pet.breed = registration.breed;
        pet.owner_name = registration.owner_name;

        self.store.insert_pet(&pet)?;
        info!(pet_id = %pet.pet_id, species = %pet.species, "registered pet");
        Ok(pet)
    }

    pub fn get_pet(&self, pet_id: &str) -> ServiceResult<Pet> {
        self.store
            .fetch_pet(pet_id)?
            .ok_or_else(|| ServiceError::PetNotFound(pet_id.to_string()))
    }

    pub fn list_pets(&self) -> ServiceResult<Vec<Pet>> {
        Ok(self.store.list_pets()?)
    }

    /// Record a new weigh-in. Takes effect at the next screening.
    pub fn update_weight(&self, pet_id: &str, weight_lbs: f64) -> ServiceResult<Pet> {
        validate_weight(weight_lbs)?;
        let mut pet = self.get_pet(pet_id)?;
        pet.weight_lbs = weight_lbs;
        pet.updated_at = Utc::now();
        self.store.update_pet(&pet)?;
        Ok(pet)
    }

    /// Screen a pet with a questionnaire submitted now.
    pub fn submit_questionnaire(
        &self,
        pet_id: &str,
        response: QuestionnaireResponse,
    ) -> ServiceResult<EligibilityRecord> {
        self.submit_questionnaire_at(pet_id, response, Utc::now())
    }

    /// Screen a pet with a questionnaire submitted at `now`.
    pub fn submit_questionnaire_at(
        &self,
        pet_id: &str,
        response: QuestionnaireResponse,
        now: DateTime<Utc>,
    ) -> ServiceResult<EligibilityRecord> {
        let pet = self.get_pet(pet_id)?;
        let profile = pet.profile_at(now);

        let record = self
            .evaluator
            .evaluate_at(&pet.pet_id, &profile, &response, now)?;

        // Only the status columns are written; weigh-ins since the fetch survive.
        self.store.commit_evaluation(&record)?;

        info!(
            pet_id = %pet.pet_id,
            record_id = %record.record_id,
            status = record.overall_status.as_str(),
            factors = record.factors.len(),
            "eligibility questionnaire evaluated"
        );
        Ok(record)
    }

    /// Every screening for a pet, oldest first.
    pub fn eligibility_history(&self, pet_id: &str) -> ServiceResult<Vec<EligibilityRecord>> {
        self.get_pet(pet_id)?;
        Ok(self.store.records_for_pet(pet_id)?)
    }

    pub fn latest_eligibility(&self, pet_id: &str) -> ServiceResult<Option<EligibilityRecord>> {
        self.get_pet(pet_id)?;
        Ok(self.store.latest_record(pet_id)?)
    }

    /// Screened, non-terminal pets whose review date has arrived.
    pub fn pets_due_for_review(&self, now: DateTime<Utc>) -> ServiceResult<Vec<Pet>> {
        let mut due: Vec<Pet> = self
            .store
            .list_pets()?
            .into_iter()
            .filter(|pet| pet.is_review_due(now))
            .collect();
        due.sort_by_key(|pet| pet.next_review_date);
        Ok(due)
    }

    /// Whether the pet may book a donation appointment at `now`: it must be
    /// eligible and its annual verification must not have lapsed.
    pub fn can_book_donation(&self, pet_id: &str, now: DateTime<Utc>) -> ServiceResult<bool> {
        let pet = self.get_pet(pet_id)?;
        Ok(match (pet.eligibility_status, pet.next_review_date) {
            (Some(EligibilityStatus::Eligible), Some(review)) => now < review,
            _ => false,
        })
    }
}

fn validate_weight(weight_lbs: f64) -> ServiceResult<()> {
    if weight_lbs.is_finite() && weight_lbs > 0.0 {
        Ok(())
    } else {
        Err(ServiceError::InvalidPet(format!(
            "weight must be a positive number of pounds, got {weight_lbs}"
        )))
    }
}
