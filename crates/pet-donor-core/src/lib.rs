//! Pet-Donor Core Library
//!
//! Local-first blood-donor screening for companion animals and livestock.
//!
//! # Architecture
//!
//! ```text
//! Pet registration ──► pets
//!                       │
//! Questionnaire ────────┤
//!                       ▼
//!              ┌─────────────────────┐
//!              │ EligibilityEvaluator│
//!              │  common checks      │
//!              │  species checks     │
//!              │  status + review    │
//!              └─────────┬───────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//!  eligibility_records              pets.eligibility_status
//!  (append-only history)            pets.next_review_date
//! ```
//!
//! # Core Principle
//!
//! **Permanent factors always win.** One permanent disqualifier makes the
//! animal ineligible no matter what else the questionnaire says.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Pet, QuestionnaireResponse, EligibilityRecord, ...)
//! - [`eligibility`]: Rule engine and policy table
//! - [`db`]: SQLite database layer
//! - [`store`]: Repository traits with memory and SQLite implementations
//! - [`service`]: Submission workflow
//! - [`logging`]: tracing subscriber setup for host apps

pub mod db;
pub mod eligibility;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use eligibility::{EligibilityError, EligibilityEvaluator, EligibilityPolicy};
pub use models::{
    DisqualifyingFactor, EligibilityRecord, EligibilityStatus, FactorType, Pet, PetProfile,
    QuestionnaireResponse, Severity, Species, SpeciesAnswers,
};
pub use service::{EligibilityService, PetRegistration, ServiceError};
pub use store::{MemoryStore, SqliteStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PetDonorError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Eligibility error: {0}")]
    EligibilityError(String),
}

impl From<ServiceError> for PetDonorError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::PetNotFound(id) => PetDonorError::NotFound(id),
            ServiceError::InvalidPet(msg) => PetDonorError::InvalidInput(msg),
            ServiceError::Eligibility(err) => PetDonorError::EligibilityError(err.to_string()),
            ServiceError::Store(store::StoreError::NotFound(id)) => PetDonorError::NotFound(id),
            ServiceError::Store(err) => PetDonorError::DatabaseError(err.to_string()),
        }
    }
}

impl From<store::StoreError> for PetDonorError {
    fn from(e: store::StoreError) -> Self {
        PetDonorError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for PetDonorError {
    fn from(e: serde_json::Error) -> Self {
        PetDonorError::SerializationError(e.to_string())
    }
}

impl From<eligibility::PolicyError> for PetDonorError {
    fn from(e: eligibility::PolicyError) -> Self {
        PetDonorError::InvalidInput(e.to_string())
    }
}

impl From<logging::LoggingError> for PetDonorError {
    fn from(e: logging::LoggingError) -> Self {
        PetDonorError::InvalidInput(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PetDonorCore>, PetDonorError> {
    let store = SqliteStore::open(&path)?;
    Ok(Arc::new(PetDonorCore::new(store, EligibilityPolicy::default())))
}

/// Open or create a database at the given path, screening with a clinic
/// policy (JSON-encoded `EligibilityPolicy`) instead of the defaults.
#[uniffi::export]
pub fn open_database_with_policy(
    path: String,
    policy_json: String,
) -> Result<Arc<PetDonorCore>, PetDonorError> {
    let policy = EligibilityPolicy::from_json(&policy_json)?;
    let store = SqliteStore::open(&path)?;
    Ok(Arc::new(PetDonorCore::new(store, policy)))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PetDonorCore>, PetDonorError> {
    let store = SqliteStore::open_in_memory()?;
    Ok(Arc::new(PetDonorCore::new(store, EligibilityPolicy::default())))
}

/// Route library logs to stdout/logcat. `filter` uses `RUST_LOG` syntax.
#[uniffi::export]
pub fn init_logging(filter: String) -> Result<(), PetDonorError> {
    logging::init(&filter)?;
    Ok(())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe service wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PetDonorCore {
    service: EligibilityService<SqliteStore>,
}

impl std::fmt::Debug for PetDonorCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetDonorCore").finish_non_exhaustive()
    }
}

impl PetDonorCore {
    fn new(store: SqliteStore, policy: EligibilityPolicy) -> Self {
        Self {
            service: EligibilityService::with_policy(Arc::new(store), policy),
        }
    }
}

#[uniffi::export]
impl PetDonorCore {
    // =========================================================================
    // Pet Operations
    // =========================================================================

    /// Register a new donor candidate.
    pub fn register_pet(&self, registration: FfiPetRegistration) -> Result<FfiPet, PetDonorError> {
        let pet = self.service.register_pet(registration.try_into()?)?;
        Ok(pet.into())
    }

    /// Get a pet by ID.
    pub fn get_pet(&self, pet_id: String) -> Result<Option<FfiPet>, PetDonorError> {
        match self.service.get_pet(&pet_id) {
            Ok(pet) => Ok(Some(pet.into())),
            Err(ServiceError::PetNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all registered pets.
    pub fn list_pets(&self) -> Result<Vec<FfiPet>, PetDonorError> {
        let pets = self.service.list_pets()?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// Record a new weight in pounds.
    pub fn update_weight(&self, pet_id: String, weight_lbs: f64) -> Result<FfiPet, PetDonorError> {
        let pet = self.service.update_weight(&pet_id, weight_lbs)?;
        Ok(pet.into())
    }

    // =========================================================================
    // Eligibility Operations
    // =========================================================================

    /// Evaluate a questionnaire (JSON-encoded `QuestionnaireResponse`).
    pub fn submit_questionnaire(
        &self,
        pet_id: String,
        questionnaire_json: String,
    ) -> Result<FfiEligibilityRecord, PetDonorError> {
        let response: QuestionnaireResponse = serde_json::from_str(&questionnaire_json)?;
        let record = self.service.submit_questionnaire(&pet_id, response)?;
        Ok(record.into())
    }

    /// Screening history for a pet, oldest first.
    pub fn eligibility_history(
        &self,
        pet_id: String,
    ) -> Result<Vec<FfiEligibilityRecord>, PetDonorError> {
        let records = self.service.eligibility_history(&pet_id)?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// Pets whose eligibility review is due today.
    pub fn pets_due_for_review(&self) -> Result<Vec<FfiPet>, PetDonorError> {
        let pets = self.service.pets_due_for_review(Utc::now())?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// Whether the pet may book a donation appointment today.
    pub fn can_book_donation(&self, pet_id: String) -> Result<bool, PetDonorError> {
        Ok(self.service.can_book_donation(&pet_id, Utc::now())?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe registration request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPetRegistration {
    pub name: String,
    /// Species name, e.g. "DOG" or "canine"
    pub species: String,
    pub breed: Option<String>,
    /// YYYY-MM-DD
    pub birth_date: String,
    pub weight_lbs: f64,
    pub owner_name: Option<String>,
}

impl TryFrom<FfiPetRegistration> for PetRegistration {
    type Error = PetDonorError;

    fn try_from(reg: FfiPetRegistration) -> Result<Self, Self::Error> {
        let species: Species = reg
            .species
            .parse()
            .map_err(|e: models::UnknownSpecies| PetDonorError::InvalidInput(e.to_string()))?;
        let birth_date = NaiveDate::parse_from_str(&reg.birth_date, "%Y-%m-%d").map_err(|e| {
            PetDonorError::InvalidInput(format!("birth date '{}': {}", reg.birth_date, e))
        })?;

        Ok(PetRegistration {
            name: reg.name,
            species,
            breed: reg.breed,
            birth_date,
            weight_lbs: reg.weight_lbs,
            owner_name: reg.owner_name,
        })
    }
}

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub pet_id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: String,
    pub weight_lbs: f64,
    pub owner_name: Option<String>,
    pub eligibility_status: Option<String>,
    pub next_review_date: Option<String>,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            pet_id: pet.pet_id,
            name: pet.name,
            species: pet.species.to_string(),
            breed: pet.breed,
            birth_date: pet.birth_date.format("%Y-%m-%d").to_string(),
            weight_lbs: pet.weight_lbs,
            owner_name: pet.owner_name,
            eligibility_status: pet.eligibility_status.map(|s| s.as_str().to_string()),
            next_review_date: pet.next_review_date.map(|d| d.to_rfc3339()),
        }
    }
}

/// FFI-safe disqualifying factor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFactor {
    pub factor_type: String,
    pub description: String,
    pub severity: String,
    pub review_date: Option<String>,
    pub requires_manual_review: bool,
}

impl From<DisqualifyingFactor> for FfiFactor {
    fn from(factor: DisqualifyingFactor) -> Self {
        Self {
            factor_type: factor.factor_type.as_str().to_string(),
            description: factor.description,
            severity: factor.severity.as_str().to_string(),
            review_date: factor.review_date.map(|d| d.to_rfc3339()),
            requires_manual_review: factor.requires_manual_review,
        }
    }
}

/// FFI-safe eligibility record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEligibilityRecord {
    pub record_id: String,
    pub pet_id: String,
    pub submitted_at: String,
    pub overall_status: String,
    pub next_review_date: Option<String>,
    pub summary: String,
    pub factors: Vec<FfiFactor>,
}

impl From<EligibilityRecord> for FfiEligibilityRecord {
    fn from(record: EligibilityRecord) -> Self {
        Self {
            summary: record.summary(),
            record_id: record.record_id,
            pet_id: record.pet_id,
            submitted_at: record.submitted_at.to_rfc3339(),
            overall_status: record.overall_status.as_str().to_string(),
            next_review_date: record.next_review_date.map(|d| d.to_rfc3339()),
            factors: record.factors.into_iter().map(|f| f.into()).collect(),
        }
    }
}
