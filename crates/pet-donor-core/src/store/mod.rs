//! Storage abstraction for pets and eligibility history.
//!
//! The service only talks to these traits, so the same orchestration runs
//! against the in-memory store in tests and the SQLite store on device.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::db::DbError;
use crate::models::{EligibilityRecord, Pet};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::Unavailable(format!("Lock poisoned: {}", e))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Registered pets, keyed by pet id.
pub trait PetRepository: Send + Sync {
    fn insert_pet(&self, pet: &Pet) -> StoreResult<()>;
    fn update_pet(&self, pet: &Pet) -> StoreResult<()>;
    fn fetch_pet(&self, pet_id: &str) -> StoreResult<Option<Pet>>;
    fn list_pets(&self) -> StoreResult<Vec<Pet>>;
}

/// Append-only eligibility history, keyed by pet id.
pub trait EligibilityRepository: Send + Sync {
    fn append_record(&self, record: &EligibilityRecord) -> StoreResult<()>;

    /// Records for a pet, oldest first.
    fn records_for_pet(&self, pet_id: &str) -> StoreResult<Vec<EligibilityRecord>>;

    fn latest_record(&self, pet_id: &str) -> StoreResult<Option<EligibilityRecord>> {
        Ok(self.records_for_pet(pet_id)?.pop())
    }

    /// Append `record` and project its status and review date onto the pet
    /// it names. Other pet columns are left alone. Either both writes land
    /// or neither does.
    fn commit_evaluation(&self, record: &EligibilityRecord) -> StoreResult<()>;
}

/// Convenience bound for stores that hold both collections.
pub trait DonorStore: PetRepository + EligibilityRepository {}

impl<T: PetRepository + EligibilityRepository> DonorStore for T {}
