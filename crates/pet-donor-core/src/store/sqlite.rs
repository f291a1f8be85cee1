//! SQLite-backed store.

use std::path::Path;
use std::sync::Mutex;

use super::{EligibilityRepository, PetRepository, StoreError, StoreResult};
use crate::db::{Database, DbError};
use crate::models::{EligibilityRecord, Pet};

/// Thread-safe wrapper that serializes access to one SQLite connection.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }
}

impl PetRepository for SqliteStore {
    fn insert_pet(&self, pet: &Pet) -> StoreResult<()> {
        let db = self.db.lock()?;
        if db.get_pet(&pet.pet_id)?.is_some() {
            return Err(StoreError::Conflict(pet.pet_id.clone()));
        }
        db.insert_pet(pet)?;
        Ok(())
    }

    fn update_pet(&self, pet: &Pet) -> StoreResult<()> {
        if self.db.lock()?.update_pet(pet)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(pet.pet_id.clone()))
        }
    }

    fn fetch_pet(&self, pet_id: &str) -> StoreResult<Option<Pet>> {
        Ok(self.db.lock()?.get_pet(pet_id)?)
    }

    fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.db.lock()?.list_pets()?)
    }
}

impl EligibilityRepository for SqliteStore {
    fn append_record(&self, record: &EligibilityRecord) -> StoreResult<()> {
        let db = self.db.lock()?;
        if db.get_pet(&record.pet_id)?.is_none() {
            return Err(StoreError::NotFound(record.pet_id.clone()));
        }
        db.insert_record(record)?;
        Ok(())
    }

    fn records_for_pet(&self, pet_id: &str) -> StoreResult<Vec<EligibilityRecord>> {
        Ok(self.db.lock()?.list_records_for_pet(pet_id)?)
    }

    fn latest_record(&self, pet_id: &str) -> StoreResult<Option<EligibilityRecord>> {
        Ok(self.db.lock()?.latest_record_for_pet(pet_id)?)
    }

    fn commit_evaluation(&self, record: &EligibilityRecord) -> StoreResult<()> {
        let mut db = self.db.lock()?;
        match db.commit_eligibility(record) {
            Ok(()) => Ok(()),
            Err(DbError::NotFound(id)) => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
