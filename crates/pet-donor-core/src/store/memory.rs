//! In-memory store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{EligibilityRepository, PetRepository, StoreError, StoreResult};
use crate::models::{EligibilityRecord, Pet};

/// Map-backed store for tests and previews. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pets: Mutex<BTreeMap<String, Pet>>,
    records: Mutex<BTreeMap<String, Vec<EligibilityRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PetRepository for MemoryStore {
    fn insert_pet(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.lock()?;
        if pets.contains_key(&pet.pet_id) {
            return Err(StoreError::Conflict(pet.pet_id.clone()));
        }
        pets.insert(pet.pet_id.clone(), pet.clone());
        Ok(())
    }

    fn update_pet(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.lock()?;
        match pets.get_mut(&pet.pet_id) {
            Some(existing) => {
                *existing = pet.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(pet.pet_id.clone())),
        }
    }

    fn fetch_pet(&self, pet_id: &str) -> StoreResult<Option<Pet>> {
        Ok(self.pets.lock()?.get(pet_id).cloned())
    }

    fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        let mut pets: Vec<Pet> = self.pets.lock()?.values().cloned().collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pets)
    }
}

impl EligibilityRepository for MemoryStore {
    fn append_record(&self, record: &EligibilityRecord) -> StoreResult<()> {
        if !self.pets.lock()?.contains_key(&record.pet_id) {
            return Err(StoreError::NotFound(record.pet_id.clone()));
        }
        let mut records = self.records.lock()?;
        let history = records.entry(record.pet_id.clone()).or_default();
        if history.iter().any(|r| r.record_id == record.record_id) {
            return Err(StoreError::Conflict(record.record_id.clone()));
        }
        history.push(record.clone());
        Ok(())
    }

    fn records_for_pet(&self, pet_id: &str) -> StoreResult<Vec<EligibilityRecord>> {
        Ok(self
            .records
            .lock()?
            .get(pet_id)
            .cloned()
            .unwrap_or_default())
    }

    fn commit_evaluation(&self, record: &EligibilityRecord) -> StoreResult<()> {
        // Lock order: pets, then records.
        let mut pets = self.pets.lock()?;
        let mut records = self.records.lock()?;

        let Some(pet) = pets.get_mut(&record.pet_id) else {
            return Err(StoreError::NotFound(record.pet_id.clone()));
        };
        let history = records.entry(record.pet_id.clone()).or_default();
        if history.iter().any(|r| r.record_id == record.record_id) {
            return Err(StoreError::Conflict(record.record_id.clone()));
        }

        history.push(record.clone());
        pet.apply_eligibility(record);
        Ok(())
    }
}
