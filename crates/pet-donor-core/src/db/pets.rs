//! Pet database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{
    format_date, format_timestamp, parse_date, parse_optional_timestamp, parse_timestamp,
    Database, DbError, DbResult,
};
use crate::models::{EligibilityStatus, Pet, Species};

const PET_COLUMNS: &str = r#"
    pet_id, name, species, breed, birth_date, weight_lbs, owner_name,
    eligibility_status, next_review_date, created_at, updated_at
"#;

impl Database {
    /// Insert a new pet.
    pub fn insert_pet(&self, pet: &Pet) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO pets (
                pet_id, name, species, breed, birth_date, weight_lbs, owner_name,
                eligibility_status, next_review_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                pet.pet_id,
                pet.name,
                pet.species.as_str(),
                pet.breed,
                format_date(&pet.birth_date),
                pet.weight_lbs,
                pet.owner_name,
                pet.eligibility_status.map(|s| s.as_str()),
                pet.next_review_date.as_ref().map(format_timestamp),
                format_timestamp(&pet.created_at),
                format_timestamp(&pet.updated_at),
            ],
        )?;
        Ok(())
    }

    /// Update an existing pet.
    pub fn update_pet(&self, pet: &Pet) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE pets SET
                name = ?2,
                species = ?3,
                breed = ?4,
                birth_date = ?5,
                weight_lbs = ?6,
                owner_name = ?7,
                eligibility_status = ?8,
                next_review_date = ?9,
                updated_at = ?10
            WHERE pet_id = ?1
            "#,
            params![
                pet.pet_id,
                pet.name,
                pet.species.as_str(),
                pet.breed,
                format_date(&pet.birth_date),
                pet.weight_lbs,
                pet.owner_name,
                pet.eligibility_status.map(|s| s.as_str()),
                pet.next_review_date.as_ref().map(format_timestamp),
                format_timestamp(&pet.updated_at),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a pet by ID.
    pub fn get_pet(&self, pet_id: &str) -> DbResult<Option<Pet>> {
        self.conn
            .query_row(
                &format!("SELECT {PET_COLUMNS} FROM pets WHERE pet_id = ?"),
                [pet_id],
                PetRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all pets.
    pub fn list_pets(&self) -> DbResult<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PET_COLUMNS} FROM pets ORDER BY name"))?;

        let rows = stmt.query_map([], PetRow::from_row)?;

        let mut pets = Vec::new();
        for row in rows {
            pets.push(row?.try_into()?);
        }
        Ok(pets)
    }
}

/// Intermediate row struct for database mapping.
struct PetRow {
    pet_id: String,
    name: String,
    species: String,
    breed: Option<String>,
    birth_date: String,
    weight_lbs: f64,
    owner_name: Option<String>,
    eligibility_status: Option<String>,
    next_review_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl PetRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PetRow {
            pet_id: row.get(0)?,
            name: row.get(1)?,
            species: row.get(2)?,
            breed: row.get(3)?,
            birth_date: row.get(4)?,
            weight_lbs: row.get(5)?,
            owner_name: row.get(6)?,
            eligibility_status: row.get(7)?,
            next_review_date: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl TryFrom<PetRow> for Pet {
    type Error = DbError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let species: Species = row
            .species
            .parse()
            .map_err(|e: crate::models::UnknownSpecies| DbError::Corrupt(e.to_string()))?;
        let eligibility_status = row
            .eligibility_status
            .as_deref()
            .map(string_to_status)
            .transpose()?;

        Ok(Pet {
            pet_id: row.pet_id,
            name: row.name,
            species,
            breed: row.breed,
            birth_date: parse_date(&row.birth_date)?,
            weight_lbs: row.weight_lbs,
            owner_name: row.owner_name,
            eligibility_status,
            next_review_date: parse_optional_timestamp(row.next_review_date)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

pub(super) fn string_to_status(s: &str) -> DbResult<EligibilityStatus> {
    EligibilityStatus::from_str_opt(s)
        .ok_or_else(|| DbError::Corrupt(format!("Unknown eligibility status: {}", s)))
}
