//! Eligibility record database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::pets::string_to_status;
use super::{
    format_timestamp, parse_optional_timestamp, parse_timestamp, Database, DbError, DbResult,
};
use crate::models::{DisqualifyingFactor, EligibilityRecord, QuestionnaireResponse};

const RECORD_COLUMNS: &str = r#"
    record_id, pet_id, submitted_at, questionnaire, factors,
    overall_status, next_review_date
"#;

impl Database {
    /// Append an eligibility record.
    pub fn insert_record(&self, record: &EligibilityRecord) -> DbResult<()> {
        insert_record(&self.conn, record)
    }

    /// All records for a pet, oldest first.
    pub fn list_records_for_pet(&self, pet_id: &str) -> DbResult<Vec<EligibilityRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM eligibility_records WHERE pet_id = ? ORDER BY seq ASC"
        ))?;

        let rows = stmt.query_map([pet_id], RecordRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Most recent record for a pet.
    pub fn latest_record_for_pet(&self, pet_id: &str) -> DbResult<Option<EligibilityRecord>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM eligibility_records WHERE pet_id = ? ORDER BY seq DESC LIMIT 1"
                ),
                [pet_id],
                RecordRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Append a record and project its status onto the pet it names, in one
    /// transaction. Only the status, review date and `updated_at` columns
    /// of the pet are written.
    pub fn commit_eligibility(&mut self, record: &EligibilityRecord) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        if !project_eligibility(&tx, record)? {
            return Err(DbError::NotFound(record.pet_id.clone()));
        }
        // Dropping the transaction on error rolls back the projection.
        insert_record(&tx, record)?;
        tx.commit()?;
        Ok(())
    }
}

fn project_eligibility(conn: &Connection, record: &EligibilityRecord) -> DbResult<bool> {
    let rows_affected = conn.execute(
        r#"
        UPDATE pets SET
            eligibility_status = ?2,
            next_review_date = ?3,
            updated_at = ?4
        WHERE pet_id = ?1
        "#,
        params![
            record.pet_id,
            record.overall_status.as_str(),
            record.next_review_date.as_ref().map(format_timestamp),
            format_timestamp(&record.submitted_at),
        ],
    )?;
    Ok(rows_affected > 0)
}

fn insert_record(conn: &Connection, record: &EligibilityRecord) -> DbResult<()> {
    let questionnaire_json = serde_json::to_string(&record.questionnaire)?;
    let factors_json = serde_json::to_string(&record.factors)?;

    conn.execute(
        r#"
        INSERT INTO eligibility_records (
            record_id, pet_id, submitted_at, questionnaire, factors,
            overall_status, next_review_date, seq
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7,
            (SELECT COALESCE(MAX(seq), 0) + 1 FROM eligibility_records WHERE pet_id = ?2)
        )
        "#,
        params![
            record.record_id,
            record.pet_id,
            format_timestamp(&record.submitted_at),
            questionnaire_json,
            factors_json,
            record.overall_status.as_str(),
            record.next_review_date.as_ref().map(format_timestamp),
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct RecordRow {
    record_id: String,
    pet_id: String,
    submitted_at: String,
    questionnaire: String,
    factors: String,
    overall_status: String,
    next_review_date: Option<String>,
}

impl RecordRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RecordRow {
            record_id: row.get(0)?,
            pet_id: row.get(1)?,
            submitted_at: row.get(2)?,
            questionnaire: row.get(3)?,
            factors: row.get(4)?,
            overall_status: row.get(5)?,
            next_review_date: row.get(6)?,
        })
    }
}

impl TryFrom<RecordRow> for EligibilityRecord {
    type Error = DbError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let questionnaire: QuestionnaireResponse = serde_json::from_str(&row.questionnaire)?;
        let factors: Vec<DisqualifyingFactor> = serde_json::from_str(&row.factors)?;

        Ok(EligibilityRecord {
            record_id: row.record_id,
            pet_id: row.pet_id,
            submitted_at: parse_timestamp(&row.submitted_at)?,
            questionnaire,
            factors,
            overall_status: string_to_status(&row.overall_status)?,
            next_review_date: parse_optional_timestamp(row.next_review_date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::EligibilityEvaluator;
    use crate::models::{EligibilityStatus, Pet, Species};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn setup_db() -> (Database, Pet) {
        let db = Database::open_in_memory().unwrap();
        let pet = Pet::new(
            "Biscuit".into(),
            Species::Cat,
            NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            12.0,
        );
        db.insert_pet(&pet).unwrap();
        (db, pet)
    }

    fn make_record(pet: &Pet, vaccinated: bool, day: u32) -> EligibilityRecord {
        let now = Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap();
        let mut response = QuestionnaireResponse::all_clear(pet.species);
        response.base.current_on_vaccinations = vaccinated;
        EligibilityEvaluator::default()
            .evaluate_at(&pet.pet_id, &pet.profile_at(now), &response, now)
            .unwrap()
    }

    #[test]
    fn test_insert_and_list() {
        let (db, pet) = setup_db();
        let first = make_record(&pet, false, 1);
        let second = make_record(&pet, true, 2);

        db.insert_record(&first).unwrap();
        db.insert_record(&second).unwrap();

        let records = db.list_records_for_pet(&pet.pet_id).unwrap();
        assert_eq!(records, vec![first, second.clone()]);
        assert_eq!(db.latest_record_for_pet(&pet.pet_id).unwrap(), Some(second));
    }

    #[test]
    fn test_latest_for_unknown_pet() {
        let (db, _) = setup_db();
        assert!(db.latest_record_for_pet("ghost").unwrap().is_none());
    }

    #[test]
    fn test_foreign_key_enforced() {
        let (db, pet) = setup_db();
        let mut record = make_record(&pet, true, 1);
        record.pet_id = "ghost".into();
        assert!(matches!(db.insert_record(&record), Err(DbError::Sqlite(_))));
    }

    #[test]
    fn test_records_are_append_only() {
        let (db, pet) = setup_db();
        let record = make_record(&pet, true, 1);
        db.insert_record(&record).unwrap();

        let result = db.conn().execute(
            "UPDATE eligibility_records SET overall_status = 'INELIGIBLE' WHERE record_id = ?",
            [&record.record_id],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_eligibility_updates_pet() {
        let (mut db, pet) = setup_db();
        let record = make_record(&pet, false, 3);

        db.commit_eligibility(&record).unwrap();

        let stored = db.get_pet(&pet.pet_id).unwrap().unwrap();
        assert_eq!(
            stored.eligibility_status,
            Some(EligibilityStatus::TemporarilyIneligible)
        );
        assert_eq!(stored.next_review_date, record.next_review_date);
        assert_eq!(stored.updated_at, record.submitted_at);
        assert_eq!(db.list_records_for_pet(&pet.pet_id).unwrap().len(), 1);
    }

    #[test]
    fn test_commit_keeps_other_pet_columns() {
        let (mut db, pet) = setup_db();
        let record = make_record(&pet, true, 3);

        let mut heavier = pet.clone();
        heavier.weight_lbs = 14.0;
        heavier.owner_name = Some("Ines".into());
        db.update_pet(&heavier).unwrap();

        db.commit_eligibility(&record).unwrap();

        let stored = db.get_pet(&pet.pet_id).unwrap().unwrap();
        assert_eq!(stored.weight_lbs, 14.0);
        assert_eq!(stored.owner_name.as_deref(), Some("Ines"));
        assert_eq!(stored.eligibility_status, Some(EligibilityStatus::Eligible));
    }

    #[test]
    fn test_commit_targets_the_record_pet() {
        let (mut db, pet) = setup_db();
        let mut other = pet.clone();
        other.pet_id = "other".into();
        other.name = "Pebble".into();
        db.insert_pet(&other).unwrap();

        db.commit_eligibility(&make_record(&other, false, 3)).unwrap();

        assert_eq!(db.get_pet(&pet.pet_id).unwrap().unwrap().eligibility_status, None);
        assert!(db.list_records_for_pet(&pet.pet_id).unwrap().is_empty());
        assert_eq!(db.list_records_for_pet("other").unwrap().len(), 1);
    }

    #[test]
    fn test_commit_rolls_back_when_pet_missing() {
        let (mut db, pet) = setup_db();
        let mut record = make_record(&pet, true, 4);
        record.pet_id = "ghost".into();

        let result = db.commit_eligibility(&record);
        assert!(matches!(result, Err(DbError::NotFound(_))));
        assert!(db.list_records_for_pet("ghost").unwrap().is_empty());
    }

    #[test]
    fn test_commit_rolls_back_projection_when_insert_fails() {
        let (mut db, pet) = setup_db();
        let first = make_record(&pet, true, 5);
        db.commit_eligibility(&first).unwrap();

        let mut replay = make_record(&pet, false, 6);
        replay.record_id = first.record_id.clone();
        assert!(matches!(
            db.commit_eligibility(&replay),
            Err(DbError::Sqlite(_))
        ));

        let stored = db.get_pet(&pet.pet_id).unwrap().unwrap();
        assert_eq!(stored.eligibility_status, Some(EligibilityStatus::Eligible));
        assert_eq!(stored.next_review_date, first.next_review_date);
        assert_eq!(stored.updated_at, first.submitted_at);
    }
}
