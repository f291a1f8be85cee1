//! SQLite schema definition.

/// Complete database schema for pet-donor.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Pets
-- ============================================================================

CREATE TABLE IF NOT EXISTS pets (
    pet_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL,                       -- DOG, CAT, HORSE, ...
    breed TEXT,
    birth_date TEXT NOT NULL,                    -- YYYY-MM-DD
    weight_lbs REAL NOT NULL CHECK (weight_lbs > 0),
    owner_name TEXT,
    eligibility_status TEXT,                     -- NULL until first screening
    next_review_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);
CREATE INDEX IF NOT EXISTS idx_pets_next_review ON pets(next_review_date);

-- ============================================================================
-- Eligibility Records (Append-Only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS eligibility_records (
    record_id TEXT PRIMARY KEY,
    pet_id TEXT NOT NULL REFERENCES pets(pet_id),
    submitted_at TEXT NOT NULL,
    questionnaire TEXT NOT NULL,                 -- JSON QuestionnaireResponse
    factors TEXT NOT NULL DEFAULT '[]',          -- JSON array of DisqualifyingFactor
    overall_status TEXT NOT NULL CHECK (
        overall_status IN ('ELIGIBLE', 'PENDING_REVIEW', 'TEMPORARILY_INELIGIBLE', 'INELIGIBLE')
    ),
    next_review_date TEXT,
    -- Insertion order breaks ties between records submitted in the same instant
    seq INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_records_pet ON eligibility_records(pet_id, seq);

-- Records are never edited once written
CREATE TRIGGER IF NOT EXISTS eligibility_records_no_update BEFORE UPDATE ON eligibility_records
BEGIN
    SELECT RAISE(ABORT, 'Eligibility records are append-only');
END;
"#;
