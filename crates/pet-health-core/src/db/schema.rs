//! SQLite schema definition.

/// Complete database schema for the pet health store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Pets
-- ============================================================================

CREATE TABLE IF NOT EXISTS pets (
    local_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL,                       -- dog|cat|bird|rabbit|reptile|other
    breed TEXT,
    birth_date TEXT,                             -- YYYY-MM-DD
    weight_kg REAL,                              -- latest known weight
    is_sterilized INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);

-- ============================================================================
-- Weight history (one row per visit measurement)
-- ============================================================================

CREATE TABLE IF NOT EXISTS weight_samples (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id TEXT NOT NULL REFERENCES pets(local_id) ON DELETE CASCADE,
    sample_date TEXT NOT NULL,                   -- YYYY-MM-DD
    weight_kg REAL NOT NULL CHECK (weight_kg > 0),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_weight_samples_pet ON weight_samples(pet_id, sample_date);

-- ============================================================================
-- Vaccines
-- ============================================================================

CREATE TABLE IF NOT EXISTS vaccine_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id TEXT NOT NULL REFERENCES pets(local_id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    applied_date TEXT,                           -- NULL if never applied
    next_due_date TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_vaccine_records_pet ON vaccine_records(pet_id);
"#;
