//! Pet Health Core Library
//!
//! Local-first pet health record store with a deterministic risk and
//! projection engine.
//!
//! # Architecture
//!
//! ```text
//! Pet record + weight history + vaccines
//!                     │
//!              [STORE: SQLite]
//!                     │
//!                load_profile
//!                     │
//!     ┌───────────────▼───────────────┐
//!     │         HealthEngine          │
//!     │  condition models (6)         │
//!     │  lifestyle advice             │
//!     │  OLS weight projection        │
//!     │  health-state trajectory      │
//!     └───────────────┬───────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//!    FFI records             JSON / CSV
//!   (mobile apps)              reports
//! ```
//!
//! # Core Principle
//!
//! **Every result is reproducible.** The engine is a pure function of the
//! profile, the lifestyle answers and the reference date; no probability
//! ever exceeds 95%.
//!
//! # Modules
//!
//! - [`db`]: SQLite record store for pets, weights and vaccines
//! - [`models`]: Domain types (Pet, RiskResult, HealthAssessment, etc.)
//! - [`engine`]: Condition models, weight projection and trajectory
//! - [`export`]: JSON and CSV health reports
//! - [`config`]: Layered file and environment configuration

pub mod config;
pub mod db;
pub mod engine;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use crate::config::{AppConfig, EngineConfig, StoreConfig};
pub use db::Database;
pub use engine::{BreedTable, HealthEngine};
pub use export::{BatchHealthReport, HealthReport, ReportExporter};
pub use models::{
    Condition, HealthAssessment, HealthState, LifestyleInput, Pet, PetProfile, RiskResult,
    Severity, Species, VaccineRecord, WeightProjection, WeightSample,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PetHealthError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for PetHealthError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => PetHealthError::NotFound(what),
            db::DbError::Constraint(msg) => PetHealthError::InvalidInput(msg),
            other => PetHealthError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PetHealthError {
    fn from(e: serde_json::Error) -> Self {
        PetHealthError::SerializationError(e.to_string())
    }
}

impl From<::config::ConfigError> for PetHealthError {
    fn from(e: ::config::ConfigError) -> Self {
        PetHealthError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PetHealthError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PetHealthError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PetHealthCore>, PetHealthError> {
    let db = Database::open(&path)?;
    Ok(PetHealthCore::wrap(db, HealthEngine::default()))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PetHealthCore>, PetHealthError> {
    let db = Database::open_in_memory()?;
    Ok(PetHealthCore::wrap(db, HealthEngine::default()))
}

/// Open the store named by a configuration file (and `PET_HEALTH__*` overrides).
#[uniffi::export]
pub fn open_with_config(config_path: Option<String>) -> Result<Arc<PetHealthCore>, PetHealthError> {
    let config = AppConfig::load(config_path.as_deref())?;
    let db = Database::open(&config.store.path)?;
    Ok(PetHealthCore::wrap(db, HealthEngine::new(config.engine)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store and engine wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PetHealthCore {
    db: Arc<Mutex<Database>>,
    engine: HealthEngine,
}

impl PetHealthCore {
    fn wrap(db: Database, engine: HealthEngine) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            engine,
        })
    }
}

#[uniffi::export]
impl PetHealthCore {
    // =========================================================================
    // Pet Operations
    // =========================================================================

    /// Create a new pet.
    pub fn create_pet(&self, pet: FfiNewPet) -> Result<FfiPet, PetHealthError> {
        let pet = pet.into_pet()?;
        let db = self.db.lock()?;
        db.insert_pet(&pet)?;
        Ok(pet.into())
    }

    /// Get a pet by local ID.
    pub fn get_pet(&self, local_id: String) -> Result<Option<FfiPet>, PetHealthError> {
        let db = self.db.lock()?;
        let pet = db.get_pet(&local_id)?;
        Ok(pet.map(|p| p.into()))
    }

    /// Search pets by name.
    pub fn search_pets(&self, query: String, limit: u32) -> Result<Vec<FfiPet>, PetHealthError> {
        let db = self.db.lock()?;
        let pets = db.search_pets(&query, limit as usize)?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// List every pet by name.
    pub fn list_pets(&self) -> Result<Vec<FfiPet>, PetHealthError> {
        let db = self.db.lock()?;
        let pets = db.list_pets()?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// Delete a pet and its history.
    pub fn delete_pet(&self, local_id: String) -> Result<bool, PetHealthError> {
        let db = self.db.lock()?;
        Ok(db.delete_pet(&local_id)?)
    }

    // =========================================================================
    // History Operations
    // =========================================================================

    /// Record a weight measurement (`date` is `YYYY-MM-DD`).
    pub fn record_weight(
        &self,
        pet_id: String,
        date: String,
        weight_kg: f64,
    ) -> Result<(), PetHealthError> {
        let sample = WeightSample::new(parse_date(&date)?, weight_kg);
        let db = self.db.lock()?;
        db.add_weight_sample(&pet_id, &sample)?;
        Ok(())
    }

    /// Record a vaccine.
    pub fn record_vaccine(
        &self,
        pet_id: String,
        name: String,
        applied_date: Option<String>,
        next_due_date: Option<String>,
    ) -> Result<(), PetHealthError> {
        let record = VaccineRecord {
            name,
            applied_date: applied_date.as_deref().map(parse_date).transpose()?,
            next_due_date: next_due_date.as_deref().map(parse_date).transpose()?,
        };
        let db = self.db.lock()?;
        db.add_vaccine_record(&pet_id, &record)?;
        Ok(())
    }

    // =========================================================================
    // Assessment Operations
    // =========================================================================

    /// Run every model for a pet. `today` defaults to the local date.
    pub fn assess_pet(
        &self,
        pet_id: String,
        lifestyle: Option<FfiLifestyle>,
        today: Option<String>,
    ) -> Result<FfiAssessment, PetHealthError> {
        let today = resolve_today(today.as_deref())?;
        let lifestyle = lifestyle.map(LifestyleInput::try_from).transpose()?;

        let db = self.db.lock()?;
        let profile = db.load_profile(&pet_id)?;
        let assessment = self.engine.assess(&profile, lifestyle.as_ref(), today);
        Ok(assessment.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export one pet's report as JSON.
    pub fn export_report_json(
        &self,
        pet_id: String,
        lifestyle: Option<FfiLifestyle>,
        today: Option<String>,
    ) -> Result<String, PetHealthError> {
        let today = resolve_today(today.as_deref())?;
        let lifestyle = lifestyle.map(LifestyleInput::try_from).transpose()?;

        let db = self.db.lock()?;
        let exporter = ReportExporter::new(&db, &self.engine);
        let report = exporter.export_pet(&pet_id, lifestyle.as_ref(), today)?;
        Ok(report.to_json()?)
    }

    /// Export every pet's report as CSV.
    pub fn export_reports_csv(&self, today: Option<String>) -> Result<String, PetHealthError> {
        let today = resolve_today(today.as_deref())?;
        let db = self.db.lock()?;
        let exporter = ReportExporter::new(&db, &self.engine);
        let batch = exporter.export_all(today)?;
        Ok(batch.to_csv())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, PetHealthError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| PetHealthError::InvalidInput(format!("bad date '{}': {}", s, e)))
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, PetHealthError> {
    match today {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub local_id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub weight_kg: Option<f64>,
    pub is_sterilized: bool,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            local_id: pet.local_id,
            name: pet.name,
            species: pet.species.as_str().to_string(),
            breed: pet.breed,
            birth_date: pet.birth_date.map(|d| d.to_string()),
            weight_kg: pet.weight_kg,
            is_sterilized: pet.is_sterilized,
        }
    }
}

/// FFI-safe input for a new pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub weight_kg: Option<f64>,
    pub is_sterilized: bool,
}

impl FfiNewPet {
    fn into_pet(self) -> Result<Pet, PetHealthError> {
        if self.name.trim().is_empty() {
            return Err(PetHealthError::InvalidInput("pet name is required".into()));
        }
        let mut pet = Pet::new(self.name, Species::from_label(&self.species));
        pet.breed = self.breed.filter(|b| !b.trim().is_empty());
        pet.birth_date = self.birth_date.as_deref().map(parse_date).transpose()?;
        pet.weight_kg = self.weight_kg;
        pet.is_sterilized = self.is_sterilized;
        Ok(pet)
    }
}

/// FFI-safe lifestyle answers. Labels are parsed leniently.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLifestyle {
    pub exercise: String,
    pub diet: String,
    pub vet_visits: String,
}

impl TryFrom<FfiLifestyle> for LifestyleInput {
    type Error = PetHealthError;

    fn try_from(value: FfiLifestyle) -> Result<Self, Self::Error> {
        let invalid = |field: &str, label: &str| {
            PetHealthError::InvalidInput(format!("unknown {} level '{}'", field, label))
        };
        Ok(LifestyleInput {
            exercise: models::ExerciseLevel::from_label(&value.exercise)
                .ok_or_else(|| invalid("exercise", &value.exercise))?,
            diet: models::DietQuality::from_label(&value.diet)
                .ok_or_else(|| invalid("diet", &value.diet))?,
            vet_visits: models::VetVisitFrequency::from_label(&value.vet_visits)
                .ok_or_else(|| invalid("vet visit", &value.vet_visits))?,
        })
    }
}

/// FFI-safe risk result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRiskResult {
    pub condition: String,
    pub name: String,
    pub probability: u8,
    pub severity: String,
    pub description: String,
    pub recommendations: Vec<String>,
    pub formula: String,
}

impl From<RiskResult> for FfiRiskResult {
    fn from(risk: RiskResult) -> Self {
        Self {
            condition: risk.condition.as_str().to_string(),
            name: risk.name,
            probability: risk.probability,
            severity: risk.severity.as_str().to_string(),
            description: risk.description,
            recommendations: risk.recommendations,
            formula: risk.formula,
        }
    }
}

/// FFI-safe projected weight at one horizon.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHorizonProjection {
    pub days_ahead: u32,
    pub weight_kg: f64,
    pub lower_kg: f64,
    pub upper_kg: f64,
}

impl From<models::HorizonProjection> for FfiHorizonProjection {
    fn from(p: models::HorizonProjection) -> Self {
        Self {
            days_ahead: p.days_ahead,
            weight_kg: p.weight_kg,
            lower_kg: p.lower_kg,
            upper_kg: p.upper_kg,
        }
    }
}

/// FFI-safe weight projection. `unavailable_reason` is set when no fit exists.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWeightProjection {
    pub available: bool,
    pub unavailable_reason: Option<String>,
    pub trend: Option<String>,
    pub slope_kg_per_day: Option<f64>,
    pub std_dev: Option<f64>,
    pub sample_count: u32,
    pub projections: Vec<FfiHorizonProjection>,
    pub alert_level: Option<String>,
    pub alert_message: Option<String>,
}

impl From<WeightProjection> for FfiWeightProjection {
    fn from(projection: WeightProjection) -> Self {
        match projection {
            WeightProjection::Available(trend) => Self {
                available: true,
                unavailable_reason: None,
                trend: Some(trend.trend.as_str().to_string()),
                slope_kg_per_day: Some(trend.slope),
                std_dev: Some(trend.std_dev),
                sample_count: trend.sample_count as u32,
                projections: trend.projections.into_iter().map(|p| p.into()).collect(),
                alert_level: trend.alert.as_ref().map(|a| a.level.as_str().to_string()),
                alert_message: trend.alert.map(|a| a.message),
            },
            WeightProjection::Unavailable { reason } => Self {
                available: false,
                unavailable_reason: Some(reason),
                trend: None,
                slope_kg_per_day: None,
                std_dev: None,
                sample_count: 0,
                projections: Vec::new(),
                alert_level: None,
                alert_message: None,
            },
        }
    }
}

/// FFI-safe assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub pet_id: String,
    pub pet_name: String,
    pub species: String,
    pub age_years: u32,
    pub assessed_on: String,
    pub risks: Vec<FfiRiskResult>,
    pub weight_projection: FfiWeightProjection,
    /// Health state per year, starting with the current year
    pub trajectory: Vec<String>,
    pub highest_severity: Option<String>,
}

impl From<HealthAssessment> for FfiAssessment {
    fn from(a: HealthAssessment) -> Self {
        Self {
            pet_id: a.pet_id,
            pet_name: a.pet_name,
            species: a.species.as_str().to_string(),
            age_years: a.age_years,
            assessed_on: a.assessed_on.to_string(),
            risks: a.risks.into_iter().map(|r| r.into()).collect(),
            weight_projection: a.weight_projection.into(),
            trajectory: a
                .trajectory
                .iter()
                .map(|p| p.state.as_str().to_string())
                .collect(),
            highest_severity: a.highest_severity.map(|s| s.as_str().to_string()),
        }
    }
}
