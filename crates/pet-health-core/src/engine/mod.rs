//! Health risk and projection engine.
//!
//! Pipeline: Pet Profile → Condition Models → Lifestyle Advice
//!                      ↘ Weight Projection
//!                      ↘ Health-State Trajectory
//!
//! Every function here is pure: the reference date is an input, nothing
//! is cached between calls.

mod breeds;
mod lifestyle;
mod projection;
mod risk;
mod trajectory;
mod vaccination;

pub use breeds::*;
pub use lifestyle::*;
pub use projection::*;
pub use risk::*;
pub use trajectory::*;
pub use vaccination::*;

use chrono::NaiveDate;
use tracing::info;

use crate::config::EngineConfig;
use crate::models::{HealthAssessment, LifestyleInput, PetProfile, RiskResult};

/// Years ahead at which the trajectory reads the diabetes model.
const DIABETES_LOOKAHEAD_YEARS: u32 = 2;

/// Main engine that runs every model over a profile.
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    config: EngineConfig,
    breeds: BreedTable,
}

impl HealthEngine {
    /// Create an engine with the default breed lists.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            breeds: BreedTable::new(),
        }
    }

    /// Replace the breed lists.
    pub fn with_breeds(mut self, breeds: BreedTable) -> Self {
        self.breeds = breeds;
        self
    }

    /// Score every condition, in fixed order, omitting suppressed results.
    pub fn risks(&self, profile: &PetProfile, today: NaiveDate) -> Vec<RiskResult> {
        let input = RiskInput::from_pet(&profile.pet, today);

        [
            obesity_risk(&input, &self.breeds),
            cardiac_risk(&input, &self.breeds),
            arthritis_risk(&input, &self.breeds),
            diabetes_risk(&input, &self.breeds),
            Some(dental_risk(&input)),
            vaccination_risk(&profile.vaccines, today),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Run the full assessment.
    pub fn assess(
        &self,
        profile: &PetProfile,
        lifestyle: Option<&LifestyleInput>,
        today: NaiveDate,
    ) -> HealthAssessment {
        let pet = &profile.pet;
        let input = RiskInput::from_pet(pet, today);

        let mut risks = self.risks(profile, today);
        if let Some(lifestyle) = lifestyle {
            apply_lifestyle(&mut risks, lifestyle);
        }

        let weight_projection = project_weight(&profile.weight_history, today, &self.config);

        let trajectory = project_trajectory(
            obesity_probability(&input, &self.breeds),
            diabetes_probability(&input.aged_by(DIABETES_LOOKAHEAD_YEARS), &self.breeds),
            self.config.trajectory_years,
        );

        let highest_severity = risks.iter().map(|r| r.severity).max();

        info!(
            pet_id = %pet.local_id,
            risks = risks.len(),
            projection = weight_projection.is_available(),
            "assessed pet"
        );

        HealthAssessment {
            pet_id: pet.local_id.clone(),
            pet_name: pet.name.clone(),
            species: pet.species,
            age_years: input.age_years,
            assessed_on: today,
            risks,
            weight_projection,
            trajectory,
            highest_severity,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the breed table for direct access.
    pub fn breeds(&self) -> &BreedTable {
        &self.breeds
    }
}
