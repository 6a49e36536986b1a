//! Per-condition risk models.
//!
//! | condition  | model                                   | suppressed below |
//! |------------|-----------------------------------------|------------------|
//! | obesity    | z-score against ideal weight            | 0 (or no weight) |
//! | cardiac    | prior x age likelihood x weight likelihood | 15            |
//! | arthritis  | age bracket x breed/weight multipliers  | 20               |
//! | diabetes   | additive score out of 105               | 20               |
//! | dental     | age bracket, cats x0.85                 | never            |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{clamp_probability, Condition, Pet, RiskResult, Severity, Species};

use super::breeds::{BreedTable, DogSize};

/// Cardiac results below this are not reported.
const CARDIAC_MIN_PROBABILITY: u8 = 15;

/// Arthritis results below this are not reported.
const ARTHRITIS_MIN_PROBABILITY: u8 = 20;

/// Diabetes results below this are not reported.
const DIABETES_MIN_PROBABILITY: u8 = 20;

/// Maximum attainable diabetes score (40 + 30 + 15 + 20).
const DIABETES_MAX_SCORE: f64 = 105.0;

/// Inputs shared by every condition model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInput<'a> {
    pub species: Species,
    pub breed: &'a str,
    pub weight_kg: Option<f64>,
    pub age_years: u32,
    pub is_sterilized: bool,
}

impl<'a> RiskInput<'a> {
    /// Snapshot a pet's attributes as of `today`.
    pub fn from_pet(pet: &'a Pet, today: NaiveDate) -> Self {
        Self {
            species: pet.species,
            breed: pet.breed_text(),
            weight_kg: pet.known_weight(),
            age_years: pet.age_years(today),
            is_sterilized: pet.is_sterilized,
        }
    }

    /// Same pet, `years` older.
    pub fn aged_by(&self, years: u32) -> Self {
        Self {
            age_years: self.age_years.saturating_add(years),
            ..*self
        }
    }

    fn weight(&self) -> f64 {
        self.weight_kg.unwrap_or(0.0)
    }
}

/// Ideal weight distribution for a species/size bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IdealWeight {
    pub mean_kg: f64,
    pub std_kg: f64,
}

impl IdealWeight {
    const fn new(mean_kg: f64, std_kg: f64) -> Self {
        Self { mean_kg, std_kg }
    }

    /// Standard score of `weight_kg` against this bucket.
    pub fn z_score(&self, weight_kg: f64) -> f64 {
        (weight_kg - self.mean_kg) / self.std_kg
    }
}

/// Look up the ideal weight bucket.
pub fn ideal_weight(species: Species, breed: &str, breeds: &BreedTable) -> IdealWeight {
    match species {
        Species::Dog => match breeds.dog_size(breed) {
            DogSize::Small => IdealWeight::new(6.0, 2.5),
            DogSize::Medium => IdealWeight::new(18.0, 5.0),
            DogSize::Large => IdealWeight::new(35.0, 8.0),
        },
        Species::Cat => IdealWeight::new(4.5, 1.0),
        Species::Bird => IdealWeight::new(0.4, 0.15),
        Species::Rabbit => IdealWeight::new(2.5, 0.7),
        Species::Reptile => IdealWeight::new(2.0, 1.0),
        Species::Other => IdealWeight::new(10.0, 5.0),
    }
}

/// Piecewise mapping from z-score to a raw obesity percentage.
pub fn obesity_curve(z: f64) -> f64 {
    if z > 2.0 {
        75.0 + 5.0 * (z - 2.0)
    } else if z > 1.0 {
        45.0 + 30.0 * (z - 1.0)
    } else if z > 0.5 {
        25.0 + 40.0 * (z - 0.5)
    } else {
        0.0
    }
}

/// Obesity probability; 0 when the weight is unknown.
pub fn obesity_probability(input: &RiskInput<'_>, breeds: &BreedTable) -> u8 {
    let Some(weight) = input.weight_kg else {
        return 0;
    };
    let ideal = ideal_weight(input.species, input.breed, breeds);
    let mut raw = obesity_curve(ideal.z_score(weight));
    if input.age_years > 7 {
        raw *= 1.15;
    }
    clamp_probability(raw)
}

/// Obesity risk, or `None` when there is no weight or no excess weight.
pub fn obesity_risk(input: &RiskInput<'_>, breeds: &BreedTable) -> Option<RiskResult> {
    let Some(weight) = input.weight_kg else {
        debug!(condition = "obesity", "no weight on record, skipping");
        return None;
    };
    let probability = obesity_probability(input, breeds);
    if probability == 0 {
        debug!(condition = "obesity", weight, "weight at or near ideal, suppressed");
        return None;
    }

    let ideal = ideal_weight(input.species, input.breed, breeds);
    let z = ideal.z_score(weight);
    let excess = weight - ideal.mean_kg;
    let age_note = if input.age_years > 7 { " x 1.15 (age > 7)" } else { "" };

    Some(
        RiskResult::new(
            Condition::Obesity,
            probability,
            format!(
                "{:.1} kg is {:.1} kg above the ideal {:.1} kg for this {} ({:.2} standard deviations).",
                weight, excess, ideal.mean_kg, input.species, z
            ),
            format!(
                "z = ({:.1} - {:.1}) / {:.1} = {:.2}; p = curve(z){}",
                weight, ideal.mean_kg, ideal.std_kg, z, age_note
            ),
        )
        .with_recommendations([
            "Measure daily food portions and cut treats to under 10% of calories",
            "Schedule a body condition score check with your vet",
            "Re-weigh every 2-4 weeks to track progress",
        ]),
    )
}

/// Cardiac probability from prior and likelihood multipliers.
pub fn cardiac_probability(input: &RiskInput<'_>, breeds: &BreedTable) -> u8 {
    let (prior, age_mult, weight_mult) = cardiac_factors(input, breeds);
    clamp_probability(prior * age_mult * weight_mult * 100.0)
}

fn cardiac_factors(input: &RiskInput<'_>, breeds: &BreedTable) -> (f64, f64, f64) {
    let prior = if breeds.is_cardiac_prone(input.breed) {
        0.25
    } else {
        0.05
    };

    let age_mult = match input.age_years {
        a if a > 10 => 4.5,
        a if a > 7 => 2.8,
        a if a > 5 => 1.5,
        _ => 1.0,
    };

    let weight_mult = match (input.species, input.weight_kg) {
        (Species::Dog, Some(w)) if w > 40.0 => 2.5,
        (Species::Dog, Some(w)) if w > 30.0 => 1.8,
        _ => 1.0,
    };

    (prior, age_mult, weight_mult)
}

/// Cardiac risk, suppressed below 15%.
pub fn cardiac_risk(input: &RiskInput<'_>, breeds: &BreedTable) -> Option<RiskResult> {
    let probability = cardiac_probability(input, breeds);
    if probability < CARDIAC_MIN_PROBABILITY {
        debug!(condition = "cardiac", probability, "below reporting threshold");
        return None;
    }

    let (prior, age_mult, weight_mult) = cardiac_factors(input, breeds);
    let breed_note = if prior > 0.05 {
        "a breed predisposed to heart disease"
    } else {
        "no known breed predisposition"
    };

    Some(
        RiskResult::new(
            Condition::Cardiac,
            probability,
            format!(
                "Age {} and {} raise the likelihood of valve or muscle disease.",
                input.age_years, breed_note
            ),
            format!(
                "p = {:.2} x {:.1} x {:.1} x 100",
                prior, age_mult, weight_mult
            ),
        )
        .with_recommendations([
            "Ask for heart auscultation at every check-up",
            "Watch for coughing, fatigue or fast breathing at rest",
            "Consider an echocardiogram if a murmur is detected",
        ]),
    )
}

/// Arthritis probability.
pub fn arthritis_probability(input: &RiskInput<'_>, breeds: &BreedTable) -> u8 {
    let mut raw = arthritis_base(input.age_years);
    if input.species == Species::Dog {
        if breeds.is_large_dog(input.breed) {
            raw *= 1.4;
        }
        if input.weight() > 35.0 {
            raw *= 1.25;
        }
    }
    clamp_probability(raw)
}

fn arthritis_base(age_years: u32) -> f64 {
    match age_years {
        a if a < 3 => 5.0,
        a if a < 6 => 15.0,
        a if a < 9 => 35.0,
        a if a < 12 => 60.0,
        _ => 80.0,
    }
}

/// Arthritis risk, suppressed below 20%.
pub fn arthritis_risk(input: &RiskInput<'_>, breeds: &BreedTable) -> Option<RiskResult> {
    let probability = arthritis_probability(input, breeds);
    if probability < ARTHRITIS_MIN_PROBABILITY {
        debug!(condition = "arthritis", probability, "below reporting threshold");
        return None;
    }

    let mut formula = format!("p = {:.0}", arthritis_base(input.age_years));
    if input.species == Species::Dog {
        if breeds.is_large_dog(input.breed) {
            formula.push_str(" x 1.4 (large breed)");
        }
        if input.weight() > 35.0 {
            formula.push_str(" x 1.25 (weight > 35 kg)");
        }
    }

    Some(
        RiskResult::new(
            Condition::Arthritis,
            probability,
            format!(
                "Joint wear accumulates with age; at {} years the risk of osteoarthritis is significant.",
                input.age_years
            ),
            formula,
        )
        .with_recommendations([
            "Keep the pet lean to reduce joint load",
            "Prefer regular low-impact exercise such as walking or swimming",
            "Ask your vet about joint supplements",
        ]),
    )
}

/// Additive diabetes score out of 105.
pub fn diabetes_score(input: &RiskInput<'_>, breeds: &BreedTable) -> u32 {
    let mut score = match input.age_years {
        a if a > 10 => 40,
        a if a > 7 => 25,
        a if a > 5 => 10,
        _ => 0,
    };

    let weight = input.weight();
    score += match input.species {
        Species::Dog if weight > 40.0 => 30,
        Species::Dog if weight > 30.0 => 20,
        Species::Dog if weight > 25.0 => 10,
        Species::Cat if weight > 6.0 => 30,
        Species::Cat if weight > 5.0 => 20,
        _ => 0,
    };

    if input.is_sterilized {
        score += 15;
    }
    if breeds.is_diabetes_prone(input.breed) {
        score += 20;
    }
    score
}

/// Diabetes probability = score / 105.
pub fn diabetes_probability(input: &RiskInput<'_>, breeds: &BreedTable) -> u8 {
    clamp_probability(diabetes_score(input, breeds) as f64 / DIABETES_MAX_SCORE * 100.0)
}

/// Diabetes risk, suppressed below 20%.
pub fn diabetes_risk(input: &RiskInput<'_>, breeds: &BreedTable) -> Option<RiskResult> {
    let score = diabetes_score(input, breeds);
    let probability = diabetes_probability(input, breeds);
    if probability < DIABETES_MIN_PROBABILITY {
        debug!(condition = "diabetes", probability, "below reporting threshold");
        return None;
    }

    Some(
        RiskResult::new(
            Condition::Diabetes,
            probability,
            "Age, body weight, sterilization and breed combine into an elevated diabetes score."
                .to_string(),
            format!("p = {} / 105 x 100", score),
        )
        .with_recommendations([
            "Watch for increased thirst, urination or appetite",
            "Request a fasting glucose test at the next visit",
            "Feed a high-fibre, low simple-carbohydrate diet",
        ]),
    )
}

/// Periodontal probability.
pub fn dental_probability(input: &RiskInput<'_>) -> u8 {
    let mut raw = dental_base(input.age_years);
    if input.species == Species::Cat {
        raw *= 0.85;
    }
    clamp_probability(raw)
}

fn dental_base(age_years: u32) -> f64 {
    match age_years {
        a if a < 2 => 15.0,
        a if a < 4 => 35.0,
        a if a < 7 => 60.0,
        _ => 85.0,
    }
}

/// Periodontal risk. Always reported; severity never exceeds medium.
pub fn dental_risk(input: &RiskInput<'_>) -> RiskResult {
    let probability = dental_probability(input);
    let severity = if probability > 70 {
        Severity::Medium
    } else {
        Severity::Low
    };
    let cat_note = if input.species == Species::Cat {
        " x 0.85 (cat)"
    } else {
        ""
    };

    RiskResult::new(
        Condition::Dental,
        probability,
        "Most pets develop some periodontal disease with age; tartar builds up without routine care."
            .to_string(),
        format!("p = {:.0}{}", dental_base(input.age_years), cat_note),
    )
    .with_severity(severity)
    .with_recommendations([
        "Brush teeth several times a week with pet toothpaste",
        "Offer dental chews approved for the species",
        "Schedule a professional cleaning when tartar is visible",
    ])
}
