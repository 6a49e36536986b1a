//! Per-request lifestyle selections. Never persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DietQuality {
    Poor,
    #[default]
    Average,
    Good,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VetVisitFrequency {
    Never,
    #[default]
    Sometimes,
    Regular,
}

/// Lifestyle answers supplied alongside a prediction request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LifestyleInput {
    pub exercise: ExerciseLevel,
    pub diet: DietQuality,
    #[serde(alias = "vetVisits")]
    pub vet_visits: VetVisitFrequency,
}

impl ExerciseLevel {
    /// Lenient parse; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" | "baja" | "bajo" => Some(Self::Low),
            "medium" | "media" | "medio" => Some(Self::Medium),
            "high" | "alta" | "alto" => Some(Self::High),
            _ => None,
        }
    }
}

impl DietQuality {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "poor" | "mala" => Some(Self::Poor),
            "average" | "regular" | "normal" => Some(Self::Average),
            "good" | "buena" => Some(Self::Good),
            _ => None,
        }
    }
}

impl VetVisitFrequency {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "never" | "nunca" => Some(Self::Never),
            "sometimes" | "a veces" | "ocasional" => Some(Self::Sometimes),
            "regular" | "regularly" | "frecuente" => Some(Self::Regular),
            _ => None,
        }
    }
}
