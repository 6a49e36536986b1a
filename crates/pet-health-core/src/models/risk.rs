//! Risk result models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest probability any model may report. Nothing is ever certain.
pub const MAX_PROBABILITY: f64 = 95.0;

/// Coarse severity band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Standard bands: >60 high, >35 medium, else low.
    pub fn from_probability(probability: u8) -> Self {
        if probability > 60 {
            Severity::High
        } else if probability > 35 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions the engine scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Obesity,
    Cardiac,
    Arthritis,
    Diabetes,
    Dental,
    Vaccination,
}

impl Condition {
    /// Stable machine identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Obesity => "obesity",
            Condition::Cardiac => "cardiac",
            Condition::Arthritis => "arthritis",
            Condition::Diabetes => "diabetes",
            Condition::Dental => "dental",
            Condition::Vaccination => "vaccination",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Obesity => "Obesity",
            Condition::Cardiac => "Cardiac disease",
            Condition::Arthritis => "Arthritis",
            Condition::Diabetes => "Diabetes",
            Condition::Dental => "Periodontal disease",
            Condition::Vaccination => "Vaccination compliance",
        }
    }
}

/// One scored condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskResult {
    pub condition: Condition,
    pub name: String,
    /// Whole percentage in [0, 95]
    pub probability: u8,
    pub severity: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
    /// The arithmetic that produced the probability, for display
    pub formula: String,
}

impl RiskResult {
    /// Build a result using the standard severity bands.
    pub fn new(condition: Condition, probability: u8, description: String, formula: String) -> Self {
        Self {
            condition,
            name: condition.display_name().to_string(),
            probability,
            severity: Severity::from_probability(probability),
            description,
            recommendations: Vec::new(),
            formula,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations
            .extend(recommendations.into_iter().map(Into::into));
        self
    }
}

/// Round a raw percentage and clamp it into `[0, MAX_PROBABILITY]`.
pub fn clamp_probability(raw: f64) -> u8 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.min(MAX_PROBABILITY).round() as u8
}
