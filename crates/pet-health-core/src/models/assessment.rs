//! Projection and assessment output models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pet::Species;
use super::risk::{RiskResult, Severity};

/// Direction of the fitted weight trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Gaining,
    Losing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Gaining => "gaining",
            TrendDirection::Losing => "losing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Projected weight at one horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HorizonProjection {
    /// Days after the reference date
    pub days_ahead: u32,
    pub weight_kg: f64,
    pub lower_kg: f64,
    pub upper_kg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

/// Raised when the monthly weight change is large relative to body weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RapidChangeAlert {
    pub level: AlertLevel,
    /// Signed kg per 30 days
    pub monthly_rate_kg: f64,
    /// |monthly rate| as a percentage of the last observed weight
    pub percent_of_weight: f64,
    pub message: String,
}

/// A fitted weight trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightTrend {
    pub trend: TrendDirection,
    /// kg per day
    pub slope: f64,
    /// kg at the first sample's day
    pub intercept: f64,
    /// Residual standard deviation in kg
    pub std_dev: f64,
    pub sample_count: usize,
    pub last_weight_kg: f64,
    pub projections: Vec<HorizonProjection>,
    pub alert: Option<RapidChangeAlert>,
}

/// Outcome of the weight projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeightProjection {
    Available(WeightTrend),
    Unavailable { reason: String },
}

impl WeightProjection {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        WeightProjection::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn trend(&self) -> Option<&WeightTrend> {
        match self {
            WeightProjection::Available(trend) => Some(trend),
            WeightProjection::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.trend().is_some()
    }
}

/// Coarse health state used by the trajectory walk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Overweight,
    Diabetes,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Overweight => "overweight",
            HealthState::Diabetes => "diabetes",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrajectoryPoint {
    /// Years from now; 0 is the current state
    pub year: u32,
    pub state: HealthState,
}

/// Full engine output for one pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAssessment {
    pub pet_id: String,
    pub pet_name: String,
    pub species: Species,
    pub age_years: u32,
    pub assessed_on: NaiveDate,
    /// Non-suppressed risks in fixed condition order
    pub risks: Vec<RiskResult>,
    pub weight_projection: WeightProjection,
    pub trajectory: Vec<TrajectoryPoint>,
    pub highest_severity: Option<Severity>,
}

impl HealthAssessment {
    /// Look up a risk by condition.
    pub fn risk(&self, condition: super::risk::Condition) -> Option<&RiskResult> {
        self.risks.iter().find(|r| r.condition == condition)
    }
}
