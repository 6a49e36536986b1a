//! Year-by-year health-state walk.
//!
//! Deterministic: two probability thresholds decide every transition.
//! There is no transition matrix and no sampling.

use crate::models::{HealthState, TrajectoryPoint};

/// Obesity probability above which a pet starts out overweight.
const START_OVERWEIGHT_ABOVE: u8 = 60;

/// Obesity probability above which a healthy pet becomes overweight.
const BECOME_OVERWEIGHT_ABOVE: u8 = 50;

/// Two-year diabetes probability above which an overweight pet becomes diabetic.
const BECOME_DIABETIC_ABOVE: u8 = 50;

/// Walk `years` years from the current state. Entry 0 is the start state.
pub fn project_trajectory(
    obesity_probability: u8,
    diabetes_two_year_probability: u8,
    years: u32,
) -> Vec<TrajectoryPoint> {
    let mut state = if obesity_probability > START_OVERWEIGHT_ABOVE {
        HealthState::Overweight
    } else {
        HealthState::Healthy
    };

    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(TrajectoryPoint { year: 0, state });

    for year in 1..=years {
        state = next_state(state, obesity_probability, diabetes_two_year_probability);
        points.push(TrajectoryPoint { year, state });
    }
    points
}

fn next_state(current: HealthState, obesity: u8, diabetes_two_year: u8) -> HealthState {
    match current {
        HealthState::Healthy if obesity > BECOME_OVERWEIGHT_ABOVE => HealthState::Overweight,
        HealthState::Overweight if diabetes_two_year > BECOME_DIABETIC_ABOVE => {
            HealthState::Diabetes
        }
        other => other,
    }
}
