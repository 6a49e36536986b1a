//! Vaccination compliance risk.

use chrono::NaiveDate;

use crate::models::{clamp_probability, Condition, RiskResult, VaccineRecord, VaccineStatus};

/// Compliance risk over all tracked vaccines; `None` without records.
///
/// p = round(30 + 70 x flagged / total), where flagged counts overdue and
/// never-applied vaccines.
pub fn vaccination_risk(records: &[VaccineRecord], today: NaiveDate) -> Option<RiskResult> {
    if records.is_empty() {
        return None;
    }

    let overdue: Vec<&str> = records
        .iter()
        .filter(|r| r.status(today) == VaccineStatus::Overdue)
        .map(|r| r.name.as_str())
        .collect();
    let never_applied: Vec<&str> = records
        .iter()
        .filter(|r| r.status(today) == VaccineStatus::NeverApplied)
        .map(|r| r.name.as_str())
        .collect();

    let flagged = overdue.len() + never_applied.len();
    let total = records.len();
    let ratio = flagged as f64 / total as f64;
    let probability = clamp_probability(30.0 + 70.0 * ratio);

    let description = if flagged == 0 {
        format!("All {} tracked vaccines are current.", total)
    } else {
        format!("{} of {} tracked vaccines need attention.", flagged, total)
    };

    let mut recommendations = Vec::new();
    if !overdue.is_empty() {
        recommendations.push(format!("Book booster doses for: {}", overdue.join(", ")));
    }
    if !never_applied.is_empty() {
        recommendations.push(format!(
            "Start the primary series for: {}",
            never_applied.join(", ")
        ));
    }
    if recommendations.is_empty() {
        recommendations.push("Keep following the current vaccination calendar".to_string());
    }

    Some(
        RiskResult::new(
            Condition::Vaccination,
            probability,
            description,
            format!("p = 30 + 70 x {} / {}", flagged, total),
        )
        .with_recommendations(recommendations),
    )
}
