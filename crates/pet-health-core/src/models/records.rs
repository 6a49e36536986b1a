//! Medical history records: weight measurements and vaccines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pet::Pet;

/// A weight measurement taken at a visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightSample {
    /// Measurement date
    pub date: NaiveDate,
    /// Weight in kg (always > 0 once stored)
    pub weight_kg: f64,
}

impl WeightSample {
    pub fn new(date: NaiveDate, weight_kg: f64) -> Self {
        Self { date, weight_kg }
    }
}

/// A tracked vaccine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccineRecord {
    /// Vaccine name (e.g., "Rabies", "DHPP")
    pub name: String,
    /// Date the dose was applied, if ever
    pub applied_date: Option<NaiveDate>,
    /// Date the next dose is due
    pub next_due_date: Option<NaiveDate>,
}

/// Compliance status of a vaccine on a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VaccineStatus {
    /// Applied and not yet due again
    UpToDate,
    /// Applied, but the next dose is past due
    Overdue,
    /// Never applied and already past due
    NeverApplied,
    /// Never applied, not due yet
    Pending,
}

impl VaccineRecord {
    pub fn new(name: String) -> Self {
        Self {
            name,
            applied_date: None,
            next_due_date: None,
        }
    }

    /// Derive the compliance status relative to `today`.
    pub fn status(&self, today: NaiveDate) -> VaccineStatus {
        let past_due = self.next_due_date.is_some_and(|due| due < today);
        match (self.applied_date.is_some(), past_due) {
            (true, true) => VaccineStatus::Overdue,
            (true, false) => VaccineStatus::UpToDate,
            (false, true) => VaccineStatus::NeverApplied,
            (false, false) => VaccineStatus::Pending,
        }
    }

    /// Whether this record counts against compliance.
    pub fn is_flagged(&self, today: NaiveDate) -> bool {
        matches!(
            self.status(today),
            VaccineStatus::Overdue | VaccineStatus::NeverApplied
        )
    }
}

/// Everything the engine needs to assess one pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetProfile {
    pub pet: Pet,
    /// Weight history, any order
    pub weight_history: Vec<WeightSample>,
    pub vaccines: Vec<VaccineRecord>,
}

impl PetProfile {
    /// Profile with no history.
    pub fn from_pet(pet: Pet) -> Self {
        Self {
            pet,
            weight_history: Vec::new(),
            vaccines: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_vaccine_status() {
        let today = date(2024, 6, 1);

        let mut rabies = VaccineRecord::new("Rabies".into());
        rabies.applied_date = Some(date(2023, 1, 10));
        rabies.next_due_date = Some(date(2024, 1, 10));
        assert_eq!(rabies.status(today), VaccineStatus::Overdue);

        rabies.next_due_date = Some(date(2025, 1, 10));
        assert_eq!(rabies.status(today), VaccineStatus::UpToDate);

        let mut dhpp = VaccineRecord::new("DHPP".into());
        dhpp.next_due_date = Some(date(2024, 5, 1));
        assert_eq!(dhpp.status(today), VaccineStatus::NeverApplied);
        assert!(dhpp.is_flagged(today));

        dhpp.next_due_date = Some(date(2024, 7, 1));
        assert_eq!(dhpp.status(today), VaccineStatus::Pending);
        assert!(!dhpp.is_flagged(today));
    }

    #[test]
    fn test_due_today_is_not_past_due() {
        let today = date(2024, 6, 1);
        let mut record = VaccineRecord::new("Lepto".into());
        record.applied_date = Some(date(2023, 6, 1));
        record.next_due_date = Some(today);
        assert_eq!(record.status(today), VaccineStatus::UpToDate);
    }
}
