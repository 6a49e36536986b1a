//! Lifestyle-driven advice.
//!
//! Lifestyle answers never move a probability. They only append advice to
//! the risks they are relevant to.

use crate::models::{
    Condition, DietQuality, ExerciseLevel, LifestyleInput, RiskResult, VetVisitFrequency,
};

/// Append lifestyle advice to matching risks.
pub fn apply_lifestyle(risks: &mut [RiskResult], lifestyle: &LifestyleInput) {
    for risk in risks.iter_mut() {
        risk.recommendations
            .extend(advice_for(risk.condition, lifestyle).into_iter().map(String::from));
    }
}

fn advice_for(condition: Condition, lifestyle: &LifestyleInput) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if lifestyle.exercise == ExerciseLevel::Low {
        match condition {
            Condition::Obesity => {
                advice.push("Add at least two 20-minute walks or play sessions a day")
            }
            Condition::Arthritis => advice.push("Build up gentle daily activity to keep joints mobile"),
            Condition::Cardiac => {
                advice.push("Increase activity gradually and only after a cardiac check")
            }
            _ => {}
        }
    }

    if lifestyle.diet == DietQuality::Poor {
        match condition {
            Condition::Obesity => {
                advice.push("Switch to a complete, portion-controlled commercial diet")
            }
            Condition::Diabetes => advice.push("Remove table scraps and sugary treats"),
            Condition::Dental => advice.push("Replace soft food treats with dental-friendly kibble"),
            _ => {}
        }
    }

    if lifestyle.vet_visits == VetVisitFrequency::Never {
        match condition {
            Condition::Vaccination => {
                advice.push("Book a wellness visit to review the vaccination calendar")
            }
            Condition::Dental => advice.push("Have the teeth examined at a first wellness visit"),
            _ => advice.push("An annual check-up would catch this early"),
        }
    }

    advice
}
