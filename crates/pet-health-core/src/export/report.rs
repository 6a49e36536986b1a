//! Health report export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::engine::HealthEngine;
use crate::models::{HealthAssessment, LifestyleInput};

/// Report format version.
const FORMAT_VERSION: &str = "1.0";

const CSV_HEADER: &str =
    "pet_id,pet_name,assessed_on,condition,probability,severity,formula,recommendations\n";

/// Health report for a single pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// The full assessment
    pub assessment: HealthAssessment,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report format version
    pub format_version: String,
    /// Generation timestamp
    pub generated_at: String,
    /// Pet local ID
    pub pet_id: String,
    /// Pet name
    pub pet_name: String,
    /// Generating system identifier
    pub system_id: Option<String>,
}

impl HealthReport {
    /// Wrap an assessment in a report.
    pub fn from_assessment(assessment: HealthAssessment, system_id: Option<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                format_version: FORMAT_VERSION.to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                pet_id: assessment.pet_id.clone(),
                pet_name: assessment.pet_name.clone(),
                system_id,
            },
            assessment,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one row per reported risk.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        push_rows(&mut csv, &self.assessment);
        csv
    }
}

/// Reports for several pets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchHealthReport {
    /// Generation timestamp
    pub generated_at: String,
    /// Individual reports
    pub reports: Vec<HealthReport>,
    /// Total reported risk count
    pub total_risks: usize,
}

impl BatchHealthReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        for report in &self.reports {
            push_rows(&mut csv, &report.assessment);
        }
        csv
    }
}

fn push_rows(csv: &mut String, assessment: &HealthAssessment) {
    for risk in &assessment.risks {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape_csv(&assessment.pet_id),
            escape_csv(&assessment.pet_name),
            assessment.assessed_on,
            escape_csv(&risk.name),
            risk.probability,
            risk.severity,
            escape_csv(&risk.formula),
            escape_csv(&risk.recommendations.join("; ")),
        ));
    }
}

/// Report exporter.
pub struct ReportExporter<'a> {
    db: &'a Database,
    engine: &'a HealthEngine,
    system_id: Option<String>,
}

impl<'a> ReportExporter<'a> {
    /// Create a new report exporter.
    pub fn new(db: &'a Database, engine: &'a HealthEngine) -> Self {
        Self {
            db,
            engine,
            system_id: engine.config().system_id.clone(),
        }
    }

    /// Set the system identifier for exports.
    pub fn with_system_id(mut self, system_id: String) -> Self {
        self.system_id = Some(system_id);
        self
    }

    /// Export a report for one pet.
    pub fn export_pet(
        &self,
        pet_id: &str,
        lifestyle: Option<&LifestyleInput>,
        today: NaiveDate,
    ) -> DbResult<HealthReport> {
        let profile = self.db.load_profile(pet_id)?;
        let assessment = self.engine.assess(&profile, lifestyle, today);
        Ok(HealthReport::from_assessment(
            assessment,
            self.system_id.clone(),
        ))
    }

    /// Export reports for every stored pet.
    pub fn export_all(&self, today: NaiveDate) -> DbResult<BatchHealthReport> {
        let mut reports = Vec::new();
        let mut total_risks = 0;

        for pet in self.db.list_pets()? {
            let report = self.export_pet(&pet.local_id, None, today)?;
            total_risks += report.assessment.risks.len();
            reports.push(report);
        }

        Ok(BatchHealthReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            reports,
            total_risks,
        })
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
