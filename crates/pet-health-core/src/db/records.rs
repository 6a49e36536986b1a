//! Weight and vaccine history operations.

use chrono::Utc;
use rusqlite::params;
use tracing::info;

use super::{Database, DbError, DbResult};
use crate::models::{VaccineRecord, WeightSample};

impl Database {
    /// Record a weight measurement.
    ///
    /// Rejects non-positive weights. When the sample is the newest on
    /// record, the pet's latest weight is updated too.
    pub fn add_weight_sample(&self, pet_id: &str, sample: &WeightSample) -> DbResult<()> {
        if !sample.weight_kg.is_finite() || sample.weight_kg <= 0.0 {
            return Err(DbError::Constraint(format!(
                "weight must be positive, got {}",
                sample.weight_kg
            )));
        }
        self.require_pet(pet_id)?;

        let tx = self.transaction()?;
        tx.execute(
            "INSERT INTO weight_samples (pet_id, sample_date, weight_kg) VALUES (?1, ?2, ?3)",
            params![pet_id, sample.date, sample.weight_kg],
        )?;

        // Latest sample wins; ties go to the most recently inserted row
        tx.execute(
            r#"
            UPDATE pets SET
                weight_kg = (
                    SELECT weight_kg FROM weight_samples
                    WHERE pet_id = ?1
                    ORDER BY sample_date DESC, id DESC
                    LIMIT 1
                ),
                updated_at = ?2
            WHERE local_id = ?1
            "#,
            params![pet_id, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        info!(pet_id, date = %sample.date, weight_kg = sample.weight_kg, "recorded weight");
        Ok(())
    }

    /// Weight history in chronological order.
    pub fn list_weight_samples(&self, pet_id: &str) -> DbResult<Vec<WeightSample>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT sample_date, weight_kg
            FROM weight_samples
            WHERE pet_id = ?
            ORDER BY sample_date ASC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([pet_id], |row| {
            Ok(WeightSample {
                date: row.get(0)?,
                weight_kg: row.get(1)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Record a vaccine entry.
    pub fn add_vaccine_record(&self, pet_id: &str, record: &VaccineRecord) -> DbResult<()> {
        if record.name.trim().is_empty() {
            return Err(DbError::Constraint("vaccine name is required".into()));
        }
        self.require_pet(pet_id)?;

        self.conn.execute(
            r#"
            INSERT INTO vaccine_records (pet_id, name, applied_date, next_due_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![pet_id, record.name, record.applied_date, record.next_due_date],
        )?;

        info!(pet_id, vaccine = %record.name, "recorded vaccine");
        Ok(())
    }

    /// Vaccines in insertion order.
    pub fn list_vaccine_records(&self, pet_id: &str) -> DbResult<Vec<VaccineRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, applied_date, next_due_date
            FROM vaccine_records
            WHERE pet_id = ?
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt.query_map([pet_id], |row| {
            Ok(VaccineRecord {
                name: row.get(0)?,
                applied_date: row.get(1)?,
                next_due_date: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn require_pet(&self, pet_id: &str) -> DbResult<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pets WHERE local_id = ?)",
            [pet_id],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(DbError::NotFound(format!("pet {}", pet_id)))
        }
    }
}
