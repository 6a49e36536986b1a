//! Pet database operations.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{Database, DbError, DbResult};
use crate::models::{Pet, PetProfile, Species};

const PET_COLUMNS: &str = "local_id, name, species, breed, birth_date, weight_kg, \
                           is_sterilized, created_at, updated_at";

fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<Pet> {
    let species: String = row.get(2)?;
    Ok(Pet {
        local_id: row.get(0)?,
        name: row.get(1)?,
        species: Species::from_label(&species),
        breed: row.get(3)?,
        birth_date: row.get(4)?,
        weight_kg: row.get(5)?,
        is_sterilized: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Database {
    /// Insert a new pet.
    pub fn insert_pet(&self, pet: &Pet) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO pets (
                local_id, name, species, breed, birth_date, weight_kg,
                is_sterilized, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                pet.local_id,
                pet.name,
                pet.species.as_str(),
                pet.breed,
                pet.birth_date,
                pet.weight_kg,
                pet.is_sterilized,
                pet.created_at,
                pet.updated_at,
            ],
        )?;
        info!(pet_id = %pet.local_id, species = %pet.species, "inserted pet");
        Ok(())
    }

    /// Update an existing pet.
    pub fn update_pet(&self, pet: &Pet) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE pets SET
                name = ?2,
                species = ?3,
                breed = ?4,
                birth_date = ?5,
                weight_kg = ?6,
                is_sterilized = ?7,
                updated_at = ?8
            WHERE local_id = ?1
            "#,
            params![
                pet.local_id,
                pet.name,
                pet.species.as_str(),
                pet.breed,
                pet.birth_date,
                pet.weight_kg,
                pet.is_sterilized,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a pet by local ID.
    pub fn get_pet(&self, local_id: &str) -> DbResult<Option<Pet>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM pets WHERE local_id = ?", PET_COLUMNS),
                [local_id],
                pet_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search pets by name (prefix match).
    ///
    /// The query is matched literally; `%` and `_` are not wildcards.
    pub fn search_pets(&self, query: &str, limit: usize) -> DbResult<Vec<Pet>> {
        let pattern = format!("{}%", escape_like(query));
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pets WHERE name LIKE ? ESCAPE '\\' ORDER BY name LIMIT ?",
            PET_COLUMNS
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], pet_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all pets.
    pub fn list_pets(&self) -> DbResult<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM pets ORDER BY name", PET_COLUMNS))?;

        let rows = stmt.query_map([], pet_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a pet and its history.
    pub fn delete_pet(&self, local_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM pets WHERE local_id = ?", [local_id])?;
        Ok(rows_affected > 0)
    }

    /// Load a pet with its weight history and vaccines.
    pub fn load_profile(&self, local_id: &str) -> DbResult<PetProfile> {
        let pet = self
            .get_pet(local_id)?
            .ok_or_else(|| DbError::NotFound(format!("pet {}", local_id)))?;

        Ok(PetProfile {
            weight_history: self.list_weight_samples(local_id)?,
            vaccines: self.list_vaccine_records(local_id)?,
            pet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut pet = Pet::new("Max".into(), Species::Dog);
        pet.breed = Some("Golden Retriever".into());
        pet.birth_date = NaiveDate::from_ymd_opt(2018, 4, 2);
        pet.weight_kg = Some(30.0);
        pet.is_sterilized = true;

        db.insert_pet(&pet).unwrap();

        let retrieved = db.get_pet(&pet.local_id).unwrap().unwrap();
        assert_eq!(retrieved, pet);
    }

    #[test]
    fn test_get_missing() {
        let db = setup_db();
        assert!(db.get_pet("nope").unwrap().is_none());
        assert!(matches!(db.load_profile("nope"), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_update_pet() {
        let db = setup_db();

        let mut pet = Pet::new("Max".into(), Species::Dog);
        db.insert_pet(&pet).unwrap();

        pet.weight_kg = Some(32.0);
        pet.is_sterilized = true;
        assert!(db.update_pet(&pet).unwrap());

        let retrieved = db.get_pet(&pet.local_id).unwrap().unwrap();
        assert_eq!(retrieved.weight_kg, Some(32.0));
        assert!(retrieved.is_sterilized);
        assert!(chrono::DateTime::parse_from_rfc3339(&retrieved.updated_at).is_ok());
    }

    #[test]
    fn test_search_pets() {
        let db = setup_db();

        db.insert_pet(&Pet::new("Max".into(), Species::Dog)).unwrap();
        db.insert_pet(&Pet::new("Maxine".into(), Species::Cat)).unwrap();
        db.insert_pet(&Pet::new("Luna".into(), Species::Dog)).unwrap();

        let results = db.search_pets("Max", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|p| p.name == "Max"));
        assert!(results.iter().any(|p| p.name == "Maxine"));

        let all = db.list_pets().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Luna");
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let db = setup_db();

        db.insert_pet(&Pet::new("Max".into(), Species::Dog)).unwrap();
        db.insert_pet(&Pet::new("Luna".into(), Species::Cat)).unwrap();
        db.insert_pet(&Pet::new("100% Toby".into(), Species::Dog)).unwrap();
        db.insert_pet(&Pet::new("Bo_b".into(), Species::Bird)).unwrap();

        assert!(db.search_pets("%", 10).unwrap().is_empty());
        assert!(db.search_pets("_", 10).unwrap().is_empty());
        assert!(db.search_pets("M_x", 10).unwrap().is_empty());

        let percent = db.search_pets("100%", 10).unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "100% Toby");

        let underscore = db.search_pets("Bo_", 10).unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "Bo_b");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Max"), "Max");
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }

    #[test]
    fn test_delete_pet() {
        let db = setup_db();
        let pet = Pet::new("Max".into(), Species::Dog);
        db.insert_pet(&pet).unwrap();

        assert!(db.delete_pet(&pet.local_id).unwrap());
        assert!(!db.delete_pet(&pet.local_id).unwrap());
    }
}
