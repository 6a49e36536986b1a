//! Pet models.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Species supported by the risk models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Reptile,
    #[default]
    Other,
}

impl Species {
    /// Parse a free-text species label. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "dog" | "perro" | "perra" | "canine" | "canino" | "canina" => Species::Dog,
            "cat" | "gato" | "gata" | "feline" | "felino" | "felina" => Species::Cat,
            "bird" | "ave" | "pajaro" | "pájaro" | "avian" => Species::Bird,
            "rabbit" | "conejo" | "coneja" | "lagomorph" => Species::Rabbit,
            "reptile" | "reptil" => Species::Reptile,
            _ => Species::Other,
        }
    }

    /// Canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Bird => "bird",
            Species::Rabbit => "rabbit",
            Species::Reptile => "reptile",
            Species::Other => "other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// Local UUID - always present, generated locally
    pub local_id: String,
    /// Pet name
    pub name: String,
    /// Species
    pub species: Species,
    /// Breed as free text (e.g., "Labrador Retriever", "Pastor Alemán")
    pub breed: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Latest known weight in kg
    pub weight_kg: Option<f64>,
    /// Spayed/neutered
    pub is_sterilized: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Pet {
    /// Create a new pet with required fields.
    pub fn new(name: String, species: Species) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            local_id: uuid::Uuid::new_v4().to_string(),
            name,
            species,
            breed: None,
            birth_date: None,
            weight_kg: None,
            is_sterilized: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Age in whole years as the difference of calendar years.
    ///
    /// Month and day are ignored. A missing birth date counts as age 0.
    pub fn age_years(&self, today: NaiveDate) -> u32 {
        self.birth_date
            .map(|birth| (today.year() - birth.year()).max(0) as u32)
            .unwrap_or(0)
    }

    /// Weight usable by the models; `None` when missing or non-positive.
    pub fn known_weight(&self) -> Option<f64> {
        self.weight_kg.filter(|w| w.is_finite() && *w > 0.0)
    }

    /// Breed text, empty when unknown.
    pub fn breed_text(&self) -> &str {
        self.breed.as_deref().unwrap_or("")
    }
}
