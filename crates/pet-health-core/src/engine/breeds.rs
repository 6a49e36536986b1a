//! Breed classification by fuzzy substring matching.
//!
//! Breed names are free text entered by owners and clinics, often in
//! Spanish or English. A breed belongs to a list when its lowercased
//! text contains any of the list's fragments.

use serde::{Deserialize, Serialize};

/// Dog size class used to pick an ideal weight bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DogSize {
    Small,
    Medium,
    Large,
}

/// Curated breed lists.
#[derive(Debug, Clone)]
pub struct BreedTable {
    small_dogs: Vec<String>,
    large_dogs: Vec<String>,
    cardiac_prone: Vec<String>,
    diabetes_prone: Vec<String>,
}

impl Default for BreedTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BreedTable {
    /// Create a table with the default lists.
    pub fn new() -> Self {
        Self {
            small_dogs: to_owned(&[
                "chihuahua",
                "pomerania",
                "pomeranian",
                "yorkshire",
                "yorkie",
                "maltes",
                "maltés",
                "maltese",
                "shih tzu",
                "pug",
                "carlino",
                "dachshund",
                "teckel",
                "salchicha",
                "bichon",
                "bichón",
                "pinscher",
                "papillon",
                "caniche toy",
                "toy poodle",
                "french bulldog",
                "bulldog francés",
                "bulldog frances",
                "jack russell",
                "cavalier",
                "lhasa",
                "pekin",
                "pekinés",
                "pekingese",
            ]),
            large_dogs: to_owned(&[
                "labrador",
                "golden",
                "pastor alemán",
                "pastor aleman",
                "german shepherd",
                "rottweiler",
                "gran danés",
                "gran danes",
                "great dane",
                "doberman",
                "dóberman",
                "mastin",
                "mastín",
                "mastiff",
                "san bernardo",
                "saint bernard",
                "bernese",
                "boyero de berna",
                "husky",
                "malamute",
                "akita",
                "boxer",
                "newfoundland",
                "terranova",
                "dogo",
                "weimaraner",
                "rhodesian",
                "pastor belga",
                "belgian malinois",
            ]),
            cardiac_prone: to_owned(&[
                "cavalier",
                "doberman",
                "dóberman",
                "boxer",
                "gran danés",
                "gran danes",
                "great dane",
                "cocker",
                "chihuahua",
                "maltes",
                "maltés",
                "maltese",
                "poodle",
                "caniche",
                "maine coon",
                "ragdoll",
                "sphynx",
                "esfinge",
                "persa",
                "persian",
            ]),
            diabetes_prone: to_owned(&[
                "samoyedo",
                "samoyed",
                "schnauzer",
                "poodle",
                "caniche",
                "beagle",
                "dachshund",
                "teckel",
                "salchicha",
                "pug",
                "carlino",
                "bichon",
                "bichón",
                "keeshond",
                "burmese",
                "burmés",
                "birmano",
                "siamese",
                "siamés",
                "siames",
            ]),
        }
    }

    /// Size class for a dog breed. Unknown breeds count as medium.
    pub fn dog_size(&self, breed: &str) -> DogSize {
        if matches_any(&self.large_dogs, breed) {
            DogSize::Large
        } else if matches_any(&self.small_dogs, breed) {
            DogSize::Small
        } else {
            DogSize::Medium
        }
    }

    pub fn is_large_dog(&self, breed: &str) -> bool {
        matches_any(&self.large_dogs, breed)
    }

    pub fn is_cardiac_prone(&self, breed: &str) -> bool {
        matches_any(&self.cardiac_prone, breed)
    }

    pub fn is_diabetes_prone(&self, breed: &str) -> bool {
        matches_any(&self.diabetes_prone, breed)
    }

    /// Add a breed fragment to the large-dog list.
    pub fn add_large_dog(&mut self, fragment: &str) {
        self.large_dogs.push(fragment.to_lowercase());
    }

    /// Add a breed fragment to the small-dog list.
    pub fn add_small_dog(&mut self, fragment: &str) {
        self.small_dogs.push(fragment.to_lowercase());
    }

    pub fn add_cardiac_prone(&mut self, fragment: &str) {
        self.cardiac_prone.push(fragment.to_lowercase());
    }

    pub fn add_diabetes_prone(&mut self, fragment: &str) {
        self.diabetes_prone.push(fragment.to_lowercase());
    }
}

fn to_owned(fragments: &[&str]) -> Vec<String> {
    fragments.iter().map(|s| s.to_string()).collect()
}

/// Case-insensitive substring match against a fragment list.
fn matches_any(fragments: &[String], breed: &str) -> bool {
    let breed_lower = breed.trim().to_lowercase();
    if breed_lower.is_empty() {
        return false;
    }
    fragments.iter().any(|f| breed_lower.contains(f.as_str()))
}
