use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything read from one recipe page. A field is `None` when the page
/// did not yield it; `ingredients` is `None` if any single line failed to
/// reduce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeRecord {
    pub url: String,
    pub name: Option<String>,
    pub rating: Option<f32>,
    pub ingredients: Option<BTreeSet<String>>,
    /// Canonical nutrient name to value, e.g. `"Total Fat" -> "12g"`
    pub nutrition: Option<BTreeMap<String, String>>,
}

impl RecipeRecord {
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.rating.is_some()
            && self.ingredients.is_some()
            && self.nutrition.is_some()
    }

    /// Names of the fields that are missing, for logging.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.rating.is_none() {
            missing.push("rating");
        }
        if self.ingredients.is_none() {
            missing.push("ingredients");
        }
        if self.nutrition.is_none() {
            missing.push("nutrition");
        }
        missing
    }

    /// The dataset row for a complete record.
    pub fn into_row(self) -> Option<DatasetRow> {
        match (self.name, self.rating, self.ingredients, self.nutrition) {
            (Some(title), Some(rating), Some(ingredients), Some(nutrition)) => Some(DatasetRow {
                title,
                rating,
                ingredients,
                nutrition,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    pub title: String,
    pub rating: f32,
    pub ingredients: BTreeSet<String>,
    pub nutrition: BTreeMap<String, String>,
}

/// Rows in link order, plus the link index of every recipe left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
    pub failed: Vec<usize>,
}
