use serde::{Deserialize, Serialize};

/// The literal ingredient value marking a meatless dish. It is a tag, not a
/// groceries item: protein and demand accounting skip it.
pub const VEGETARIAN_SENTINEL: &str = "vegetarian";

/// One catalog meal, as published by the meals sheet.
///
/// The name is the identity (case-sensitive, unique). Meals are immutable
/// once loaded; a reload replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub red_flags: String,
    #[serde(default)]
    pub green_flags: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Meal {
    /// Parse the sheet's comma-separated ingredients cell: trimmed,
    /// lower-cased, empties dropped, order preserved.
    pub fn parse_ingredients(cell: &str) -> Vec<String> {
        cell.split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }
}
