use crate::inventory::{Inventory, InventoryRecord};
use crate::meal::{Meal, VEGETARIAN_SENTINEL};
use crate::table::Table;
use mealpalette_shared::{Category, ColorSet, StorageLocation};
use std::collections::BTreeSet;

/// The combined meal list and inventory mapping loaded from the sheets.
///
/// A catalog is rebuilt atomically per load; readers never observe a
/// half-updated one. Every lookup is total: unknown meals resolve to no
/// ingredients, unknown ingredients to the default inventory record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    meals: Vec<Meal>,
    inventory: Inventory,
}

impl Catalog {
    pub fn new(meals: Vec<Meal>, inventory: Inventory) -> Self {
        Catalog { meals, inventory }
    }

    /// Build a catalog from the two raw sheet exports.
    ///
    /// Degrades field-by-field instead of failing: rows without a name are
    /// dropped, anything else missing or malformed takes its default.
    pub fn from_csv(meals_csv: &str, inventory_csv: &str) -> Self {
        let meals = parse_meals(meals_csv);
        let inventory = parse_inventory(inventory_csv);
        tracing::debug!(
            meals = meals.len(),
            inventory_items = inventory.len(),
            "catalog parsed"
        );
        Catalog { meals, inventory }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.inventory.is_empty()
    }

    /// Exact-name meal lookup (names are case-sensitive identities).
    pub fn meal(&self, name: &str) -> Option<&Meal> {
        self.meals.iter().find(|meal| meal.name == name)
    }

    /// Ingredients of a meal; empty for an unknown meal.
    pub fn ingredients_of(&self, meal_name: &str) -> &[String] {
        self.meal(meal_name)
            .map(|meal| meal.ingredients.as_slice())
            .unwrap_or(&[])
    }

    /// Inventory record for an ingredient; the default record on a miss.
    pub fn info_of(&self, ingredient: &str) -> InventoryRecord {
        self.inventory.info(ingredient)
    }

    /// Produce colors a meal exhibits. Each ingredient contributes at most
    /// its own category's color; a meal may light up several.
    pub fn colors_of(&self, meal_name: &str) -> ColorSet {
        self.colors_for_ingredients(self.ingredients_of(meal_name))
    }

    /// Colors for an explicit ingredient list. Planned-meal snapshots resolve
    /// through here so their colors always reflect the live inventory.
    pub fn colors_for_ingredients(&self, ingredients: &[String]) -> ColorSet {
        let mut colors = ColorSet::default();
        for ingredient in ingredients {
            if let Some(color) = self.info_of(ingredient).category.produce_color() {
                colors.insert(color);
            }
        }
        colors
    }

    /// Protein ingredients of a meal. The `vegetarian` tag is not a protein.
    pub fn proteins_of(&self, meal_name: &str) -> Vec<String> {
        self.ingredients_of(meal_name)
            .iter()
            .filter(|name| {
                name.as_str() != VEGETARIAN_SENTINEL
                    && self.info_of(name).category == Category::Protein
            })
            .cloned()
            .collect()
    }

    /// Carb ingredients of a meal.
    pub fn carbs_of(&self, meal_name: &str) -> Vec<String> {
        self.ingredients_of(meal_name)
            .iter()
            .filter(|name| self.info_of(name).category == Category::Carb)
            .cloned()
            .collect()
    }

    /// Every protein appearing in any meal, sorted, for the filter panel.
    pub fn unique_proteins(&self) -> Vec<String> {
        let mut proteins = BTreeSet::new();
        for meal in &self.meals {
            proteins.extend(self.proteins_of(&meal.name));
        }
        proteins.into_iter().collect()
    }

    /// Every named cuisine, sorted. Empty and `unknown` are placeholders the
    /// sheet uses for untagged meals, not cuisines.
    pub fn unique_cuisines(&self) -> Vec<String> {
        let mut cuisines = BTreeSet::new();
        for meal in &self.meals {
            if !meal.cuisine.is_empty() && meal.cuisine != "unknown" {
                cuisines.insert(meal.cuisine.clone());
            }
        }
        cuisines.into_iter().collect()
    }
}

fn parse_meals(csv: &str) -> Vec<Meal> {
    Table::parse(csv)
        .rows()
        .filter_map(|row| {
            let name = row.get("name").trim();
            if name.is_empty() {
                return None;
            }
            Some(Meal {
                name: name.to_string(),
                cuisine: row.get("cuisine").to_string(),
                format: row.get("format").to_string(),
                meal_type: row.get("meal_type").to_string(),
                red_flags: row.get("red_flags").to_string(),
                green_flags: row.get("green_flags").to_string(),
                ingredients: Meal::parse_ingredients(row.get("ingredients")),
            })
        })
        .collect()
}

fn parse_inventory(csv: &str) -> Inventory {
    Table::parse(csv)
        .rows()
        .filter_map(|row| {
            let name = row.get("name").trim();
            if name.is_empty() {
                return None;
            }
            Some((
                name.to_string(),
                InventoryRecord {
                    category: Category::parse_lossy(row.get("category")),
                    location: StorageLocation::parse_lossy(row.get("location")),
                    quantity: row.get("quantity").trim().parse().unwrap_or(0),
                    expires_soon: matches!(row.get("expires_soon"), "TRUE" | "true"),
                },
            ))
        })
        .collect()
}
