use crate::plan::WeekPlan;
use mealpalette_catalog::meal::VEGETARIAN_SENTINEL;
use mealpalette_catalog::Catalog;
use std::collections::HashMap;

/// Aggregate ingredient demand of the planned week.
///
/// Each planned meal consumes one serving of each of its ingredients,
/// regardless of recipe quantities. The `vegetarian` tag is never demand.
/// Build once per derivation pass; the plan-wide scan is what makes the
/// expiring checks cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Usage {
    demand: HashMap<String, u32>,
}

impl Usage {
    pub fn from_plan(plan: &WeekPlan) -> Usage {
        let mut demand: HashMap<String, u32> = HashMap::new();
        for (_, _, meal) in plan.meals() {
            for ingredient in &meal.ingredients {
                if ingredient != VEGETARIAN_SENTINEL {
                    *demand.entry(ingredient.clone()).or_insert(0) += 1;
                }
            }
        }
        Usage { demand }
    }

    /// Servings of `ingredient` the plan consumes.
    pub fn demand(&self, ingredient: &str) -> u32 {
        self.demand.get(ingredient).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.demand
            .iter()
            .map(|(ingredient, count)| (ingredient.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }

    /// Whether the plan already consumes everything on hand.
    pub fn fully_used(&self, ingredient: &str, on_hand: u32) -> bool {
        self.demand(ingredient) >= on_hand
    }

    /// Whether a meal uses an ingredient still at risk of expiring unused:
    /// flagged expires-soon, some on hand, and not already fully consumed by
    /// the week's demand.
    pub fn meal_has_expiring(&self, catalog: &Catalog, meal_name: &str) -> bool {
        catalog.ingredients_of(meal_name).iter().any(|ingredient| {
            let info = catalog.info_of(ingredient);
            info.expires_soon
                && info.quantity > 0
                && !self.fully_used(ingredient, info.quantity)
        })
    }
}
