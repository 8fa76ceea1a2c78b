//! Catalog filtering and relevance ranking.
//!
//! A meal passes when ALL active dimensions accept it; inside a multi-valued
//! dimension any member matches, except the ingredients dimension which
//! requires every selected ingredient. Each dimension has its own typed
//! toggle; there is no string-tag dispatch.

use crate::usage::Usage;
use mealpalette_catalog::{Catalog, Meal};
use mealpalette_shared::{MealSlot, ProduceColor};
use std::collections::BTreeSet;

/// Meal-type dimension: everything, or exactly one slot's name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MealTypeFilter {
    #[default]
    All,
    Slot(MealSlot),
}

impl MealTypeFilter {
    fn accepts(self, meal: &Meal) -> bool {
        match self {
            MealTypeFilter::All => true,
            MealTypeFilter::Slot(slot) => meal.meal_type == slot.as_ref(),
        }
    }
}

/// Active catalog filters. Transient view state: never persisted, reset as a
/// whole by [`Filters::clear`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub meal_type: MealTypeFilter,
    pub proteins: BTreeSet<String>,
    pub cuisines: BTreeSet<String>,
    pub colors_needed: BTreeSet<ProduceColor>,
    pub expiring_only: bool,
    pub ingredients: BTreeSet<String>,
}

impl Filters {
    pub fn set_meal_type(&mut self, meal_type: MealTypeFilter) {
        self.meal_type = meal_type;
    }

    pub fn toggle_protein(&mut self, protein: &str) {
        toggle(&mut self.proteins, protein.to_string());
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        toggle(&mut self.cuisines, cuisine.to_string());
    }

    pub fn toggle_color(&mut self, color: ProduceColor) {
        toggle(&mut self.colors_needed, color);
    }

    pub fn toggle_ingredient(&mut self, ingredient: &str) {
        toggle(&mut self.ingredients, ingredient.to_lowercase());
    }

    pub fn toggle_expiring_only(&mut self) {
        self.expiring_only = !self.expiring_only;
    }

    /// Replace the needed-color set wholesale (slot selection does this).
    pub fn set_colors_needed(&mut self, colors: impl IntoIterator<Item = ProduceColor>) {
        self.colors_needed = colors.into_iter().collect();
    }

    /// Back to the defaults: every dimension empty, meal type `All`.
    pub fn clear(&mut self) {
        *self = Filters::default();
    }

    fn accepts(&self, catalog: &Catalog, usage: &Usage, meal: &Meal) -> bool {
        if !self.meal_type.accepts(meal) {
            return false;
        }

        if !self.proteins.is_empty() {
            let meal_proteins = catalog.proteins_of(&meal.name);
            if !meal_proteins
                .iter()
                .any(|protein| self.proteins.contains(protein))
            {
                return false;
            }
        }

        if !self.cuisines.is_empty() && !self.cuisines.contains(&meal.cuisine) {
            return false;
        }

        if !self.colors_needed.is_empty() {
            let colors = catalog.colors_of(&meal.name);
            if colors.matches(self.colors_needed.iter().copied()) == 0 {
                return false;
            }
        }

        if self.expiring_only && !usage.meal_has_expiring(catalog, &meal.name) {
            return false;
        }

        if !self.ingredients.is_empty() {
            let ingredients = catalog.ingredients_of(&meal.name);
            if !self
                .ingredients
                .iter()
                .all(|wanted| ingredients.contains(wanted))
            {
                return false;
            }
        }

        true
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Catalog meals passing every active filter, in catalog order.
pub fn filtered_meals<'c>(
    catalog: &'c Catalog,
    usage: &Usage,
    filters: &Filters,
) -> Vec<&'c Meal> {
    catalog
        .meals()
        .iter()
        .filter(|meal| filters.accepts(catalog, usage, meal))
        .collect()
}

/// Rank meals for display: expiring-ingredient meals first, then (when colors
/// are requested) by how many requested colors a meal covers. Ties keep their
/// incoming order.
pub fn sort_meals<'c>(
    meals: Vec<&'c Meal>,
    catalog: &Catalog,
    usage: &Usage,
    filters: &Filters,
) -> Vec<&'c Meal> {
    let mut ranked: Vec<(&Meal, bool, usize)> = meals
        .into_iter()
        .map(|meal| {
            let expiring = usage.meal_has_expiring(catalog, &meal.name);
            let color_score = if filters.colors_needed.is_empty() {
                0
            } else {
                catalog
                    .colors_of(&meal.name)
                    .matches(filters.colors_needed.iter().copied())
            };
            (meal, expiring, color_score)
        })
        .collect();

    ranked.sort_by(|(_, a_expiring, a_score), (_, b_expiring, b_score)| {
        b_expiring
            .cmp(a_expiring)
            .then_with(|| b_score.cmp(a_score))
    });

    ranked.into_iter().map(|(meal, _, _)| meal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::WeekPlan;

    const MEALS_CSV: &str = "\
name,cuisine,format,meal_type,red_flags,green_flags,ingredients
Egg Toast,american,stovetop,breakfast,,,\"egg, bread\"
Tofu Curry,indian,one pot,dinner,,,\"tofu, tomato, rice\"
Paneer Wrap,indian,wrap,lunch,,,\"paneer, spinach, bread\"
Berry Bowl,,bowl,breakfast,,,\"blueberry, yogurt, vegetarian\"
Rainbow Plate,,plate,dinner,,,\"tomato, blueberry, rice\"
";

    const INVENTORY_CSV: &str = "\
name,category,location,quantity,expires_soon
egg,protein,fridge,6,false
bread,carb,counter,4,false
tofu,protein,fridge,2,false
tomato,red,counter,3,false
rice,carb,pantry,10,false
paneer,protein,fridge,1,TRUE
spinach,leafy_green,fridge,2,false
blueberry,blue_purple,fridge,2,false
yogurt,dairy,fridge,3,false
";

    fn catalog() -> Catalog {
        Catalog::from_csv(MEALS_CSV, INVENTORY_CSV)
    }

    fn no_usage() -> Usage {
        Usage::from_plan(&WeekPlan::default())
    }

    fn names(meals: &[&Meal]) -> Vec<String> {
        meals.iter().map(|meal| meal.name.clone()).collect()
    }

    #[test]
    fn test_no_filters_passes_catalog_in_order() {
        let catalog = catalog();
        let result = filtered_meals(&catalog, &no_usage(), &Filters::default());
        assert_eq!(
            names(&result),
            vec![
                "Egg Toast",
                "Tofu Curry",
                "Paneer Wrap",
                "Berry Bowl",
                "Rainbow Plate"
            ]
        );
    }

    #[test]
    fn test_meal_type_filter_matches_exactly() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.set_meal_type(MealTypeFilter::Slot(MealSlot::Breakfast));
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(names(&result), vec!["Egg Toast", "Berry Bowl"]);
    }

    #[test]
    fn test_protein_filter_is_any_of() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_protein("tofu");
        filters.toggle_protein("paneer");
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(names(&result), vec!["Tofu Curry", "Paneer Wrap"]);
    }

    #[test]
    fn test_cuisine_filter() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_cuisine("indian");
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(names(&result), vec!["Tofu Curry", "Paneer Wrap"]);
    }

    #[test]
    fn test_color_filter_is_any_of() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_color(ProduceColor::Red);
        filters.toggle_color(ProduceColor::BluePurple);
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(
            names(&result),
            vec!["Tofu Curry", "Berry Bowl", "Rainbow Plate"]
        );
    }

    #[test]
    fn test_ingredient_filter_requires_all() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_ingredient("bread");
        filters.toggle_ingredient("spinach");
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(names(&result), vec!["Paneer Wrap"]);
    }

    #[test]
    fn test_expiring_only_filter() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_expiring_only();
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        // Paneer is the only expiring ingredient with stock on hand.
        assert_eq!(names(&result), vec!["Paneer Wrap"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_cuisine("indian");
        filters.set_meal_type(MealTypeFilter::Slot(MealSlot::Dinner));
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(names(&result), vec!["Tofu Curry"]);
    }

    #[test]
    fn test_toggle_twice_restores_filter() {
        let mut filters = Filters::default();
        let before = filters.clone();
        filters.toggle_protein("tofu");
        filters.toggle_protein("tofu");
        assert_eq!(filters, before);

        filters.toggle_expiring_only();
        filters.toggle_expiring_only();
        assert_eq!(filters, before);
    }

    #[test]
    fn test_clear_restores_full_catalog() {
        let catalog = catalog();
        let mut filters = Filters::default();
        filters.toggle_cuisine("indian");
        filters.toggle_color(ProduceColor::Red);
        filters.clear();
        let result = filtered_meals(&catalog, &no_usage(), &filters);
        assert_eq!(result.len(), catalog.meals().len());
    }

    #[test]
    fn test_sort_puts_expiring_first() {
        let catalog = catalog();
        let usage = no_usage();
        let filters = Filters::default();
        let sorted = sort_meals(
            filtered_meals(&catalog, &usage, &filters),
            &catalog,
            &usage,
            &filters,
        );
        assert_eq!(sorted[0].name, "Paneer Wrap");
    }

    #[test]
    fn test_sort_ranks_by_requested_color_coverage() {
        let catalog = catalog();
        let usage = no_usage();
        let mut filters = Filters::default();
        filters.toggle_color(ProduceColor::Red);
        filters.toggle_color(ProduceColor::BluePurple);

        let sorted = sort_meals(
            vec![
                catalog.meal("Tofu Curry").unwrap(),
                catalog.meal("Rainbow Plate").unwrap(),
            ],
            &catalog,
            &usage,
            &filters,
        );
        // Rainbow Plate covers both requested colors, Tofu Curry only red.
        assert_eq!(names(&sorted), vec!["Rainbow Plate", "Tofu Curry"]);
    }

    #[test]
    fn test_sort_ignores_colors_when_none_requested() {
        let catalog = catalog();
        let usage = no_usage();
        let filters = Filters::default();
        let sorted = sort_meals(
            vec![
                catalog.meal("Egg Toast").unwrap(),
                catalog.meal("Rainbow Plate").unwrap(),
            ],
            &catalog,
            &usage,
            &filters,
        );
        assert_eq!(names(&sorted), vec!["Egg Toast", "Rainbow Plate"]);
    }

    #[test]
    fn test_sort_is_stable_without_criteria() {
        let catalog = catalog();
        let usage = no_usage();
        let filters = Filters::default();
        let sorted = sort_meals(
            vec![
                catalog.meal("Egg Toast").unwrap(),
                catalog.meal("Tofu Curry").unwrap(),
                catalog.meal("Berry Bowl").unwrap(),
            ],
            &catalog,
            &usage,
            &filters,
        );
        assert_eq!(names(&sorted), vec!["Egg Toast", "Tofu Curry", "Berry Bowl"]);
    }
}
