//! The slot-assignment state machine.
//!
//! Two states: idle, or one selected slot. Selecting a slot narrows the
//! catalog filters to relevant choices (the slot's meal type plus the day's
//! missing colors); assigning a meal fills the slot and advances the
//! selection to the next empty one so a whole week can be filled in one
//! sweep. The planner never persists anything itself; mutators report whether
//! the plan changed and the owner saves.

use crate::colors::missing_colors_for_day;
use crate::filter::{Filters, MealTypeFilter};
use crate::plan::WeekPlan;
use mealpalette_catalog::{Catalog, Meal};
use mealpalette_shared::{MealSlot, NUM_DAYS};

/// The currently selected slot. Transient: lives and dies with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedSlot {
    pub day: usize,
    pub slot: MealSlot,
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    plan: WeekPlan,
    selection: Option<SelectedSlot>,
    filters: Filters,
}

impl Planner {
    pub fn new(plan: WeekPlan) -> Self {
        Planner {
            plan,
            selection: None,
            filters: Filters::default(),
        }
    }

    pub fn plan(&self) -> &WeekPlan {
        &self.plan
    }

    pub fn selection(&self) -> Option<SelectedSlot> {
        self.selection
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut Filters {
        &mut self.filters
    }

    /// Select a slot, or deselect it if it is already the selected one.
    ///
    /// Selecting narrows the filters to the slot's meal type and the day's
    /// missing colors. Deselecting leaves the filters as they are.
    pub fn select_slot(&mut self, day: usize, slot: MealSlot, catalog: &Catalog) {
        if day >= NUM_DAYS {
            return;
        }
        let target = SelectedSlot { day, slot };
        if self.selection == Some(target) {
            self.selection = None;
            tracing::debug!(day, slot = %slot, "slot deselected");
        } else {
            self.focus(target, catalog);
        }
    }

    /// Write `meal` into the selected slot and advance the selection to the
    /// next empty slot, if any. A no-op while idle.
    ///
    /// Returns true when the plan changed (so the owner persists it).
    pub fn assign_meal(&mut self, meal: Meal, catalog: &Catalog) -> bool {
        let Some(SelectedSlot { day, slot }) = self.selection else {
            return false;
        };

        tracing::debug!(day, slot = %slot, meal = %meal.name, "meal assigned");
        self.plan.assign(day, slot, meal);

        match self.plan.next_empty_slot(day, slot) {
            Some((next_day, next_slot)) => self.focus(
                SelectedSlot {
                    day: next_day,
                    slot: next_slot,
                },
                catalog,
            ),
            None => self.selection = None,
        }
        true
    }

    /// Empty one slot. Selection is left alone.
    pub fn remove_meal(&mut self, day: usize, slot: MealSlot) -> bool {
        if day >= NUM_DAYS || self.plan.slot(day, slot).is_none() {
            return false;
        }
        self.plan.clear_slot(day, slot);
        tracing::debug!(day, slot = %slot, "slot cleared");
        true
    }

    /// Empty all three slots of a day. Selection is left alone.
    pub fn clear_day(&mut self, day: usize) -> bool {
        if day >= NUM_DAYS || self.plan.day(day).is_empty() {
            return false;
        }
        self.plan.clear_day(day);
        tracing::debug!(day, "day cleared");
        true
    }

    /// Replace the whole plan with an empty week and drop the selection.
    ///
    /// Destructive: callers must have confirmed with the user before
    /// invoking this.
    pub fn clear_week(&mut self) -> bool {
        if self.plan.is_empty() && self.selection.is_none() {
            return false;
        }
        self.plan = WeekPlan::default();
        self.selection = None;
        tracing::debug!("week cleared");
        true
    }

    fn focus(&mut self, target: SelectedSlot, catalog: &Catalog) {
        self.selection = Some(target);
        self.filters
            .set_meal_type(MealTypeFilter::Slot(target.slot));
        self.filters
            .set_colors_needed(missing_colors_for_day(&self.plan, catalog, target.day));
        tracing::debug!(day = target.day, slot = %target.slot, "slot selected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealpalette_shared::ProduceColor;

    const MEALS_CSV: &str = "\
name,cuisine,format,meal_type,red_flags,green_flags,ingredients
Tomato Eggs,,,breakfast,,,\"egg, tomato\"
Green Salad,,,lunch,,,\"spinach, cucumber\"
Plain Rice,,,dinner,,,rice
";

    const INVENTORY_CSV: &str = "\
name,category,location,quantity,expires_soon
egg,protein,fridge,6,false
tomato,red,counter,3,false
spinach,leafy_green,fridge,2,false
cucumber,green,fridge,2,false
rice,carb,pantry,10,false
";

    fn catalog() -> Catalog {
        Catalog::from_csv(MEALS_CSV, INVENTORY_CSV)
    }

    fn snapshot(catalog: &Catalog, name: &str) -> Meal {
        catalog.meal(name).cloned().unwrap()
    }

    #[test]
    fn test_select_then_reselect_toggles_off() {
        let catalog = catalog();
        let mut planner = Planner::default();

        planner.select_slot(2, MealSlot::Dinner, &catalog);
        assert_eq!(
            planner.selection(),
            Some(SelectedSlot {
                day: 2,
                slot: MealSlot::Dinner
            })
        );

        planner.select_slot(2, MealSlot::Dinner, &catalog);
        assert_eq!(planner.selection(), None);
        // Deselecting does not reset the auto-narrowed filters.
        assert_eq!(planner.filters().colors_needed.len(), 6);
        assert_eq!(
            planner.filters().meal_type,
            MealTypeFilter::Slot(MealSlot::Dinner)
        );
    }

    #[test]
    fn test_select_narrows_filters_to_slot_and_missing_colors() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(0, MealSlot::Breakfast, &catalog);
        planner.assign_meal(snapshot(&catalog, "Tomato Eggs"), &catalog);

        // Auto-advance landed on (0, lunch); red is covered now.
        assert_eq!(
            planner.filters().meal_type,
            MealTypeFilter::Slot(MealSlot::Lunch)
        );
        assert!(!planner.filters().colors_needed.contains(&ProduceColor::Red));
        assert!(planner
            .filters()
            .colors_needed
            .contains(&ProduceColor::Green));
    }

    #[test]
    fn test_assign_advances_to_next_slot_in_day() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(0, MealSlot::Breakfast, &catalog);

        assert!(planner.assign_meal(snapshot(&catalog, "Tomato Eggs"), &catalog));
        assert_eq!(
            planner.selection(),
            Some(SelectedSlot {
                day: 0,
                slot: MealSlot::Lunch
            })
        );
        assert_eq!(
            planner.plan().slot(0, MealSlot::Breakfast).unwrap().name,
            "Tomato Eggs"
        );
    }

    #[test]
    fn test_assign_wraps_to_next_day() {
        let catalog = catalog();
        let mut planner = Planner::new(WeekPlan::default());
        planner.select_slot(0, MealSlot::Breakfast, &catalog);
        planner.assign_meal(snapshot(&catalog, "Tomato Eggs"), &catalog);
        planner.assign_meal(snapshot(&catalog, "Green Salad"), &catalog);
        planner.assign_meal(snapshot(&catalog, "Plain Rice"), &catalog);

        assert_eq!(
            planner.selection(),
            Some(SelectedSlot {
                day: 1,
                slot: MealSlot::Breakfast
            })
        );
    }

    #[test]
    fn test_assign_goes_idle_when_week_is_full() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(0, MealSlot::Breakfast, &catalog);
        for _ in 0..NUM_DAYS * MealSlot::ALL.len() {
            assert!(planner.assign_meal(snapshot(&catalog, "Plain Rice"), &catalog));
        }

        assert_eq!(planner.selection(), None);
        assert!(planner
            .plan()
            .meals()
            .all(|(_, _, meal)| meal.name == "Plain Rice"));
    }

    #[test]
    fn test_assign_while_idle_is_a_noop() {
        let catalog = catalog();
        let mut planner = Planner::default();
        assert!(!planner.assign_meal(snapshot(&catalog, "Plain Rice"), &catalog));
        assert!(planner.plan().is_empty());
    }

    #[test]
    fn test_remove_meal_keeps_selection() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(0, MealSlot::Breakfast, &catalog);
        planner.assign_meal(snapshot(&catalog, "Tomato Eggs"), &catalog);

        let selection = planner.selection();
        assert!(planner.remove_meal(0, MealSlot::Breakfast));
        assert!(planner.plan().slot(0, MealSlot::Breakfast).is_none());
        assert_eq!(planner.selection(), selection);

        // Removing from an already empty slot changes nothing.
        assert!(!planner.remove_meal(0, MealSlot::Breakfast));
    }

    #[test]
    fn test_clear_week_resets_plan_and_selection() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(3, MealSlot::Lunch, &catalog);
        planner.assign_meal(snapshot(&catalog, "Green Salad"), &catalog);

        assert!(planner.clear_week());
        assert!(planner.plan().is_empty());
        assert_eq!(planner.selection(), None);
        assert!(!planner.clear_week());
    }

    #[test]
    fn test_out_of_range_day_is_ignored() {
        let catalog = catalog();
        let mut planner = Planner::default();
        planner.select_slot(7, MealSlot::Breakfast, &catalog);
        assert_eq!(planner.selection(), None);
        assert!(!planner.clear_day(7));
        assert!(!planner.remove_meal(9, MealSlot::Lunch));
    }
}
