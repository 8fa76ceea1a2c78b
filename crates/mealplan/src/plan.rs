use mealpalette_catalog::Meal;
use mealpalette_shared::{MealSlot, NUM_DAYS};
use serde::{Deserialize, Serialize};

/// The three slots of one day. A slot holds a snapshot of the assigned meal,
/// not a reference into the catalog, so a saved plan survives catalog edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Option<Meal>,
    #[serde(default)]
    pub lunch: Option<Meal>,
    #[serde(default)]
    pub dinner: Option<Meal>,
}

impl DayPlan {
    pub fn slot(&self, slot: MealSlot) -> Option<&Meal> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<Meal> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn clear(&mut self) {
        *self = DayPlan::default();
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_none() && self.lunch.is_none() && self.dinner.is_none()
    }

    /// Filled slots of the day, in slot order.
    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.slot(slot).map(|meal| (slot, meal)))
    }
}

/// A week of exactly [`NUM_DAYS`] days.
///
/// The fixed-size array makes the length invariant structural: deserializing
/// anything that is not a 7-element array fails, and the persistence gateway
/// falls back to an empty plan instead of surfacing the error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekPlan {
    days: [DayPlan; NUM_DAYS],
}

impl WeekPlan {
    pub fn day(&self, day: usize) -> &DayPlan {
        &self.days[day]
    }

    pub fn slot(&self, day: usize, slot: MealSlot) -> Option<&Meal> {
        self.days[day].slot(slot)
    }

    pub fn assign(&mut self, day: usize, slot: MealSlot, meal: Meal) {
        *self.days[day].slot_mut(slot) = Some(meal);
    }

    pub fn clear_slot(&mut self, day: usize, slot: MealSlot) {
        *self.days[day].slot_mut(slot) = None;
    }

    pub fn clear_day(&mut self, day: usize) {
        self.days[day].clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayPlan::is_empty)
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Every planned meal in traversal order (day 0 breakfast first).
    pub fn meals(&self) -> impl Iterator<Item = (usize, MealSlot, &Meal)> {
        self.days.iter().enumerate().flat_map(|(day, day_plan)| {
            day_plan.meals().map(move |(slot, meal)| (day, slot, meal))
        })
    }

    /// The first empty slot strictly after `(day, slot)`: the remainder of the
    /// same day first, then each following day front-to-back. Never wraps back
    /// to earlier days.
    pub fn next_empty_slot(&self, day: usize, slot: MealSlot) -> Option<(usize, MealSlot)> {
        for &later in slot.rest_of_day() {
            if self.slot(day, later).is_none() {
                return Some((day, later));
            }
        }
        for next_day in day + 1..NUM_DAYS {
            for candidate in MealSlot::ALL {
                if self.slot(next_day, candidate).is_none() {
                    return Some((next_day, candidate));
                }
            }
        }
        None
    }
}
