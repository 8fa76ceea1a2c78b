//! Produce-color coverage derived from the plan.
//!
//! Counts are recomputed from ingredient names against the live catalog on
//! every read; nothing is cached inside plan slots, so inventory category
//! edits show up immediately.

use crate::plan::WeekPlan;
use mealpalette_catalog::Catalog;
use mealpalette_shared::{ColorCounts, ProduceColor, NUM_DAYS};

/// Per-color count of meals in the day exhibiting that color (0..=3).
/// A meal counts once per color no matter how many ingredients share it.
pub fn color_counts_for_day(plan: &WeekPlan, catalog: &Catalog, day: usize) -> ColorCounts {
    let mut counts = ColorCounts::default();
    for (_, meal) in plan.day(day).meals() {
        counts.record(&catalog.colors_for_ingredients(&meal.ingredients));
    }
    counts
}

/// Element-wise sum of the seven day counts (0..=21 per color).
pub fn color_counts_for_week(plan: &WeekPlan, catalog: &Catalog) -> ColorCounts {
    let mut counts = ColorCounts::default();
    for day in 0..NUM_DAYS {
        counts.merge(&color_counts_for_day(plan, catalog, day));
    }
    counts
}

/// Colors the day has none of. Drives the recommendation filter when a slot
/// of that day is selected.
pub fn missing_colors_for_day(
    plan: &WeekPlan,
    catalog: &Catalog,
    day: usize,
) -> Vec<ProduceColor> {
    color_counts_for_day(plan, catalog, day).missing()
}
