pub mod colors;
pub mod filter;
pub mod plan;
pub mod planner;
pub mod usage;

pub use colors::{color_counts_for_day, color_counts_for_week, missing_colors_for_day};
pub use filter::{filtered_meals, sort_meals, Filters, MealTypeFilter};
pub use plan::{DayPlan, WeekPlan};
pub use planner::{Planner, SelectedSlot};
pub use usage::Usage;
