//! The application state: one struct owning the catalog, the planner and the
//! persistence gateway, with synchronous accessors and mutators. Surfaces
//! (the CLI here, a UI elsewhere) hold an [`App`] and never touch globals.

use crate::source::{load_catalog, CatalogSource, LoadError};
use crate::store::{CatalogSnapshot, PlanStore};
use mealpalette_catalog::{Catalog, Meal};
use mealpalette_mealplan::{
    color_counts_for_day, color_counts_for_week, filtered_meals, missing_colors_for_day,
    sort_meals, Filters, MealTypeFilter, Planner, SelectedSlot, Usage, WeekPlan,
};
use mealpalette_shared::{ColorCounts, MealSlot, ProduceColor, StorageLocation};
use mealpalette_shopping::{expiring_items, grocery_list, inventory_by_location, StockItem};
use std::collections::BTreeMap;
use std::time::Duration;

/// Token handed out per load request. A completing load only lands if its
/// token is still the newest one, so overlapping reloads cannot install a
/// stale catalog over a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGeneration(u64);

pub struct App {
    catalog: Catalog,
    planner: Planner,
    store: Box<dyn PlanStore>,
    load_generation: u64,
}

impl App {
    /// Start from whatever the store has. A missing or malformed plan means
    /// an empty week; the catalog starts empty until a load completes.
    pub fn new(store: Box<dyn PlanStore>) -> App {
        let plan = match store.load_plan() {
            Ok(Some(plan)) => plan,
            Ok(None) => WeekPlan::default(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved plan, starting empty");
                WeekPlan::default()
            }
        };
        App {
            catalog: Catalog::default(),
            planner: Planner::new(plan),
            store,
            load_generation: 0,
        }
    }

    // ---- catalog loading ----

    /// Register a new load request and get its token.
    pub fn begin_load(&mut self) -> LoadGeneration {
        self.load_generation += 1;
        LoadGeneration(self.load_generation)
    }

    /// Install a loaded catalog, unless a newer load has been requested since
    /// `generation` was handed out. Returns whether the catalog was installed.
    pub fn apply_load(&mut self, generation: LoadGeneration, catalog: Catalog) -> bool {
        if generation.0 != self.load_generation {
            tracing::debug!(
                stale = generation.0,
                latest = self.load_generation,
                "discarding stale catalog load"
            );
            return false;
        }
        self.catalog = catalog;
        true
    }

    /// Fetch from `primary` (falling back to `fallback`), install the result
    /// and refresh the cache. On failure the current catalog stays untouched.
    pub fn reload(
        &mut self,
        primary: &dyn CatalogSource,
        fallback: Option<&dyn CatalogSource>,
    ) -> Result<(), LoadError> {
        let generation = self.begin_load();
        let catalog = load_catalog(primary, fallback)?;
        if self.apply_load(generation, catalog) {
            if let Err(err) = self.store.save_cache(&CatalogSnapshot::capture(&self.catalog)) {
                tracing::warn!(error = %err, "could not write catalog cache");
            }
        }
        Ok(())
    }

    /// Reuse the cached catalog snapshot if it is valid and younger than
    /// `ttl`. Returns whether a catalog was installed.
    pub fn restore_cached_catalog(&mut self, ttl: Duration) -> bool {
        let snapshot = match self.store.load_cache() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "could not read catalog cache");
                return false;
            }
        };
        if !snapshot.is_current() || !snapshot.is_fresh(ttl) {
            tracing::debug!("catalog cache is stale or outdated, ignoring");
            if let Err(err) = self.store.clear_cache() {
                tracing::warn!(error = %err, "could not clear catalog cache");
            }
            return false;
        }
        let generation = self.begin_load();
        self.apply_load(generation, snapshot.into_catalog())
    }

    /// Drop the cached snapshot so the next load fetches fresh data.
    pub fn invalidate_cache(&mut self) {
        if let Err(err) = self.store.clear_cache() {
            tracing::warn!(error = %err, "could not clear catalog cache");
        }
    }

    // ---- read-only views ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn plan(&self) -> &WeekPlan {
        self.planner.plan()
    }

    pub fn selection(&self) -> Option<SelectedSlot> {
        self.planner.selection()
    }

    pub fn filters(&self) -> &Filters {
        self.planner.filters()
    }

    /// The catalog filtered by the active filters and ranked for display.
    pub fn meals_view(&self) -> Vec<&Meal> {
        let usage = self.usage();
        let meals = filtered_meals(&self.catalog, &usage, self.planner.filters());
        sort_meals(meals, &self.catalog, &usage, self.planner.filters())
    }

    pub fn day_colors(&self, day: usize) -> ColorCounts {
        color_counts_for_day(self.planner.plan(), &self.catalog, day)
    }

    pub fn week_colors(&self) -> ColorCounts {
        color_counts_for_week(self.planner.plan(), &self.catalog)
    }

    pub fn missing_colors(&self, day: usize) -> Vec<ProduceColor> {
        missing_colors_for_day(self.planner.plan(), &self.catalog, day)
    }

    pub fn grocery_list(&self) -> BTreeMap<String, u32> {
        grocery_list(&self.catalog, &self.usage())
    }

    pub fn stock_by_location(&self) -> BTreeMap<StorageLocation, Vec<StockItem>> {
        inventory_by_location(&self.catalog, &self.usage())
    }

    pub fn expiring_items(&self) -> Vec<StockItem> {
        expiring_items(&self.catalog, &self.usage())
    }

    fn usage(&self) -> Usage {
        Usage::from_plan(self.planner.plan())
    }

    // ---- plan mutations (persisted) ----

    pub fn select_slot(&mut self, day: usize, slot: MealSlot) {
        self.planner.select_slot(day, slot, &self.catalog);
    }

    /// Assign a catalog meal to the selected slot. Returns false when idle or
    /// when the name is not in the catalog.
    pub fn assign_meal(&mut self, meal_name: &str) -> bool {
        let Some(meal) = self.catalog.meal(meal_name).cloned() else {
            tracing::warn!(meal = meal_name, "unknown meal, nothing assigned");
            return false;
        };
        let changed = self.planner.assign_meal(meal, &self.catalog);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn remove_meal(&mut self, day: usize, slot: MealSlot) {
        if self.planner.remove_meal(day, slot) {
            self.persist();
        }
    }

    pub fn clear_day(&mut self, day: usize) {
        if self.planner.clear_day(day) {
            self.persist();
        }
    }

    /// Destructive: the surface must have confirmed with the user first.
    pub fn clear_week(&mut self) {
        if self.planner.clear_week() {
            self.persist();
        }
    }

    // ---- filter mutations (transient, not persisted) ----

    pub fn set_meal_type(&mut self, meal_type: MealTypeFilter) {
        self.planner.filters_mut().set_meal_type(meal_type);
    }

    pub fn toggle_protein(&mut self, protein: &str) {
        self.planner.filters_mut().toggle_protein(protein);
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        self.planner.filters_mut().toggle_cuisine(cuisine);
    }

    pub fn toggle_color(&mut self, color: ProduceColor) {
        self.planner.filters_mut().toggle_color(color);
    }

    pub fn toggle_ingredient(&mut self, ingredient: &str) {
        self.planner.filters_mut().toggle_ingredient(ingredient);
    }

    pub fn toggle_expiring_only(&mut self) {
        self.planner.filters_mut().toggle_expiring_only();
    }

    pub fn clear_filters(&mut self) {
        self.planner.filters_mut().clear();
    }

    fn persist(&self) {
        // Mirrors the browser behavior: a failed save keeps the in-memory
        // plan usable and is only reported, never raised.
        if let Err(err) = self.store.save_plan(self.planner.plan()) {
            tracing::error!(error = %err, "failed to save plan");
        }
    }
}
