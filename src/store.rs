//! The persistence gateway: the saved week plan plus a cached catalog
//! snapshot, both small JSON documents under the state directory.
//!
//! Loading is forgiving by design: missing or malformed state is reported as
//! absent, never surfaced to the user, and the caller starts fresh.

use mealpalette_catalog::{Catalog, Inventory, Meal};
use mealpalette_mealplan::WeekPlan;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Bumped whenever the snapshot layout changes; older caches are discarded.
pub const CACHE_VERSION: u32 = 2;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A catalog captured at a point in time, reusable until it goes stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u32,
    pub saved_at_secs: u64,
    pub meals: Vec<Meal>,
    pub inventory: Inventory,
}

impl CatalogSnapshot {
    pub fn capture(catalog: &Catalog) -> Self {
        CatalogSnapshot {
            version: CACHE_VERSION,
            saved_at_secs: unix_now(),
            meals: catalog.meals().to_vec(),
            inventory: catalog.inventory().clone(),
        }
    }

    /// Usable at all: right version and actually carrying data.
    pub fn is_current(&self) -> bool {
        self.version == CACHE_VERSION && !self.meals.is_empty()
    }

    /// Still within its time-to-live.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        unix_now().saturating_sub(self.saved_at_secs) <= ttl.as_secs()
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.meals, self.inventory)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

pub trait PlanStore {
    /// The saved plan, or `None` when there is none or it is malformed.
    fn load_plan(&self) -> Result<Option<WeekPlan>, StoreError>;

    fn save_plan(&self, plan: &WeekPlan) -> Result<(), StoreError>;

    /// The cached catalog snapshot, or `None` when absent or malformed.
    /// Version and freshness checks are the caller's decision.
    fn load_cache(&self) -> Result<Option<CatalogSnapshot>, StoreError>;

    fn save_cache(&self, snapshot: &CatalogSnapshot) -> Result<(), StoreError>;

    fn clear_cache(&self) -> Result<(), StoreError>;
}

/// JSON files under a state directory, one document per concern.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    fn plan_path(&self) -> PathBuf {
        self.dir.join("plan.json")
    }

    fn cache_path(&self) -> PathBuf {
        self.dir.join("catalog_cache.json")
    }

    fn read_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &Path,
    ) -> Result<Option<T>, StoreError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                // Malformed state is discarded, not surfaced.
                tracing::warn!(path = %path.display(), error = %err, "discarding malformed state file");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, serde_json::to_string(value)?)?;
        Ok(())
    }
}

impl PlanStore for JsonFileStore {
    fn load_plan(&self) -> Result<Option<WeekPlan>, StoreError> {
        self.read_json(&self.plan_path())
    }

    fn save_plan(&self, plan: &WeekPlan) -> Result<(), StoreError> {
        self.write_json(&self.plan_path(), plan)
    }

    fn load_cache(&self) -> Result<Option<CatalogSnapshot>, StoreError> {
        self.read_json(&self.cache_path())
    }

    fn save_cache(&self, snapshot: &CatalogSnapshot) -> Result<(), StoreError> {
        self.write_json(&self.cache_path(), snapshot)
    }

    fn clear_cache(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.cache_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plan: RefCell<Option<WeekPlan>>,
    cache: RefCell<Option<CatalogSnapshot>>,
}

impl PlanStore for MemoryStore {
    fn load_plan(&self) -> Result<Option<WeekPlan>, StoreError> {
        Ok(self.plan.borrow().clone())
    }

    fn save_plan(&self, plan: &WeekPlan) -> Result<(), StoreError> {
        *self.plan.borrow_mut() = Some(plan.clone());
        Ok(())
    }

    fn load_cache(&self) -> Result<Option<CatalogSnapshot>, StoreError> {
        Ok(self.cache.borrow().clone())
    }

    fn save_cache(&self, snapshot: &CatalogSnapshot) -> Result<(), StoreError> {
        *self.cache.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    fn clear_cache(&self) -> Result<(), StoreError> {
        *self.cache.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealpalette_shared::MealSlot;
    use temp_dir::TempDir;

    fn meal(name: &str) -> Meal {
        Meal {
            name: name.to_string(),
            cuisine: String::new(),
            format: String::new(),
            meal_type: String::new(),
            red_flags: String::new(),
            green_flags: String::new(),
            ingredients: vec!["egg".to_string()],
        }
    }

    #[test]
    fn test_plan_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load_plan().unwrap().is_none());

        let mut plan = WeekPlan::default();
        plan.assign(2, MealSlot::Lunch, meal("Wrap"));
        store.save_plan(&plan).unwrap();

        assert_eq!(store.load_plan().unwrap().unwrap(), plan);
    }

    #[test]
    fn test_malformed_plan_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("plan.json"), "[{},{}]").unwrap();

        // Wrong length: treated as absent, not an error.
        assert!(store.load_plan().unwrap().is_none());
    }

    #[test]
    fn test_garbage_plan_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("plan.json"), "not json at all").unwrap();

        assert!(store.load_plan().unwrap().is_none());
    }

    #[test]
    fn test_cache_roundtrip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let catalog = Catalog::new(vec![meal("Toast")], Inventory::default());

        let snapshot = CatalogSnapshot::capture(&catalog);
        assert!(snapshot.is_current());
        assert!(snapshot.is_fresh(Duration::from_secs(60)));

        store.save_cache(&snapshot).unwrap();
        let loaded = store.load_cache().unwrap().unwrap();
        assert_eq!(loaded.meals.len(), 1);

        store.clear_cache().unwrap();
        assert!(store.load_cache().unwrap().is_none());
        // Clearing twice is fine.
        store.clear_cache().unwrap();
    }

    #[test]
    fn test_version_mismatch_is_not_current() {
        let catalog = Catalog::new(vec![meal("Toast")], Inventory::default());
        let mut snapshot = CatalogSnapshot::capture(&catalog);
        snapshot.version = CACHE_VERSION + 1;
        assert!(!snapshot.is_current());
    }

    #[test]
    fn test_empty_snapshot_is_not_current() {
        let snapshot = CatalogSnapshot::capture(&Catalog::default());
        assert!(!snapshot.is_current());
    }

    #[test]
    fn test_stale_snapshot() {
        let catalog = Catalog::new(vec![meal("Toast")], Inventory::default());
        let mut snapshot = CatalogSnapshot::capture(&catalog);
        snapshot.saved_at_secs -= 7200;
        assert!(!snapshot.is_fresh(Duration::from_secs(3600)));
        assert!(snapshot.is_fresh(Duration::from_secs(86400)));
    }
}
