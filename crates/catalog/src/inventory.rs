use mealpalette_shared::{Category, StorageLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// On-hand state of one ingredient, as published by the inventory sheet.
///
/// `quantity` is servings on hand. The `Default` value is the "not tracked"
/// record every lookup miss resolves to; an unknown ingredient is ordinary
/// pantry stock with nothing on hand, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: StorageLocation,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub expires_soon: bool,
}

/// The inventory mapping, keyed by lower-cased ingredient name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(HashMap<String, InventoryRecord>);

impl Inventory {
    pub fn insert(&mut self, name: &str, record: InventoryRecord) {
        self.0.insert(name.trim().to_lowercase(), record);
    }

    /// Total, case-insensitive lookup: misses yield the default record.
    pub fn info(&self, name: &str) -> InventoryRecord {
        self.0
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InventoryRecord)> {
        self.0.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, InventoryRecord)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, InventoryRecord)>>(iter: I) -> Self {
        let mut inventory = Inventory::default();
        for (name, record) in iter {
            inventory.insert(&name, record);
        }
        inventory
    }
}
