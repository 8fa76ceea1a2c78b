use mealpalette_catalog::Catalog;
use mealpalette_mealplan::Usage;
use mealpalette_shared::{Category, StorageLocation};
use serde::Serialize;
use std::collections::BTreeMap;

/// One on-hand inventory line enriched with what the plan consumes of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockItem {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub expires_soon: bool,
    /// Servings the current plan consumes.
    pub needed: u32,
    /// Demand meets or exceeds stock; nothing left at risk of going unused.
    pub fully_used: bool,
}

/// On-hand stock grouped by the four real locations.
///
/// Zero-quantity rows and `SKIP` rows are hidden. Each location lists
/// expiring items first, then names case-insensitively.
pub fn inventory_by_location(
    catalog: &Catalog,
    usage: &Usage,
) -> BTreeMap<StorageLocation, Vec<StockItem>> {
    let mut by_location: BTreeMap<StorageLocation, Vec<StockItem>> = StorageLocation::SHELVES
        .into_iter()
        .map(|location| (location, Vec::new()))
        .collect();

    for (name, record) in catalog.inventory().iter() {
        if record.quantity == 0 || record.location == StorageLocation::Skip {
            continue;
        }
        if let Some(items) = by_location.get_mut(&record.location) {
            items.push(stock_item(name, record, usage));
        }
    }

    for items in by_location.values_mut() {
        sort_for_display(items);
    }
    by_location
}

/// Every on-hand item flagged expires-soon, with the same exclusions and
/// ordering as the location view.
pub fn expiring_items(catalog: &Catalog, usage: &Usage) -> Vec<StockItem> {
    let mut items: Vec<StockItem> = catalog
        .inventory()
        .iter()
        .filter(|(_, record)| {
            record.expires_soon
                && record.quantity > 0
                && record.location != StorageLocation::Skip
        })
        .map(|(name, record)| stock_item(name, record, usage))
        .collect();
    sort_for_display(&mut items);
    items
}

fn stock_item(
    name: &str,
    record: &mealpalette_catalog::InventoryRecord,
    usage: &Usage,
) -> StockItem {
    StockItem {
        name: name.to_string(),
        category: record.category,
        quantity: record.quantity,
        expires_soon: record.expires_soon,
        needed: usage.demand(name),
        fully_used: usage.fully_used(name, record.quantity),
    }
}

fn sort_for_display(items: &mut [StockItem]) {
    items.sort_by(|a, b| {
        b.expires_soon
            .cmp(&a.expires_soon)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
