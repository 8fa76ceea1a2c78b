use mealpalette_catalog::Catalog;
use mealpalette_mealplan::Usage;
use std::collections::BTreeMap;

/// Servings to buy per ingredient: weekly demand minus what is on hand.
///
/// Only shortfalls appear; an ingredient with enough stock is omitted rather
/// than listed at zero. Sorted by name for stable display.
pub fn grocery_list(catalog: &Catalog, usage: &Usage) -> BTreeMap<String, u32> {
    let mut list = BTreeMap::new();
    for (ingredient, demand) in usage.iter() {
        let on_hand = catalog.info_of(ingredient).quantity;
        let to_buy = demand.saturating_sub(on_hand);
        if to_buy > 0 {
            list.insert(ingredient.to_string(), to_buy);
        }
    }
    list
}
