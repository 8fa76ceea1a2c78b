pub mod colors;

pub use colors::{ColorCounts, ColorSet, ProduceColor};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Inventory category for an ingredient.
///
/// The six produce-color categories drive the weekly variety tracker; the
/// remaining categories only matter for protein/carb lookups and stock views.
/// Unknown or missing categories fall back to `Pantry`.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Red,
    OrangeYellow,
    Green,
    LeafyGreen,
    BluePurple,
    WhiteBrown,
    Protein,
    Carb,
    Dairy,
    #[default]
    Pantry,
}

impl Category {
    /// Parse a spreadsheet value, falling back to the default on anything
    /// unrecognized. Spreadsheet data is expected to be incomplete.
    pub fn parse_lossy(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// The produce color this category counts toward, if any.
    pub fn produce_color(self) -> Option<ProduceColor> {
        match self {
            Category::Red => Some(ProduceColor::Red),
            Category::OrangeYellow => Some(ProduceColor::OrangeYellow),
            Category::Green => Some(ProduceColor::Green),
            Category::LeafyGreen => Some(ProduceColor::LeafyGreen),
            Category::BluePurple => Some(ProduceColor::BluePurple),
            Category::WhiteBrown => Some(ProduceColor::WhiteBrown),
            _ => None,
        }
    }
}

/// Where an inventory item is kept. `Skip` hides a row from every stock view
/// without deleting it from the sheet.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    #[default]
    Pantry,
    Counter,
    #[strum(serialize = "SKIP")]
    #[serde(rename = "SKIP")]
    Skip,
}

impl StorageLocation {
    pub fn parse_lossy(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// The four real locations, in display order. `Skip` is not one of them.
    pub const SHELVES: [StorageLocation; 4] = [
        StorageLocation::Fridge,
        StorageLocation::Freezer,
        StorageLocation::Pantry,
        StorageLocation::Counter,
    ];
}

/// One of the three meal occasions within a day, in traversal order.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Slots after this one within the same day, in order.
    pub fn rest_of_day(self) -> &'static [MealSlot] {
        match self {
            MealSlot::Breakfast => &[MealSlot::Lunch, MealSlot::Dinner],
            MealSlot::Lunch => &[MealSlot::Dinner],
            MealSlot::Dinner => &[],
        }
    }
}

/// Number of days in a plan. A plan with any other length is invalid as a
/// whole and gets replaced by an empty one.
pub const NUM_DAYS: usize = 7;
