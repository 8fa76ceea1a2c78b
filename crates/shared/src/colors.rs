use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// One of the six fixed produce-color buckets used to track dietary variety.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
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
pub enum ProduceColor {
    Red,
    OrangeYellow,
    Green,
    LeafyGreen,
    BluePurple,
    WhiteBrown,
}

impl ProduceColor {
    pub const COUNT: usize = 6;

    pub const ALL: [ProduceColor; ProduceColor::COUNT] = [
        ProduceColor::Red,
        ProduceColor::OrangeYellow,
        ProduceColor::Green,
        ProduceColor::LeafyGreen,
        ProduceColor::BluePurple,
        ProduceColor::WhiteBrown,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Human label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            ProduceColor::Red => "Red",
            ProduceColor::OrangeYellow => "Orange/Yellow",
            ProduceColor::Green => "Green",
            ProduceColor::LeafyGreen => "Leafy Green",
            ProduceColor::BluePurple => "Blue/Purple",
            ProduceColor::WhiteBrown => "White/Brown",
        }
    }
}

/// Which of the six colors a single meal exhibits.
///
/// Always covers exactly the six colors; a meal can exhibit several at once,
/// while each ingredient contributes to at most its own category's color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorSet([bool; ProduceColor::COUNT]);

impl ColorSet {
    pub fn insert(&mut self, color: ProduceColor) {
        self.0[color.index()] = true;
    }

    pub fn contains(&self, color: ProduceColor) -> bool {
        self.0[color.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&present| present)
    }

    /// Colors present in this set, in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = ProduceColor> + '_ {
        ProduceColor::ALL
            .into_iter()
            .filter(move |color| self.contains(*color))
    }

    /// How many of `wanted` this set covers. Drives relevance ranking.
    pub fn matches(&self, wanted: impl IntoIterator<Item = ProduceColor>) -> usize {
        wanted
            .into_iter()
            .filter(|color| self.contains(*color))
            .count()
    }
}

impl FromIterator<ProduceColor> for ColorSet {
    fn from_iter<I: IntoIterator<Item = ProduceColor>>(iter: I) -> Self {
        let mut set = ColorSet::default();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

/// Per-color counts, always over exactly the six colors.
///
/// Day counts stay in 0..=3 (at most one per meal of the day), week counts in
/// 0..=21.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorCounts([u32; ProduceColor::COUNT]);

impl ColorCounts {
    pub fn get(&self, color: ProduceColor) -> u32 {
        self.0[color.index()]
    }

    /// Count one occurrence of every color in `set`.
    pub fn record(&mut self, set: &ColorSet) {
        for color in set.iter() {
            self.0[color.index()] += 1;
        }
    }

    /// Element-wise accumulation, used to roll days up into a week.
    pub fn merge(&mut self, other: &ColorCounts) {
        for color in ProduceColor::ALL {
            self.0[color.index()] += other.0[color.index()];
        }
    }

    /// Colors with a zero count, in fixed order.
    pub fn missing(&self) -> Vec<ProduceColor> {
        ProduceColor::ALL
            .into_iter()
            .filter(|color| self.get(*color) == 0)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProduceColor, u32)> + '_ {
        ProduceColor::ALL
            .into_iter()
            .map(move |color| (color, self.get(color)))
    }
}
