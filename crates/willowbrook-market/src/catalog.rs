//! The goods sold at the village market.
//!
//! Baked goods go stale after a few days; potions keep forever. Each item
//! has a seasonal demand multiplier that the daily drift pulls prices
//! toward.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use willowbrook_types::Season;

// ---------------------------------------------------------------------------
// ItemCategory
// ---------------------------------------------------------------------------

/// Broad kind of market good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Bread, cakes, and pastries. Perishable.
    BakedGood,
    /// Bottled brews. Never spoil.
    Potion,
}

impl ItemCategory {
    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BakedGood => "baked good",
            Self::Potion => "potion",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// Blueprint for a market good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    /// Stable key (`"honey_cake"`).
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Baked good or potion.
    pub category: ItemCategory,
    /// Base price in cents.
    pub base_price_cents: i64,
    /// Days before spoiling, or `None` for goods that keep.
    pub shelf_life: Option<u32>,
    /// Demand multiplier per season in percent, in calendar order.
    pub seasonal_percent: [i64; 4],
}

impl CatalogItem {
    /// Base price.
    pub fn base_price(&self) -> Decimal {
        Decimal::new(self.base_price_cents, 2)
    }

    /// Demand multiplier in `season`.
    pub fn seasonal_multiplier(&self, season: Season) -> Decimal {
        let [spring, summer, autumn, winter] = self.seasonal_percent;
        let percent = match season {
            Season::Spring => spring,
            Season::Summer => summer,
            Season::Autumn => autumn,
            Season::Winter => winter,
        };
        Decimal::new(percent, 2)
    }

    /// Base price scaled by the season's demand, rounded to cents.
    pub fn price_in_season(&self, season: Season) -> Decimal {
        self.base_price()
            .saturating_mul(self.seasonal_multiplier(season))
            .round_dp(2)
    }

    /// Whether units of this age are past their shelf life.
    pub fn is_spoiled_at(&self, age_days: u32) -> bool {
        self.shelf_life.is_some_and(|life| age_days >= life)
    }
}

/// Builds a baked good.
const fn baked(
    key: &'static str,
    name: &'static str,
    base_price_cents: i64,
    shelf_life: u32,
    seasonal_percent: [i64; 4],
) -> CatalogItem {
    CatalogItem {
        key,
        name,
        category: ItemCategory::BakedGood,
        base_price_cents,
        shelf_life: Some(shelf_life),
        seasonal_percent,
    }
}

/// Builds a potion.
const fn potion(
    key: &'static str,
    name: &'static str,
    base_price_cents: i64,
    seasonal_percent: [i64; 4],
) -> CatalogItem {
    CatalogItem {
        key,
        name,
        category: ItemCategory::Potion,
        base_price_cents,
        shelf_life: None,
        seasonal_percent,
    }
}

/// Every good the market trades, in board order.
pub const CATALOG: [CatalogItem; 10] = [
    baked("sourdough_loaf", "Sourdough Loaf", 350, 5, [100, 100, 130, 150]),
    baked("honey_cake", "Honey Cake", 500, 4, [140, 120, 100, 100]),
    baked("cinnamon_roll", "Cinnamon Roll", 275, 4, [100, 100, 100, 160]),
    baked("lavender_scone", "Lavender Scone", 450, 3, [150, 130, 100, 100]),
    baked("berry_tart", "Berry Tart", 550, 3, [100, 170, 100, 100]),
    potion("healing_potion", "Healing Potion", 1200, [90, 100, 100, 100]),
    potion("energy_elixir", "Energy Elixir", 1000, [100, 130, 120, 100]),
    potion("sleep_draught", "Sleep Draught", 950, [100, 100, 100, 140]),
    potion("frost_tonic", "Frost Tonic", 1350, [100, 100, 130, 180]),
    potion("sunshine_brew", "Sunshine Brew", 1100, [150, 160, 100, 100]),
];

/// Look up a catalogue item by key.
pub fn find_item(key: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.key == key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn catalogue_splits_evenly() {
        let potions = CATALOG
            .iter()
            .filter(|item| item.category == ItemCategory::Potion)
            .count();
        assert_eq!(potions, 5);
        assert!(
            CATALOG
                .iter()
                .all(|item| (item.category == ItemCategory::Potion) == item.shelf_life.is_none())
        );
    }

    #[test]
    fn seasonal_prices() {
        let tonic = find_item("frost_tonic").unwrap();
        assert_eq!(tonic.price_in_season(Season::Winter), dec!(24.30));
        assert_eq!(tonic.price_in_season(Season::Spring), dec!(13.50));

        let tart = find_item("berry_tart").unwrap();
        assert_eq!(tart.price_in_season(Season::Summer), dec!(9.35));
    }

    #[test]
    fn spoilage_by_age() {
        let scone = find_item("lavender_scone").unwrap();
        assert!(!scone.is_spoiled_at(2));
        assert!(scone.is_spoiled_at(3));

        let brew = find_item("sunshine_brew").unwrap();
        assert!(!brew.is_spoiled_at(10_000));
    }

    #[test]
    fn unknown_key() {
        assert!(find_item("rock_cake").is_none());
    }
}
