//! The crop catalogue and companion planting pairs.

use rust_decimal::Decimal;
use serde::Serialize;
use willowbrook_types::Season;
use willowbrook_types::Season::{Autumn, Spring, Summer, Winter};

// ---------------------------------------------------------------------------
// CropType
// ---------------------------------------------------------------------------

/// Blueprint for a plantable crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropType {
    /// Display name, also the catalogue key.
    pub name: &'static str,
    /// Seasons in which the crop can be planted and survive.
    pub seasons: &'static [Season],
    /// Days from seed to harvestable under neutral weather.
    pub days_to_grow: u32,
    /// Base market price in cents.
    pub base_price_cents: i64,
    /// Days between re-harvests, or `None` for single-harvest crops.
    pub regrow_days: Option<u32>,
    /// Magical crops are harder to bring to top quality.
    pub is_magical: bool,
    /// Flavour text shown when planting.
    pub description: &'static str,
}

impl CropType {
    /// Whether the crop can grow in `season`.
    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }

    /// Whether the crop can survive frost without damage.
    pub fn is_hardy(&self) -> bool {
        self.grows_in(Season::Winter)
    }

    /// Base market price.
    pub fn base_price(&self) -> Decimal {
        Decimal::new(self.base_price_cents, 2)
    }

    /// Whether the crop produces more than one harvest.
    pub const fn regrows(&self) -> bool {
        self.regrow_days.is_some()
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// Builds a catalogue entry.
const fn crop(
    name: &'static str,
    seasons: &'static [Season],
    days_to_grow: u32,
    base_price_cents: i64,
    regrow_days: Option<u32>,
    description: &'static str,
) -> CropType {
    CropType {
        name,
        seasons,
        days_to_grow,
        base_price_cents,
        regrow_days,
        is_magical: false,
        description,
    }
}

/// Builds a magical catalogue entry.
const fn magical(
    name: &'static str,
    seasons: &'static [Season],
    days_to_grow: u32,
    base_price_cents: i64,
    description: &'static str,
) -> CropType {
    CropType {
        name,
        seasons,
        days_to_grow,
        base_price_cents,
        regrow_days: None,
        is_magical: true,
        description,
    }
}

/// Every crop that can be planted in the village.
pub const CROPS: [CropType; 22] = [
    crop("Strawberry", &[Spring], 8, 400, Some(3), "Red berries that fatten in the spring showers."),
    crop("Tulip", &[Spring], 6, 300, None, "Cup-shaped petals in every colour of the morning."),
    crop("Pea", &[Spring], 5, 250, Some(2), "Climbing vines heavy with sweet green pods."),
    crop("Basil", &[Spring, Summer], 4, 200, None, "A windowsill herb that perfumes the whole kitchen."),
    crop("Chamomile", &[Spring], 7, 350, None, "Little white daisies for bedtime tea."),
    crop("Tomato", &[Summer], 9, 450, Some(3), "Sun-warmed fruit that splits if you wait too long."),
    crop("Sunflower", &[Summer], 10, 500, None, "Taller than the fence and always facing the light."),
    crop("Blueberry", &[Summer], 8, 550, Some(3), "Dusky bushes that stain every basket purple."),
    crop("Lavender", &[Summer], 7, 400, None, "Purple spikes the bees cannot resist."),
    crop("Watermelon", &[Summer], 12, 800, None, "One enormous striped melon for the picnic."),
    crop("Pumpkin", &[Autumn], 10, 600, None, "A fat orange gourd for lanterns and pies."),
    crop("Apple", &[Autumn], 11, 500, Some(4), "A young tree that rewards patience with crisp fruit."),
    crop("Mushroom", &[Autumn, Spring], 5, 300, None, "Shy caps that appear overnight in damp shade."),
    crop("Sage", &[Autumn], 6, 350, None, "Soft grey-green leaves with a woody scent."),
    crop("Cranberry", &[Autumn], 9, 550, None, "Tart red berries that like wet feet."),
    crop("Winter Rose", &[Winter], 12, 700, None, "Pale blue blooms that open in the snow."),
    crop("Frost Mint", &[Winter], 6, 400, None, "Leaves so cold they tingle."),
    crop("Holly Berry", &[Winter], 8, 450, None, "Glossy leaves and bright red berries for the door."),
    crop("Snow Pea", &[Winter, Spring], 5, 300, None, "Flat crunchy pods that shrug off a chill."),
    magical("Moonbloom", &[Winter], 14, 1500, "A flower that glows faintly after dark."),
    magical("Starfruit", &[Summer], 14, 1500, "Five-pointed fruit that tastes of honey and night air."),
    magical(
        "Crystal Berry",
        &[Spring, Summer, Autumn, Winter],
        16,
        2000,
        "Clear berries that ring like bells when ripe.",
    ),
];

/// Crops that grow faster when planted orthogonally next to each other.
pub const COMPANION_PAIRS: [(&str, &str); 8] = [
    ("Strawberry", "Basil"),
    ("Tomato", "Basil"),
    ("Pea", "Chamomile"),
    ("Pumpkin", "Sunflower"),
    ("Blueberry", "Lavender"),
    ("Mushroom", "Sage"),
    ("Winter Rose", "Frost Mint"),
    ("Moonbloom", "Crystal Berry"),
];

/// Look up a crop by name, ignoring ASCII case.
pub fn find_crop(name: &str) -> Option<&'static CropType> {
    CROPS
        .iter()
        .find(|crop| crop.name.eq_ignore_ascii_case(name.trim()))
}

/// Crops that can be planted in `season`, in catalogue order.
pub fn seasonal_crops(season: Season) -> impl Iterator<Item = &'static CropType> {
    CROPS.iter().filter(move |crop| crop.grows_in(season))
}

/// Whether two crops are companions.
pub fn are_companions(a: &str, b: &str) -> bool {
    COMPANION_PAIRS
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let crop = find_crop("winter rose").unwrap();
        assert_eq!(crop.name, "Winter Rose");
        assert!(find_crop("Mandrake").is_none());
    }

    #[test]
    fn prices_are_in_cents() {
        assert_eq!(find_crop("Pea").unwrap().base_price(), dec!(2.50));
        assert_eq!(find_crop("Crystal Berry").unwrap().base_price(), dec!(20.00));
    }

    #[test]
    fn every_season_has_crops() {
        for season in Season::ALL {
            assert!(seasonal_crops(season).count() >= 4, "{season} is bare");
        }
    }

    #[test]
    fn companions_are_symmetric() {
        assert!(are_companions("Basil", "Tomato"));
        assert!(are_companions("Tomato", "Basil"));
        assert!(!are_companions("Tomato", "Pumpkin"));
    }

    #[test]
    fn companion_names_exist() {
        for (a, b) in COMPANION_PAIRS {
            assert!(find_crop(a).is_some(), "{a}");
            assert!(find_crop(b).is_some(), "{b}");
        }
    }

    #[test]
    fn regrowth_is_shorter_than_first_growth() {
        for crop in CROPS {
            if let Some(days) = crop.regrow_days {
                assert!(days < crop.days_to_grow, "{}", crop.name);
            }
        }
    }
}
