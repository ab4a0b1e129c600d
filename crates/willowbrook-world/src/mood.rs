//! Village mood over a rolling window of recent weather.

use serde::{Deserialize, Serialize};
use willowbrook_types::{Sky, VillageMood};

/// The part of a day's weather the mood classifier remembers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The day.
    pub day: u64,
    /// Its sky.
    pub sky: Sky,
    /// Whether it was magical.
    pub is_magical: bool,
}

/// How pleasant a sky feels to villagers, 0.0 to 1.0.
pub const fn sky_comfort(sky: Sky) -> f64 {
    match sky {
        Sky::Clear => 1.0,
        Sky::PartlyCloudy => 0.8,
        Sky::Snow => 0.7,
        Sky::Drizzle => 0.5,
        Sky::Rain | Sky::Fog => 0.4,
        Sky::Overcast => 0.3,
        Sky::Hail => 0.2,
        Sky::Thunderstorm => 0.1,
        Sky::Blizzard => 0.0,
    }
}

/// Magical days within the window needed for an enchanted village.
const ENCHANTED_MAGIC_DAYS: usize = 2;

/// Classify the village mood from the most recent days (oldest first).
///
/// Two or more magical days enchant the village; otherwise the mean sky
/// comfort picks a band. An empty window is content.
#[allow(clippy::cast_precision_loss)] // Window lengths are tiny.
pub fn classify_village_mood(window: &[DayRecord]) -> VillageMood {
    if window.is_empty() {
        return VillageMood::Content;
    }
    let magic_days = window.iter().filter(|record| record.is_magical).count();
    if magic_days >= ENCHANTED_MAGIC_DAYS {
        return VillageMood::Enchanted;
    }
    let total: f64 = window.iter().map(|record| sky_comfort(record.sky)).sum();
    let average = total / window.len() as f64;
    if average >= 0.75 {
        VillageMood::Joyful
    } else if average >= 0.55 {
        VillageMood::Content
    } else if average >= 0.35 {
        VillageMood::Cozy
    } else if average >= 0.20 {
        VillageMood::Melancholy
    } else {
        VillageMood::Restless
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(skies: &[Sky]) -> Vec<DayRecord> {
        skies
            .iter()
            .zip(1_u64..)
            .map(|(sky, day)| DayRecord {
                day,
                sky: *sky,
                is_magical: false,
            })
            .collect()
    }

    #[test]
    fn sunny_week_is_joyful() {
        assert_eq!(classify_village_mood(&days(&[Sky::Clear; 5])), VillageMood::Joyful);
    }

    #[test]
    fn steady_rain_is_cozy() {
        assert_eq!(classify_village_mood(&days(&[Sky::Rain; 5])), VillageMood::Cozy);
    }

    #[test]
    fn overcast_spell_is_melancholy() {
        assert_eq!(classify_village_mood(&days(&[Sky::Overcast; 4])), VillageMood::Melancholy);
    }

    #[test]
    fn storms_make_everyone_restless() {
        let window = days(&[Sky::Thunderstorm, Sky::Blizzard, Sky::Hail]);
        assert_eq!(classify_village_mood(&window), VillageMood::Restless);
    }

    #[test]
    fn two_magical_days_enchant_even_in_rain() {
        let mut window = days(&[Sky::Rain; 5]);
        for record in window.iter_mut().take(2) {
            record.is_magical = true;
        }
        assert_eq!(classify_village_mood(&window), VillageMood::Enchanted);
    }

    #[test]
    fn empty_history_is_content() {
        assert_eq!(classify_village_mood(&[]), VillageMood::Content);
    }
}
