//! Seasonal festival eligibility.
//!
//! Each festival is a fixed rule over the day's season, sky, temperature,
//! and magical event. Every rule that matches is active, so several
//! festivals may share a day.

use willowbrook_types::{Festival, MagicalEvent, Season, Sky};

/// The conditions under which a festival is held.
#[derive(Debug, Clone, Copy)]
pub struct FestivalRule {
    /// The festival.
    pub festival: Festival,
    /// Season it belongs to.
    pub season: Season,
    /// Allowed skies; empty means any sky.
    pub skies: &'static [Sky],
    /// Minimum temperature in °C, if any.
    pub min_temp_c: Option<f64>,
    /// Maximum temperature in °C, if any.
    pub max_temp_c: Option<f64>,
    /// Magical event that must be active, if any.
    pub magic: Option<MagicalEvent>,
}

impl FestivalRule {
    /// Whether the rule holds for a day.
    pub fn is_met(&self, season: Season, sky: Sky, temperature_c: f64, magic: Option<MagicalEvent>) -> bool {
        if season != self.season {
            return false;
        }
        if !self.skies.is_empty() && !self.skies.contains(&sky) {
            return false;
        }
        if self.min_temp_c.is_some_and(|min| temperature_c < min) {
            return false;
        }
        if self.max_temp_c.is_some_and(|max| temperature_c > max) {
            return false;
        }
        match self.magic {
            Some(required) => magic == Some(required),
            None => true,
        }
    }
}

/// The village festival calendar.
pub const FESTIVAL_RULES: [FestivalRule; 8] = [
    FestivalRule {
        festival: Festival::BlossomDance,
        season: Season::Spring,
        skies: &[Sky::Clear, Sky::PartlyCloudy],
        min_temp_c: Some(10.0),
        max_temp_c: None,
        magic: None,
    },
    FestivalRule {
        festival: Festival::PetalReverie,
        season: Season::Spring,
        skies: &[],
        min_temp_c: None,
        max_temp_c: None,
        magic: Some(MagicalEvent::PetalBlizzard),
    },
    FestivalRule {
        festival: Festival::FireflyGala,
        season: Season::Summer,
        skies: &[Sky::Clear],
        min_temp_c: Some(20.0),
        max_temp_c: None,
        magic: Some(MagicalEvent::FireflyStorm),
    },
    FestivalRule {
        festival: Festival::MidsummerFeast,
        season: Season::Summer,
        skies: &[Sky::Clear, Sky::PartlyCloudy],
        min_temp_c: Some(22.0),
        max_temp_c: None,
        magic: None,
    },
    FestivalRule {
        festival: Festival::HarvestMoonVigil,
        season: Season::Autumn,
        skies: &[Sky::Clear, Sky::Fog],
        min_temp_c: None,
        max_temp_c: None,
        magic: Some(MagicalEvent::MoonbowNight),
    },
    FestivalRule {
        festival: Festival::LanternWalk,
        season: Season::Autumn,
        skies: &[Sky::Overcast, Sky::Fog],
        min_temp_c: None,
        max_temp_c: None,
        magic: None,
    },
    FestivalRule {
        festival: Festival::FrostFair,
        season: Season::Winter,
        skies: &[Sky::Snow, Sky::Clear],
        min_temp_c: None,
        max_temp_c: Some(0.0),
        magic: None,
    },
    FestivalRule {
        festival: Festival::AuroraCelebration,
        season: Season::Winter,
        skies: &[],
        min_temp_c: None,
        max_temp_c: None,
        magic: Some(MagicalEvent::AuroraShower),
    },
];

/// All festivals whose rules hold for the given day, in calendar order.
pub fn eligible_festivals(
    season: Season,
    sky: Sky,
    temperature_c: f64,
    magic: Option<MagicalEvent>,
) -> Vec<Festival> {
    FESTIVAL_RULES
        .iter()
        .filter(|rule| rule.is_met(season, sky, temperature_c, magic))
        .map(|rule| rule.festival)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_clear_spring_day_holds_blossom_dance() {
        let festivals = eligible_festivals(Season::Spring, Sky::Clear, 15.0, None);
        assert_eq!(festivals, vec![Festival::BlossomDance]);
    }

    #[test]
    fn cold_spring_day_has_no_dance() {
        assert!(eligible_festivals(Season::Spring, Sky::Clear, 8.0, None).is_empty());
    }

    #[test]
    fn festivals_can_co_occur() {
        let festivals = eligible_festivals(
            Season::Spring,
            Sky::PartlyCloudy,
            12.0,
            Some(MagicalEvent::PetalBlizzard),
        );
        assert_eq!(festivals, vec![Festival::BlossomDance, Festival::PetalReverie]);
    }

    #[test]
    fn frost_fair_needs_freezing_weather() {
        assert_eq!(
            eligible_festivals(Season::Winter, Sky::Snow, -3.0, None),
            vec![Festival::FrostFair]
        );
        assert!(eligible_festivals(Season::Winter, Sky::Snow, 1.5, None).is_empty());
    }

    #[test]
    fn lantern_walk_in_autumn_fog() {
        let festivals = eligible_festivals(Season::Autumn, Sky::Fog, 9.0, Some(MagicalEvent::MoonbowNight));
        assert_eq!(festivals, vec![Festival::HarvestMoonVigil, Festival::LanternWalk]);
    }
}
