//! Daily weather generation for the village.
//!
//! # Weather Generation
//!
//! The sky follows a Markov chain: tomorrow's sky is drawn from a base
//! transition table keyed by today's sky, with each candidate's weight
//! scaled by a seasonal modifier (summer forbids snow, winter favours it).
//! Temperature follows a cosine curve over the year, warmest at midsummer,
//! plus Gaussian jitter. Humidity and wind depend on the sky.
//!
//! A small per-day chance, higher in the middle third of each season,
//! overlays a magical event drawn from a seasonal catalogue. Festivals and
//! the village mood are derived after the physical weather is fixed.
//!
//! # Determinism
//!
//! The engine owns no randomness. Every draw comes from the generator
//! passed to [`WeatherEngine::advance`], always in the same order, so a
//! seeded generator reproduces the same weather. [`WeatherEngine::forecast`]
//! works on clones of the engine and the generator and leaves both
//! untouched.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use willowbrook_types::{
    Calendar, MagicalEvent, Season, Sky, WeatherState, WeatherStreak, WindDirection,
};

use crate::error::WorldError;
use crate::festival::eligible_festivals;
use crate::mood::{DayRecord, classify_village_mood};
use crate::sampling::{WeightedTable, gaussian, round_to};

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Tunable constants for the weather model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherTuning {
    /// Calendar used to derive seasons and the mid-season window.
    pub calendar: Calendar,
    /// Chance of a magical event on any day.
    pub magical_base_chance: f64,
    /// Extra chance during the middle third of a season.
    pub mid_season_bonus: f64,
    /// Days remembered for the village mood.
    pub mood_window: usize,
}

impl Default for WeatherTuning {
    fn default() -> Self {
        Self {
            calendar: Calendar::default(),
            magical_base_chance: 0.08,
            mid_season_bonus: 0.07,
            mood_window: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Base Markov weights: which sky tends to follow which.
fn base_transitions(current: Sky) -> &'static [(Sky, f64)] {
    match current {
        Sky::Clear => &[(Sky::Clear, 5.0), (Sky::PartlyCloudy, 3.0), (Sky::Fog, 1.0)],
        Sky::PartlyCloudy => &[
            (Sky::Clear, 3.0),
            (Sky::PartlyCloudy, 3.0),
            (Sky::Overcast, 2.0),
            (Sky::Drizzle, 1.0),
        ],
        Sky::Overcast => &[
            (Sky::PartlyCloudy, 2.0),
            (Sky::Overcast, 3.0),
            (Sky::Drizzle, 2.0),
            (Sky::Rain, 1.0),
            (Sky::Fog, 1.0),
            (Sky::Snow, 0.5),
        ],
        Sky::Drizzle => &[
            (Sky::Overcast, 2.0),
            (Sky::Drizzle, 3.0),
            (Sky::Rain, 2.0),
            (Sky::Clear, 1.0),
        ],
        Sky::Rain => &[
            (Sky::Drizzle, 2.0),
            (Sky::Rain, 3.0),
            (Sky::Thunderstorm, 1.0),
            (Sky::Overcast, 2.0),
            (Sky::Hail, 0.5),
        ],
        Sky::Thunderstorm => &[
            (Sky::Rain, 3.0),
            (Sky::Overcast, 2.0),
            (Sky::Drizzle, 1.0),
            (Sky::Hail, 1.0),
        ],
        Sky::Snow => &[
            (Sky::Snow, 4.0),
            (Sky::Blizzard, 1.0),
            (Sky::Overcast, 2.0),
            (Sky::Clear, 1.0),
        ],
        Sky::Blizzard => &[(Sky::Snow, 3.0), (Sky::Blizzard, 2.0), (Sky::Overcast, 2.0)],
        Sky::Fog => &[
            (Sky::Fog, 2.0),
            (Sky::Clear, 3.0),
            (Sky::PartlyCloudy, 2.0),
            (Sky::Drizzle, 1.0),
        ],
        Sky::Hail => &[(Sky::Rain, 3.0), (Sky::Overcast, 2.0), (Sky::Drizzle, 1.0)],
    }
}

/// Seasonal scaling of a candidate sky's transition weight.
const fn season_modifier(season: Season, sky: Sky) -> f64 {
    match (season, sky) {
        (Season::Spring, Sky::Drizzle) => 1.8,
        (Season::Spring, Sky::Rain) => 1.4,
        (Season::Spring, Sky::Fog) => 1.3,
        (Season::Summer, Sky::Clear) => 1.6,
        (Season::Summer, Sky::Thunderstorm) => 1.5,
        (Season::Summer, Sky::Snow | Sky::Blizzard) => 0.0,
        (Season::Autumn, Sky::Overcast) => 1.5,
        (Season::Autumn, Sky::Fog) => 2.0,
        (Season::Autumn, Sky::Rain) => 1.3,
        (Season::Winter, Sky::Snow) => 2.5,
        (Season::Winter, Sky::Blizzard) => 1.8,
        (Season::Winter, Sky::Clear) => 0.7,
        (Season::Winter, Sky::Rain) => 0.3,
        _ => 1.0,
    }
}

/// Typical relative humidity under a sky.
const fn base_humidity(sky: Sky) -> f64 {
    match sky {
        Sky::Clear => 0.30,
        Sky::PartlyCloudy => 0.45,
        Sky::Overcast => 0.65,
        Sky::Drizzle => 0.75,
        Sky::Rain => 0.85,
        Sky::Thunderstorm => 0.90,
        Sky::Snow => 0.70,
        Sky::Blizzard => 0.75,
        Sky::Fog => 0.95,
        Sky::Hail => 0.80,
    }
}

/// Typical wind speed (km/h) under a sky.
const fn base_wind(sky: Sky) -> f64 {
    match sky {
        Sky::Clear => 5.0,
        Sky::PartlyCloudy => 8.0,
        Sky::Overcast => 10.0,
        Sky::Drizzle => 7.0,
        Sky::Rain => 15.0,
        Sky::Thunderstorm => 35.0,
        Sky::Snow => 12.0,
        Sky::Blizzard => 50.0,
        Sky::Fog => 2.0,
        Sky::Hail => 25.0,
    }
}

/// Harshness of a sky before wind is considered.
const fn base_severity(sky: Sky) -> f64 {
    match sky {
        Sky::Clear => 0.0,
        Sky::PartlyCloudy => 0.05,
        Sky::Overcast => 0.1,
        Sky::Drizzle => 0.15,
        Sky::Fog => 0.2,
        Sky::Snow => 0.3,
        Sky::Rain => 0.35,
        Sky::Hail => 0.6,
        Sky::Thunderstorm => 0.7,
        Sky::Blizzard => 0.9,
    }
}

/// Relative wind direction weights, clockwise from north.
const fn wind_bias(season: Season) -> [f64; 8] {
    match season {
        Season::Spring => [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
        Season::Summer => [1.0, 1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0],
        Season::Autumn => [2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0],
        Season::Winter => [3.0, 3.0, 2.0, 1.0, 1.0, 1.0, 2.0, 2.0],
    }
}

/// Magical events that can appear in a season, with relative weights.
const fn magic_pool(season: Season) -> &'static [(MagicalEvent, f64)] {
    match season {
        Season::Spring => &[
            (MagicalEvent::PetalBlizzard, 0.35),
            (MagicalEvent::RainbowRain, 0.30),
            (MagicalEvent::WhisperingMist, 0.20),
            (MagicalEvent::SundogHalo, 0.15),
        ],
        Season::Summer => &[
            (MagicalEvent::EternalGoldenHour, 0.30),
            (MagicalEvent::FireflyStorm, 0.35),
            (MagicalEvent::SundogHalo, 0.20),
            (MagicalEvent::Starfall, 0.15),
        ],
        Season::Autumn => &[
            (MagicalEvent::WhisperingMist, 0.30),
            (MagicalEvent::MoonbowNight, 0.25),
            (MagicalEvent::AuroraShower, 0.25),
            (MagicalEvent::CrystalFrost, 0.20),
        ],
        Season::Winter => &[
            (MagicalEvent::AuroraShower, 0.30),
            (MagicalEvent::CrystalFrost, 0.30),
            (MagicalEvent::Starfall, 0.25),
            (MagicalEvent::MoonbowNight, 0.15),
        ],
    }
}

/// Cozy narration for each sky.
const fn sky_lines(sky: Sky) -> &'static [&'static str] {
    match sky {
        Sky::Clear => &[
            "Sunlight pools on the cobblestones like warm honey.",
            "Not a cloud anywhere. Every washing line in the village is full.",
        ],
        Sky::PartlyCloudy => &[
            "Lazy clouds drift over the meadow, dragging their shadows behind.",
            "Sun and cloud take turns over the rooftops.",
        ],
        Sky::Overcast => &[
            "A grey quilt covers the sky. A good day for a book by the fire.",
            "Low clouds hush the village into a thoughtful mood.",
        ],
        Sky::Drizzle => &[
            "A fine drizzle beads on every rose in the garden.",
            "Soft rain taps at the windows. Kettles are on all over town.",
        ],
        Sky::Rain => &[
            "Rain drums on the bakery roof and fills the plaza puddles.",
            "Silver curtains of rain spill off the eaves.",
        ],
        Sky::Thunderstorm => &[
            "Thunder rolls over the hills and every cat is under a bed.",
            "Lightning picks out the old windmill on the ridge.",
        ],
        Sky::Snow => &[
            "Fat snowflakes tumble down and sugar every rooftop.",
            "Snow muffles the lanes into a quiet hush.",
        ],
        Sky::Blizzard => &[
            "Snow flies sideways. Nobody strays far from the hearth.",
            "Drifts pile against doorways while the wind howls.",
        ],
        Sky::Fog => &[
            "Fog curls through the lanes like a sleepy grey cat.",
            "Lanterns glow like fireflies in the thick mist.",
        ],
        Sky::Hail => &[
            "Hailstones bounce off the cobbles with a cheerful clatter.",
            "A burst of hail sends the market stalls scrambling for cover.",
        ],
    }
}

/// Narration for each magical event.
const fn magic_line(event: MagicalEvent) -> &'static str {
    match event {
        MagicalEvent::PetalBlizzard => "Blossom petals whirl through the streets like pink snow.",
        MagicalEvent::RainbowRain => "Every raindrop carries its own tiny rainbow.",
        MagicalEvent::WhisperingMist => "The mist hums old lullabies between the houses.",
        MagicalEvent::SundogHalo => "Two phantom suns flank the real one inside a bright halo.",
        MagicalEvent::EternalGoldenHour => "The sun hangs at the horizon for hours, gilding everything.",
        MagicalEvent::FireflyStorm => "Thousands of fireflies rise from the meadow at dusk.",
        MagicalEvent::Starfall => "Shooting stars streak overhead and children run out to wish.",
        MagicalEvent::MoonbowNight => "A pale rainbow arcs across the moonlit sky.",
        MagicalEvent::AuroraShower => "Green and violet ribbons ripple low over the village.",
        MagicalEvent::CrystalFrost => "Frost blooms into crystal flowers on every window.",
    }
}

// ---------------------------------------------------------------------------
// Derived quantities
// ---------------------------------------------------------------------------

/// Mean temperature for a point in the year: warmest at 0.375 (midsummer).
pub fn base_temperature(year_phase: f64) -> f64 {
    14.0f64.mul_add((core::f64::consts::TAU * (year_phase - 0.375)).cos(), 12.0)
}

/// Apparent temperature after wind chill (cold, windy) or humidity (hot,
/// humid).
pub fn feels_like(temperature_c: f64, wind_kph: f64, humidity: f64) -> f64 {
    if temperature_c <= 10.0 && wind_kph > 4.8 {
        let v = wind_kph.powf(0.16);
        return 0.3965f64.mul_add(
            temperature_c * v,
            11.37f64.mul_add(-v, 0.6215f64.mul_add(temperature_c, 13.12)),
        );
    }
    if temperature_c >= 27.0 && humidity >= 0.40 {
        return 5.0f64.mul_add(humidity - 0.4, temperature_c);
    }
    temperature_c
}

/// Overall harshness of a day, 0.0 to 1.0.
pub fn severity(sky: Sky, wind_kph: f64) -> f64 {
    (base_severity(sky) + (wind_kph / 250.0).min(0.2)).min(1.0)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateful daily weather generator.
///
/// Holds yesterday's sky, the current streak, and a short history used for
/// the village mood. It carries no randomness of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEngine {
    /// Tunable constants.
    tuning: WeatherTuning,
    /// The sky of the most recent generated day. Clear before day 1.
    previous_sky: Sky,
    /// Current run of identical skies.
    streak: Option<WeatherStreak>,
    /// Most recent days, oldest first, at most `mood_window` long.
    history: VecDeque<DayRecord>,
    /// The last day generated, 0 before the first.
    last_day: u64,
}

impl Default for WeatherEngine {
    fn default() -> Self {
        Self::new(WeatherTuning::default())
    }
}

impl WeatherEngine {
    /// Create an engine that has not generated any day yet.
    pub fn new(tuning: WeatherTuning) -> Self {
        Self {
            tuning,
            previous_sky: Sky::Clear,
            streak: None,
            history: VecDeque::with_capacity(tuning.mood_window),
            last_day: 0,
        }
    }

    /// Generate and commit the weather for `day`.
    ///
    /// `season` must agree with the calendar; a mismatch means the caller's
    /// clock has drifted from the weather's and is reported as an invariant
    /// violation.
    pub fn advance(
        &mut self,
        day: u64,
        season: Season,
        rng: &mut impl Rng,
    ) -> Result<WeatherState, WorldError> {
        if day == 0 {
            return Err(WorldError::InvalidDay(day));
        }
        let expected = self.tuning.calendar.season(day);
        if expected != season {
            return Err(WorldError::SeasonMismatch {
                day,
                expected,
                actual: season,
            });
        }

        let sky = next_sky(self.previous_sky, season, rng);
        let phase = self.tuning.calendar.year_phase(day);
        let temperature_c = round_to(base_temperature(phase) + gaussian(rng, 2.5), 1);
        let humidity = round_to((base_humidity(sky) + gaussian(rng, 0.05)).clamp(0.0, 1.0), 2);
        let wind_kph = round_to((base_wind(sky) + gaussian(rng, 3.0)).max(0.0), 1);
        let wind_direction = WeightedTable::new(
            WindDirection::ALL.into_iter().zip(wind_bias(season)),
        )
        .pick(rng)
        .unwrap_or(WindDirection::N);
        let magical_event = self.roll_magic(day, season, rng);
        let description = describe(sky, magical_event, rng);

        let streak = match self.streak {
            Some(streak) if streak.sky == sky => WeatherStreak {
                sky,
                days: streak.days.saturating_add(1),
            },
            _ => WeatherStreak { sky, days: 1 },
        };

        let record = DayRecord {
            day,
            sky,
            is_magical: magical_event.is_some(),
        };
        self.history.push_back(record);
        while self.history.len() > self.tuning.mood_window.max(1) {
            self.history.pop_front();
        }
        let window: Vec<DayRecord> = self.history.iter().copied().collect();
        let village_mood = classify_village_mood(&window);

        self.previous_sky = sky;
        self.streak = Some(streak);
        self.last_day = day;

        let weather = WeatherState {
            day,
            season,
            sky,
            temperature_c,
            feels_like_c: round_to(feels_like(temperature_c, wind_kph, humidity), 1),
            humidity,
            wind_kph,
            wind_direction,
            severity: round_to(severity(sky, wind_kph), 2),
            is_magical: magical_event.is_some(),
            magical_event,
            festivals: eligible_festivals(season, sky, temperature_c, magical_event),
            village_mood,
            streak,
            description,
        };

        debug!(
            day,
            season = %season,
            sky = %sky,
            temperature_c,
            magical = ?magical_event,
            mood = %village_mood,
            "Weather generated"
        );

        Ok(weather)
    }

    /// Project the next `days` days without committing anything.
    ///
    /// The projection runs on clones of this engine and of `rng`, so the
    /// committed history and the caller's generator are left exactly as
    /// they were.
    pub fn forecast<R: Rng + Clone>(
        &self,
        days: usize,
        rng: &R,
    ) -> Result<Vec<WeatherState>, WorldError> {
        let mut engine = self.clone();
        let mut rng = rng.clone();
        let mut projection = Vec::with_capacity(days);
        let mut day = self.last_day;
        for _ in 0..days {
            day = day.saturating_add(1);
            let season = self.tuning.calendar.season(day);
            projection.push(engine.advance(day, season, &mut rng)?);
        }
        Ok(projection)
    }

    /// Roll for a magical event. The mid-season bonus applies when the day
    /// is within a sixth of a season of the season's midpoint.
    fn roll_magic(&self, day: u64, season: Season, rng: &mut impl Rng) -> Option<MagicalEvent> {
        let calendar = self.tuning.calendar;
        let length = f64::from(calendar.days_per_season());
        let within = f64::from(calendar.day_of_season(day).saturating_sub(1));
        let midpoint = (length / 2.0).floor();
        let mut chance = self.tuning.magical_base_chance;
        if (within - midpoint).abs() < length / 6.0 {
            chance += self.tuning.mid_season_bonus;
        }
        if rng.random::<f64>() >= chance {
            return None;
        }
        WeightedTable::new(magic_pool(season).iter().copied()).pick(rng)
    }

    /// Recent days remembered for the village mood, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &DayRecord> {
        self.history.iter()
    }

    /// The current streak, if any day has been generated.
    pub const fn streak(&self) -> Option<WeatherStreak> {
        self.streak
    }

    /// The last generated day (0 before the first).
    pub const fn last_day(&self) -> u64 {
        self.last_day
    }

    /// The tuning in use.
    pub const fn tuning(&self) -> &WeatherTuning {
        &self.tuning
    }
}

/// One Markov step from `current` under `season`.
fn next_sky(current: Sky, season: Season, rng: &mut impl Rng) -> Sky {
    let table = WeightedTable::new(
        base_transitions(current)
            .iter()
            .map(|(sky, weight)| (*sky, weight * season_modifier(season, *sky))),
    );
    table.pick(rng).unwrap_or(Sky::Clear)
}

/// Compose the day's narration. Magical days get the event's line instead.
fn describe(sky: Sky, magic: Option<MagicalEvent>, rng: &mut impl Rng) -> String {
    if let Some(event) = magic {
        return magic_line(event).to_owned();
    }
    let lines = sky_lines(sky);
    let index = rng.random_range(0..lines.len());
    lines.get(index).copied().unwrap_or_default().to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn run(seed: u64, days: u64) -> Vec<WeatherState> {
        let mut engine = WeatherEngine::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let calendar = Calendar::default();
        (1..=days)
            .map(|day| engine.advance(day, calendar.season(day), &mut rng).unwrap())
            .collect()
    }

    #[test]
    fn same_seed_same_weather() {
        assert_eq!(run(42, 60), run(42, 60));
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(run(1, 30), run(2, 30));
    }

    #[test]
    fn no_snow_in_summer() {
        for weather in run(9, 112) {
            if weather.season == Season::Summer {
                assert!(!matches!(weather.sky, Sky::Snow | Sky::Blizzard));
            }
        }
    }

    #[test]
    fn summer_is_warmer_than_winter() {
        let year = run(3, 112);
        let mean = |season: Season| {
            let temps: Vec<f64> = year
                .iter()
                .filter(|w| w.season == season)
                .map(|w| w.temperature_c)
                .collect();
            temps.iter().sum::<f64>() / 28.0
        };
        assert!(mean(Season::Summer) > mean(Season::Winter) + 10.0);
    }

    #[test]
    fn fields_stay_in_range() {
        for weather in run(11, 224) {
            assert!((0.0..=1.0).contains(&weather.humidity));
            assert!((0.0..=1.0).contains(&weather.severity));
            assert!(weather.wind_kph >= 0.0);
            assert_eq!(weather.is_magical, weather.magical_event.is_some());
            assert!(!weather.description.is_empty());
        }
    }

    #[test]
    fn magic_is_rare() {
        let year = run(5, 1120);
        let magical = year.iter().filter(|w| w.is_magical).count();
        assert!(magical > 20, "only {magical} magical days");
        assert!(magical < 250, "{magical} magical days is not rare");
    }

    #[test]
    fn streak_counts_identical_skies() {
        for pair in run(8, 100).windows(2) {
            let (previous, today) = (&pair[0], &pair[1]);
            if previous.sky == today.sky {
                assert_eq!(today.streak.days, previous.streak.days + 1);
            } else {
                assert_eq!(today.streak.days, 1);
            }
        }
    }

    #[test]
    fn season_mismatch_is_rejected() {
        let mut engine = WeatherEngine::default();
        let mut rng = StdRng::seed_from_u64(1);
        let err = engine.advance(1, Season::Winter, &mut rng).unwrap_err();
        assert!(matches!(err, WorldError::SeasonMismatch { .. }));
        assert_eq!(engine.last_day(), 0);
        assert!(engine.advance(0, Season::Spring, &mut rng).is_err());
    }

    #[test]
    fn forecast_does_not_commit() {
        let mut engine = WeatherEngine::default();
        let mut rng = StdRng::seed_from_u64(21);
        engine.advance(1, Season::Spring, &mut rng).unwrap();
        let before = engine.clone();

        let projected = engine.forecast(7, &rng).unwrap();
        assert_eq!(projected.len(), 7);
        assert_eq!(projected.first().unwrap().day, 2);
        assert_eq!(engine, before);

        // The committed future matches the projection made from the same state.
        let actual = engine.advance(2, Season::Spring, &mut rng).unwrap();
        assert_eq!(&actual, projected.first().unwrap());
    }

    #[test]
    fn wind_chill_and_humidity() {
        assert!(feels_like(0.0, 20.0, 0.5) < 0.0);
        assert!((feels_like(30.0, 5.0, 0.8) - 32.0).abs() < 1e-9);
        assert!((feels_like(18.0, 10.0, 0.5) - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn temperature_curve_peaks_midsummer() {
        assert!((base_temperature(0.375) - 26.0).abs() < 1e-9);
        assert!((base_temperature(0.875) - -2.0).abs() < 1e-9);
    }
}
