//! The finalized weather of a single day.

use serde::{Deserialize, Serialize};

use crate::enums::{Festival, MagicalEvent, Season, Sky, VillageMood, WindDirection};

/// Consecutive days with the same sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherStreak {
    /// The repeating sky.
    pub sky: Sky,
    /// How many days in a row it has held, today included.
    pub days: u32,
}

/// Everything the village knows about one day's weather.
///
/// Generated once per day by the weather engine and never mutated after;
/// every other subsystem reads it for that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// The simulated day this weather belongs to.
    pub day: u64,
    /// Season of that day.
    pub season: Season,
    /// Sky condition.
    pub sky: Sky,
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Apparent temperature after wind chill or humidity.
    pub feels_like_c: f64,
    /// Relative humidity, 0.0 to 1.0.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_kph: f64,
    /// Compass point the wind blows from.
    pub wind_direction: WindDirection,
    /// How harsh the day is, 0.0 (idyllic) to 1.0 (stay indoors).
    pub severity: f64,
    /// Whether a magical event is active.
    pub is_magical: bool,
    /// The active magical event, if any.
    pub magical_event: Option<MagicalEvent>,
    /// Festivals unlocked by today's conditions.
    pub festivals: Vec<Festival>,
    /// The village's collective mood over recent days.
    pub village_mood: VillageMood,
    /// Current run of identical skies.
    pub streak: WeatherStreak,
    /// A cozy one or two sentence description.
    pub description: String,
}

impl WeatherState {
    /// One-line summary for a status bar.
    pub fn short_summary(&self) -> String {
        let magic = self
            .magical_event
            .map(|event| format!(" | {event}!"))
            .unwrap_or_default();
        format!(
            "Day {} | {} | {} | {:+.1}°C (feels {:+.1}°C) | wind {} {:.0} km/h{magic}",
            self.day,
            capitalize(self.season.label()),
            self.sky,
            self.temperature_c,
            self.feels_like_c,
            self.wind_direction,
            self.wind_kph,
        )
    }
}

/// Uppercase the first character of a label.
pub(crate) fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
