//! The physical world of the Willowbrook village: weather and the garden.
//!
//! Nothing in this crate owns a random number generator. Every operation
//! that needs randomness takes a caller-supplied [`rand::Rng`], so one
//! seeded generator reproduces a whole play-through.
//!
//! # Modules
//!
//! - [`weather`] -- Markov-chain sky, seasonal temperature curve, magical
//!   events, and the [`WeatherEngine`] that commits one day at a time.
//! - [`festival`] -- Festival eligibility rules over a day's conditions.
//! - [`mood`] -- Village mood from a rolling window of recent skies.
//! - [`crops`] -- The crop catalogue and companion pairs.
//! - [`garden`] -- The [`GardenGrid`]: planting, watering, growth, harvest.
//! - [`sampling`] -- Weighted tables and Gaussian noise.
//! - [`error`] -- Error types for weather and garden operations.

pub mod crops;
pub mod error;
pub mod festival;
pub mod garden;
pub mod mood;
pub mod sampling;
pub mod weather;

// Re-export primary types at crate root.
pub use crops::{COMPANION_PAIRS, CROPS, CropType, are_companions, find_crop, seasonal_crops};
pub use error::WorldError;
pub use festival::{FESTIVAL_RULES, FestivalRule, eligible_festivals};
pub use garden::{GardenDay, GardenGrid, GardenPlot, GardenSummary, GardenTuning, Harvest, RipenedCrop};
pub use mood::{DayRecord, classify_village_mood, sky_comfort};
pub use sampling::{WeightedTable, gaussian, round_to};
pub use weather::{WeatherEngine, WeatherTuning};
