//! Calendar, configuration, and the daily orchestrator for the Willowbrook
//! village simulation.
//!
//! A [`Simulation`] owns every subsystem, the player's belongings, and the
//! one seeded random generator. It advances the village a day at a time in
//! a fixed order and turns each day into a
//! [`DailyReport`](willowbrook_types::DailyReport).
//!
//! # Modules
//!
//! - [`clock`] -- The [`VillageClock`]: day counter and derived season,
//!   day of season, and year.
//! - [`config`] -- Configuration loading from `willowbrook-config.yaml` into
//!   strongly-typed structs.
//! - [`orchestrator`] -- The [`Simulation`], its Idle/Advancing phase, the
//!   daily advance, and forecasts.
//! - [`actions`] -- Player actions between days and the journal.
//! - [`status`] -- The read-only [`SimulationStatus`] snapshot.
//! - [`handle`] -- [`SimulationHandle`], a thread-safe shared game.
//! - [`error`] -- [`SimulationError`], wrapping every subsystem's errors.

pub mod actions;
pub mod clock;
pub mod config;
pub mod error;
pub mod handle;
pub mod orchestrator;
pub mod status;

// Re-export primary types at crate root.
pub use actions::{ActionDetail, ActionOutcome, JournalEntry};
pub use clock::{ClockError, VillageClock};
pub use config::{ConfigError, ReportConfig, SimulationConfig, WeatherConfig, WorldConfig};
pub use error::SimulationError;
pub use handle::SimulationHandle;
pub use orchestrator::{Phase, Simulation};
pub use status::{EconomyStatus, GardenStatus, PetStatus, SimulationStatus, VillagerStatus};
