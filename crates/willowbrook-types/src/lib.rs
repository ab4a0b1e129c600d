//! Shared type definitions for the Willowbrook village simulation.
//!
//! This crate is the single vocabulary used by the weather, villager,
//! garden, pet, and market crates and by the orchestrator that composes
//! them.
//!
//! # Modules
//!
//! - [`calendar`] -- Day number to season, year, and year-phase arithmetic
//! - [`enums`] -- Seasons, sky conditions, moods, tiers, and other enums
//! - [`ids`] -- Stable string keys for villagers and market items
//! - [`tier`] -- Threshold ladders for friendship and pet bonds
//! - [`weather`] -- The immutable per-day [`WeatherState`]
//! - [`report`] -- The per-day [`DailyReport`]
//! - [`error`] -- The [`ErrorKind`] taxonomy

pub mod calendar;
pub mod enums;
pub mod error;
pub mod ids;
pub mod report;
pub mod tier;
pub mod weather;

// Re-export all public types at crate root for convenience.
pub use calendar::{Calendar, DEFAULT_DAYS_PER_SEASON};
pub use enums::{
    BondTier, Festival, FriendshipTier, GardenWeather, GiftCategory, GrowthStage, Location,
    MagicalEvent, Mood, Personality, PetActivity, PetMood, PetPersonality, PetWeather,
    QualityTier, Rarity, Season, Sky, SoilType, Species, TimeOfDay, VillageMood, WindDirection,
};
pub use error::ErrorKind;
pub use ids::{ItemKey, VillagerId};
pub use report::DailyReport;
pub use tier::{BOND_LADDER, FRIENDSHIP_LADDER, TierLadder};
pub use weather::{WeatherState, WeatherStreak};
