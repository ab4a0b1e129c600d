//! Error types for the willowbrook-agents crate.
//!
//! Every failed operation is rejected before any state changes, so a
//! caller can correct its input and retry.

use willowbrook_types::{ErrorKind, PetPersonality, Season, Species, VillagerId};

/// Errors raised by the villager directory and the pet registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// No villager has this key.
    #[error("villager not found: {0}")]
    UnknownVillager(VillagerId),

    /// Gift quality must be between 1 and 5 stars.
    #[error("gift quality must be 1 to 5 stars, got {0}")]
    InvalidQuality(u8),

    /// No adopted pet has this name.
    #[error("no pet named {0}")]
    UnknownPet(String),

    /// Pet names must contain something besides whitespace.
    #[error("a pet needs a name")]
    EmptyName,

    /// The name is already taken by an adopted pet.
    #[error("a pet named {0} already lives here")]
    NameTaken(String),

    /// No pet with this species and personality is waiting for a home.
    #[error("no {personality} {species} is up for adoption")]
    NotAdoptable {
        /// Requested species.
        species: Species,
        /// Requested personality.
        personality: PetPersonality,
    },

    /// The pet has already eaten today.
    #[error("{0} isn't hungry")]
    AlreadyFed(String),

    /// The pet has been petted as much as it wants today.
    #[error("{0} is all petted out for today")]
    PettedOut(String),

    /// The pet lacks the energy for the requested activity.
    #[error("{name} is too tired (energy {energy}, needs {needed})")]
    TooTired {
        /// The pet.
        name: String,
        /// Its current energy.
        energy: u32,
        /// Energy the activity costs.
        needed: u32,
    },

    /// The day's weather belongs to a different season than the calendar.
    #[error("day {day} belongs to {expected}, but the weather says {actual}")]
    SeasonMismatch {
        /// The simulated day.
        day: u64,
        /// Season according to the calendar.
        expected: Season,
        /// Season carried by the weather.
        actual: Season,
    },
}

impl AgentError {
    /// Classify the error for the caller.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVillager(_)
            | Self::InvalidQuality(_)
            | Self::UnknownPet(_)
            | Self::EmptyName
            | Self::NotAdoptable { .. } => ErrorKind::Validation,
            Self::NameTaken(_) | Self::AlreadyFed(_) | Self::PettedOut(_) => ErrorKind::Conflict,
            Self::TooTired { .. } => ErrorKind::InsufficientResource,
            Self::SeasonMismatch { .. } => ErrorKind::InvariantViolation,
        }
    }
}
