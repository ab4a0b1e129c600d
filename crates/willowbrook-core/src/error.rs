//! The orchestrator's error type, wrapping every subsystem's errors.

use willowbrook_agents::AgentError;
use willowbrook_market::MarketError;
use willowbrook_types::ErrorKind;
use willowbrook_world::WorldError;

use crate::clock::ClockError;
use crate::config::ConfigError;

/// Errors returned by the [`Simulation`](crate::Simulation) and its handle.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A weather or garden operation failed.
    #[error("{source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A villager or pet operation failed.
    #[error("{source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A market operation failed.
    #[error("{source}")]
    Market {
        /// The underlying market error.
        #[from]
        source: MarketError,
    },

    /// A day is being advanced, or a failed advance left the game halted.
    #[error("day {day} is still being advanced")]
    DayInProgress {
        /// The day being advanced.
        day: u64,
    },

    /// Forecasts cover between one day and the configured horizon.
    #[error("forecasts cover 1 to {max} days, asked for {requested}")]
    ForecastRange {
        /// Days asked for.
        requested: usize,
        /// Furthest day available.
        max: usize,
    },

    /// Another caller holds the simulation.
    #[error("the simulation is busy with another request")]
    Busy,

    /// Journal entries need some text.
    #[error("journal entry is empty")]
    EmptyJournalEntry,

    /// The shared simulation lock was poisoned by a panic.
    #[error("simulation lock poisoned")]
    LockPoisoned,
}

impl SimulationError {
    /// Classify the error for the caller.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. }
            | Self::ForecastRange { .. }
            | Self::EmptyJournalEntry => ErrorKind::Validation,
            Self::Clock { source } => match source {
                ClockError::InvalidConfig { .. } => ErrorKind::Validation,
                ClockError::DayOverflow => ErrorKind::InvariantViolation,
            },
            Self::World { source } => source.kind(),
            Self::Agent { source } => source.kind(),
            Self::Market { source } => source.kind(),
            Self::DayInProgress { .. } | Self::Busy => ErrorKind::Conflict,
            Self::LockPoisoned => ErrorKind::InvariantViolation,
        }
    }
}
