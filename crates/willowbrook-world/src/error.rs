//! Error types for the `willowbrook-world` crate.

use willowbrook_types::{ErrorKind, GrowthStage, Season};

/// Errors raised by the weather engine and the garden.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The coordinates fall outside the garden grid.
    #[error("plot ({row}, {col}) is outside the {rows}x{cols} garden")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },

    /// No crop with this name exists in the catalogue.
    #[error("unknown crop: {0}")]
    UnknownCrop(String),

    /// The crop cannot be planted in the current season.
    #[error("{crop} can't be planted in {season}")]
    OutOfSeason {
        /// The crop.
        crop: String,
        /// The season it was attempted in.
        season: Season,
    },

    /// The plot already holds a crop (living or withered).
    #[error("plot ({row}, {col}) already has {crop} in it")]
    PlotOccupied {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
        /// What is planted there.
        crop: String,
    },

    /// The plot holds nothing to act on.
    #[error("plot ({row}, {col}) is empty")]
    PlotEmpty {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
    },

    /// The crop is not ready for the requested action.
    #[error("the {crop} at ({row}, {col}) is {stage}, not ready")]
    NotReady {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
        /// The crop.
        crop: String,
        /// Its current stage.
        stage: GrowthStage,
    },

    /// The plot was already watered today.
    #[error("the {crop} at ({row}, {col}) was already watered today")]
    AlreadyWatered {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
        /// The crop.
        crop: String,
    },

    /// The calendar and the caller disagree about the date.
    #[error("day {day} belongs to {expected}, but {actual} was supplied")]
    SeasonMismatch {
        /// The simulated day.
        day: u64,
        /// Season derived from the day.
        expected: Season,
        /// Season the caller passed.
        actual: Season,
    },

    /// Day zero is the pre-game state and has no weather.
    #[error("day {0} is not a playable day")]
    InvalidDay(u64),
}

impl WorldError {
    /// Classify the error for the caller.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. }
            | Self::UnknownCrop(_)
            | Self::OutOfSeason { .. }
            | Self::PlotEmpty { .. }
            | Self::NotReady { .. } => ErrorKind::Validation,
            Self::PlotOccupied { .. } | Self::AlreadyWatered { .. } => ErrorKind::Conflict,
            Self::SeasonMismatch { .. } | Self::InvalidDay(_) => ErrorKind::InvariantViolation,
        }
    }
}
