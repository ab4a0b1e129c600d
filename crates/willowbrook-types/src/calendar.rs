//! Day-number arithmetic for the village calendar.
//!
//! Day 1 is the first day of spring in year 1. Day 0 is the pre-game state
//! before the first advance and belongs to no season.

use serde::{Deserialize, Serialize};

use crate::enums::Season;

/// Default number of days in each season.
pub const DEFAULT_DAYS_PER_SEASON: u32 = 28;

/// Converts absolute day numbers into seasons, years, and year phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    days_per_season: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(DEFAULT_DAYS_PER_SEASON)
    }
}

impl Calendar {
    /// Create a calendar. A season length of zero is treated as one day.
    pub const fn new(days_per_season: u32) -> Self {
        let days_per_season = if days_per_season == 0 { 1 } else { days_per_season };
        Self { days_per_season }
    }

    /// Days in each season.
    pub const fn days_per_season(&self) -> u32 {
        self.days_per_season
    }

    /// Days in a year.
    pub const fn days_per_year(&self) -> u64 {
        (self.days_per_season as u64).saturating_mul(4)
    }

    /// Zero-based day offset within the year.
    const fn offset_in_year(&self, day: u64) -> u64 {
        let year_len = self.days_per_year();
        day.saturating_sub(1) % year_len
    }

    /// Season of a day. Day 0 reports spring.
    pub fn season(&self, day: u64) -> Season {
        let index = self.offset_in_year(day) / u64::from(self.days_per_season);
        Season::from_index(usize::try_from(index).unwrap_or(0))
    }

    /// 1-based day within the season.
    pub fn day_of_season(&self, day: u64) -> u32 {
        let within = self.offset_in_year(day) % u64::from(self.days_per_season);
        u32::try_from(within).unwrap_or(0).saturating_add(1)
    }

    /// 1-based year.
    pub const fn year(&self, day: u64) -> u64 {
        (day.saturating_sub(1) / self.days_per_year()).saturating_add(1)
    }

    /// Fraction of the year elapsed at the start of `day`, in `[0, 1)`.
    #[allow(clippy::cast_precision_loss)] // Day offsets stay far below 2^52.
    pub fn year_phase(&self, day: u64) -> f64 {
        self.offset_in_year(day) as f64 / self.days_per_year() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasons_change_every_28_days() {
        let calendar = Calendar::default();
        assert_eq!(calendar.season(1), Season::Spring);
        assert_eq!(calendar.season(28), Season::Spring);
        assert_eq!(calendar.season(29), Season::Summer);
        assert_eq!(calendar.season(112), Season::Winter);
        assert_eq!(calendar.season(113), Season::Spring);
    }

    #[test]
    fn day_of_season_and_year() {
        let calendar = Calendar::default();
        assert_eq!(calendar.day_of_season(1), 1);
        assert_eq!(calendar.day_of_season(30), 2);
        assert_eq!(calendar.year(112), 1);
        assert_eq!(calendar.year(113), 2);
    }

    #[test]
    fn short_seasons() {
        let calendar = Calendar::new(2);
        assert_eq!(calendar.season(3), Season::Summer);
        assert_eq!(calendar.season(9), Season::Spring);
        assert_eq!(Calendar::new(0).days_per_season(), 1);
    }

    #[test]
    fn year_phase_starts_at_zero() {
        let calendar = Calendar::default();
        assert!(calendar.year_phase(1).abs() < f64::EPSILON);
        assert!((calendar.year_phase(57) - 0.5).abs() < 1e-12);
    }
}
