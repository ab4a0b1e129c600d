//! The village clock: the one owner of "the current day".
//!
//! Season, day of season, and year are derived from the day counter and
//! the calendar; none of them is stored separately. Day 0 is the pre-game
//! state, and the first advance moves to day 1.

use willowbrook_types::{Calendar, Season, TimeOfDay};

use crate::config::WorldConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,

    /// Invalid calendar configuration.
    #[error("invalid calendar configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tracks the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VillageClock {
    day: u64,
    calendar: Calendar,
}

impl VillageClock {
    /// Create a clock at day 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `days_per_season` is zero.
    pub fn new(config: &WorldConfig) -> Result<Self, ClockError> {
        Self::from_parts(0, config.days_per_season)
    }

    /// Create a clock at an explicit day (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `days_per_season` is zero.
    pub fn from_parts(day: u64, days_per_season: u32) -> Result<Self, ClockError> {
        if days_per_season == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "days_per_season must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            day,
            calendar: Calendar::new(days_per_season),
        })
    }

    /// Advance by one day. Returns the new day number.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// The current day, 0 before the first advance.
    pub const fn day(&self) -> u64 {
        self.day
    }

    /// The calendar in use.
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Season of the current day. Day 0 reports spring.
    pub fn season(&self) -> Season {
        self.calendar.season(self.day)
    }

    /// 1-based day within the season.
    pub fn day_of_season(&self) -> u32 {
        self.calendar.day_of_season(self.day)
    }

    /// 1-based year.
    pub const fn year(&self) -> u64 {
        self.calendar.year(self.day)
    }

    /// Days left before the season turns, counting today.
    pub fn days_until_season_change(&self) -> u32 {
        self.calendar
            .days_per_season()
            .saturating_sub(self.day_of_season())
            .saturating_add(1)
    }

    /// The slots every day runs through, in order.
    pub const fn slots() -> [TimeOfDay; 5] {
        TimeOfDay::ALL
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_clock(days_per_season: u32) -> VillageClock {
        VillageClock::from_parts(0, days_per_season).unwrap()
    }

    #[test]
    fn clock_starts_at_day_zero() {
        let clock = VillageClock::new(&WorldConfig::default()).unwrap();
        assert_eq!(clock.day(), 0);
        assert_eq!(clock.season(), Season::Spring);
    }

    #[test]
    fn clock_advances() {
        let mut clock = make_clock(28);
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.day(), 2);
        assert_eq!(clock.day_of_season(), 2);
    }

    #[test]
    fn seasons_follow_the_calendar() {
        let mut clock = make_clock(3);
        let mut seen = Vec::new();
        for _ in 0..13 {
            clock.advance().unwrap();
            seen.push(clock.season());
        }
        assert_eq!(seen.first(), Some(&Season::Spring));
        assert_eq!(seen.get(3), Some(&Season::Summer));
        assert_eq!(seen.get(11), Some(&Season::Winter));
        assert_eq!(seen.last(), Some(&Season::Spring));
        assert_eq!(clock.year(), 2);
    }

    #[test]
    fn countdown_to_next_season() {
        let mut clock = make_clock(28);
        clock.advance().unwrap();
        assert_eq!(clock.days_until_season_change(), 28);
        let mut clock = VillageClock::from_parts(28, 28).unwrap();
        assert_eq!(clock.days_until_season_change(), 1);
        clock.advance().unwrap();
        assert_eq!(clock.season(), Season::Summer);
    }

    #[test]
    fn zero_length_seasons_are_rejected() {
        assert!(matches!(
            VillageClock::from_parts(0, 0),
            Err(ClockError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = VillageClock::from_parts(u64::MAX, 28).unwrap();
        assert_eq!(clock.advance(), Err(ClockError::DayOverflow));
        assert_eq!(clock.day(), u64::MAX);
    }
}
