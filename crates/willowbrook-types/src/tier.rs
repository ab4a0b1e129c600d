//! Ordinal tier ladders with point thresholds.
//!
//! Friendship and pet bonds are both ranked by accumulated points. A ladder
//! is a base tier plus a sorted slice of `(threshold, tier)` pairs; [`TierLadder::tier_for`]
//! returns the highest tier whose threshold does not exceed the points, so
//! tier is a monotonic step function of points and no tier can be skipped
//! without the points passing through its range first.

use crate::enums::{BondTier, FriendshipTier};

/// A ladder starting at a base tier (held from 0 points) followed by
/// `(threshold, tier)` steps sorted by ascending threshold.
#[derive(Debug, Clone, Copy)]
pub struct TierLadder<T: 'static> {
    base: T,
    steps: &'static [(u32, T)],
}

impl<T: Copy + PartialEq> TierLadder<T> {
    /// Build a ladder from its base tier and the steps above it.
    pub const fn new(base: T, steps: &'static [(u32, T)]) -> Self {
        Self { base, steps }
    }

    /// The tier reached with `points`.
    pub fn tier_for(&self, points: u32) -> T {
        self.steps
            .iter()
            .take_while(|(threshold, _)| points >= *threshold)
            .last()
            .map_or(self.base, |(_, tier)| *tier)
    }

    /// The lowest point total that still holds `tier`.
    pub fn floor_of(&self, tier: T) -> u32 {
        self.steps
            .iter()
            .find(|(_, step)| *step == tier)
            .map_or(0, |(threshold, _)| *threshold)
    }

    /// Apply a signed point change. Losses stop at the floor of the tier
    /// currently held, so a tier once reached is never lost.
    pub fn apply_delta(&self, points: u32, delta: i32) -> u32 {
        if delta >= 0 {
            return points.saturating_add(delta.unsigned_abs());
        }
        let floor = self.floor_of(self.tier_for(points));
        points.saturating_sub(delta.unsigned_abs()).max(floor)
    }

    /// Points required for the tier after the one held at `points`, if any.
    pub fn next_threshold(&self, points: u32) -> Option<u32> {
        self.steps
            .iter()
            .map(|(threshold, _)| *threshold)
            .find(|threshold| *threshold > points)
    }

    /// The tier held from zero points.
    pub const fn base(&self) -> T {
        self.base
    }
}

/// Villager friendship thresholds.
pub const FRIENDSHIP_LADDER: TierLadder<FriendshipTier> = TierLadder::new(
    FriendshipTier::Stranger,
    &[
        (20, FriendshipTier::Acquaintance),
        (50, FriendshipTier::Friend),
        (100, FriendshipTier::CloseFriend),
        (150, FriendshipTier::BestFriend),
    ],
);

/// Pet bond thresholds.
pub const BOND_LADDER: TierLadder<BondTier> = TierLadder::new(
    BondTier::Stranger,
    &[
        (15, BondTier::Familiar),
        (40, BondTier::Companion),
        (80, BondTier::Devoted),
        (120, BondTier::Soulbound),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendship_thresholds() {
        assert_eq!(FRIENDSHIP_LADDER.tier_for(0), FriendshipTier::Stranger);
        assert_eq!(FRIENDSHIP_LADDER.tier_for(19), FriendshipTier::Stranger);
        assert_eq!(FRIENDSHIP_LADDER.tier_for(20), FriendshipTier::Acquaintance);
        assert_eq!(FRIENDSHIP_LADDER.tier_for(149), FriendshipTier::CloseFriend);
        assert_eq!(FRIENDSHIP_LADDER.tier_for(10_000), FriendshipTier::BestFriend);
    }

    #[test]
    fn tier_is_monotonic_in_points() {
        let mut previous = FRIENDSHIP_LADDER.tier_for(0);
        for points in 0..300 {
            let tier = FRIENDSHIP_LADDER.tier_for(points);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn losses_stop_at_the_current_tier_floor() {
        assert_eq!(FRIENDSHIP_LADDER.apply_delta(52, -5), 50);
        assert_eq!(FRIENDSHIP_LADDER.apply_delta(12, -5), 7);
        assert_eq!(FRIENDSHIP_LADDER.apply_delta(3, -5), 0);
        assert_eq!(FRIENDSHIP_LADDER.apply_delta(45, 10), 55);
    }

    #[test]
    fn floors_and_next_thresholds() {
        assert_eq!(BOND_LADDER.floor_of(BondTier::Companion), 40);
        assert_eq!(BOND_LADDER.next_threshold(0), Some(15));
        assert_eq!(BOND_LADDER.next_threshold(80), Some(120));
        assert_eq!(BOND_LADDER.next_threshold(120), None);
    }
}
