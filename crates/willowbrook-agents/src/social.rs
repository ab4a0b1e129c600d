//! Interaction rules between personalities.
//!
//! Whether two villagers who share a spot strike up a conversation, and how
//! it goes, depends only on the unordered pair of their personalities. The
//! rules are a lookup table so that every pair is covered exactly once.

use rand::Rng;
use serde::{Deserialize, Serialize};
use willowbrook_types::{Mood, Personality};
use willowbrook_world::WeightedTable;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Base conversation points before modifiers.
const WARM_BASE_POINTS: i32 = 2;

/// Extra points when the two personalities get along naturally.
const COMPATIBLE_BONUS: i32 = 2;

/// Personality pairs that get along naturally.
const COMPATIBLE_PAIRS: [(Personality, Personality); 6] = [
    (Personality::Cheerful, Personality::Nurturing),
    (Personality::Cheerful, Personality::Adventurous),
    (Personality::Shy, Personality::Scholarly),
    (Personality::Grumpy, Personality::Adventurous),
    (Personality::Shy, Personality::Nurturing),
    (Personality::Scholarly, Personality::Nurturing),
];

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a conversation went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Both walk away happier.
    Warm,
    /// Pleasant small talk.
    Neutral,
    /// Words were exchanged.
    Tense,
}

impl Outcome {
    /// Friendship points the conversation is worth for both sides.
    ///
    /// `speaker` opened the conversation and `listener` answered.
    pub fn points(self, compatible: bool, speaker: Mood, listener: Mood) -> i32 {
        match self {
            Self::Warm => {
                let mut points = WARM_BASE_POINTS;
                if compatible {
                    points = points.saturating_add(COMPATIBLE_BONUS);
                }
                if matches!(speaker, Mood::Joyful | Mood::Content) {
                    points = points.saturating_add(1);
                }
                if listener == Mood::Upset {
                    points = points.saturating_sub(1);
                }
                points
            }
            Self::Neutral => 1,
            Self::Tense => -1,
        }
    }

    /// Mood steps both sides move after the conversation.
    pub const fn mood_delta(self) -> i32 {
        match self {
            Self::Warm => 1,
            Self::Neutral => 0,
            Self::Tense => -1,
        }
    }

    /// Memory sentiment for the conversation.
    pub const fn sentiment(self) -> i8 {
        match self {
            Self::Warm => 1,
            Self::Neutral => 0,
            Self::Tense => -1,
        }
    }

    /// Narration verb.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Warm => "had a lovely chat with",
            Self::Neutral => "made small talk with",
            Self::Tense => "bickered with",
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionRule
// ---------------------------------------------------------------------------

/// Encounter likelihood and outcome distribution for a personality pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Multiplier on the village-wide encounter chance.
    pub encounter_scale: f64,
    /// Weight of a warm outcome.
    pub warm: f64,
    /// Weight of a neutral outcome.
    pub neutral: f64,
    /// Weight of a tense outcome.
    pub tense: f64,
}

impl InteractionRule {
    const fn new(encounter_scale: f64, warm: f64, neutral: f64, tense: f64) -> Self {
        Self {
            encounter_scale,
            warm,
            neutral,
            tense,
        }
    }

    /// Probability that the pair strike up a conversation.
    pub fn encounter_chance(&self, base_chance: f64) -> f64 {
        (base_chance * self.encounter_scale).clamp(0.0, 1.0)
    }

    /// Roll whether the pair talk at all.
    pub fn encounters(&self, base_chance: f64, rng: &mut impl Rng) -> bool {
        rng.random::<f64>() < self.encounter_chance(base_chance)
    }

    /// Roll how the conversation goes.
    pub fn roll_outcome(&self, rng: &mut impl Rng) -> Outcome {
        WeightedTable::new([
            (Outcome::Warm, self.warm),
            (Outcome::Neutral, self.neutral),
            (Outcome::Tense, self.tense),
        ])
        .pick(rng)
        .unwrap_or(Outcome::Neutral)
    }
}

/// Whether two personalities get along naturally.
pub fn are_compatible(a: Personality, b: Personality) -> bool {
    COMPATIBLE_PAIRS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// The rule for a pair, regardless of who opens the conversation.
pub fn interaction_rule(a: Personality, b: Personality) -> InteractionRule {
    use Personality::{Adventurous, Cheerful, Grumpy, Nurturing, Scholarly, Shy};

    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    match (low, high) {
        (Grumpy, Grumpy) => InteractionRule::new(0.6, 0.15, 0.35, 0.50),
        (Shy, Shy) => InteractionRule::new(0.5, 0.45, 0.45, 0.10),
        (Cheerful, Grumpy) => InteractionRule::new(1.0, 0.35, 0.35, 0.30),
        (Grumpy, Shy) => InteractionRule::new(0.6, 0.20, 0.50, 0.30),
        (Grumpy, Scholarly) => InteractionRule::new(0.8, 0.30, 0.45, 0.25),
        (Grumpy, Nurturing) => InteractionRule::new(1.0, 0.45, 0.35, 0.20),
        (Cheerful, Shy) => InteractionRule::new(0.8, 0.55, 0.35, 0.10),
        (Shy, Adventurous) => InteractionRule::new(0.7, 0.40, 0.45, 0.15),
        (Adventurous, Scholarly) => InteractionRule::new(0.9, 0.45, 0.40, 0.15),
        (Cheerful, Scholarly) => InteractionRule::new(1.0, 0.50, 0.40, 0.10),
        (x, y) if x == y => InteractionRule::new(1.0, 0.60, 0.30, 0.10),
        (x, y) if are_compatible(x, y) => InteractionRule::new(1.2, 0.75, 0.20, 0.05),
        _ => InteractionRule::new(1.0, 0.55, 0.35, 0.10),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn rules_ignore_argument_order() {
        for a in Personality::ALL {
            for b in Personality::ALL {
                assert_eq!(interaction_rule(a, b), interaction_rule(b, a));
            }
        }
    }

    #[test]
    fn every_rule_can_produce_an_outcome() {
        for a in Personality::ALL {
            for b in Personality::ALL {
                let rule = interaction_rule(a, b);
                let total = rule.warm + rule.neutral + rule.tense;
                assert!((total - 1.0).abs() < 1e-9, "{a} & {b} sum to {total}");
                assert!(rule.encounter_scale > 0.0);
            }
        }
    }

    #[test]
    fn compatible_pairs_are_warmer() {
        let friends = interaction_rule(Personality::Nurturing, Personality::Cheerful);
        let strangers = interaction_rule(Personality::Grumpy, Personality::Grumpy);
        assert!(friends.warm > strangers.warm);
        assert!(are_compatible(Personality::Adventurous, Personality::Grumpy));
        assert!(!are_compatible(Personality::Grumpy, Personality::Shy));
    }

    #[test]
    fn warm_points_follow_the_mood_modifiers() {
        assert_eq!(Outcome::Warm.points(true, Mood::Joyful, Mood::Neutral), 5);
        assert_eq!(Outcome::Warm.points(false, Mood::Neutral, Mood::Upset), 1);
        assert_eq!(Outcome::Neutral.points(true, Mood::Joyful, Mood::Joyful), 1);
        assert_eq!(Outcome::Tense.points(false, Mood::Upset, Mood::Upset), -1);
    }

    #[test]
    fn encounter_chance_is_a_probability() {
        let rule = interaction_rule(Personality::Shy, Personality::Nurturing);
        let chance = rule.encounter_chance(0.9);
        assert!(chance <= 1.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!interaction_rule(Personality::Shy, Personality::Shy).encounters(0.0, &mut rng));
    }
}
