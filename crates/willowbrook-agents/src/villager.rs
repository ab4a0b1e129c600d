//! A single villager: mood, friendships, memories, and gift reactions.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use willowbrook_types::{
    FRIENDSHIP_LADDER, FriendshipTier, GiftCategory, Location, Mood, Personality, Season,
    TimeOfDay, VillagerId,
};
use willowbrook_world::WeightedTable;

use crate::error::AgentError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bonus points for receiving one's favourite gift.
const FAVOURITE_GIFT_BONUS: i32 = 10;

/// Gifts never cost more than this many points.
const GIFT_POINT_FLOOR: i32 = -5;

/// Gifts worth at least this many points are received with delight.
const DELIGHT_THRESHOLD: i32 = 8;

/// Memories kept per villager; older ones are forgotten first.
pub const MEMORY_LIMIT: usize = 64;

/// Full energy.
pub const MAX_ENERGY: u32 = 100;

// ---------------------------------------------------------------------------
// Preference tables
// ---------------------------------------------------------------------------

/// How much a personality likes a category of gift, per star of quality.
pub const fn gift_affinity(personality: Personality, category: GiftCategory) -> i32 {
    use GiftCategory::{Book, Fish, Flower, Food, Foraged, Gemstone, Handmade, Tool};
    match personality {
        Personality::Cheerful => match category {
            Flower => 3,
            Food | Handmade => 2,
            Gemstone | Fish | Foraged => 1,
            Book | Tool => 0,
        },
        Personality::Grumpy => match category {
            Tool => 3,
            Gemstone | Fish => 2,
            Food | Book => 1,
            Handmade | Foraged => 0,
            Flower => -1,
        },
        Personality::Shy => match category {
            Handmade => 3,
            Flower | Book | Foraged => 2,
            Food | Gemstone => 1,
            Tool | Fish => 0,
        },
        Personality::Adventurous => match category {
            Gemstone => 3,
            Tool | Fish | Foraged => 2,
            Food | Handmade | Book => 1,
            Flower => 0,
        },
        Personality::Scholarly => match category {
            Book => 3,
            Gemstone => 2,
            Flower | Handmade | Tool | Foraged => 1,
            Food | Fish => 0,
        },
        Personality::Nurturing => match category {
            Flower | Food => 3,
            Handmade | Foraged => 2,
            Book | Gemstone | Fish => 1,
            Tool => 0,
        },
    }
}

/// The category a personality likes best (first in catalogue order on ties).
pub fn favourite_category(personality: Personality) -> GiftCategory {
    GiftCategory::ALL
        .into_iter()
        .fold(GiftCategory::Flower, |best, category| {
            if gift_affinity(personality, category) > gift_affinity(personality, best) {
                category
            } else {
                best
            }
        })
}

/// Daily mood distribution for a personality, from joyful down to upset.
const fn mood_weights(personality: Personality) -> [(Mood, f64); 5] {
    let [joyful, content, neutral, lonely, upset] = match personality {
        Personality::Cheerful => [0.40, 0.35, 0.15, 0.05, 0.05],
        Personality::Grumpy => [0.05, 0.15, 0.35, 0.10, 0.35],
        Personality::Shy => [0.10, 0.25, 0.30, 0.25, 0.10],
        Personality::Adventurous => [0.35, 0.30, 0.20, 0.05, 0.10],
        Personality::Scholarly => [0.15, 0.35, 0.30, 0.10, 0.10],
        Personality::Nurturing => [0.30, 0.35, 0.15, 0.15, 0.05],
    };
    [
        (Mood::Joyful, joyful),
        (Mood::Content, content),
        (Mood::Neutral, neutral),
        (Mood::Lonely, lonely),
        (Mood::Upset, upset),
    ]
}

/// Dialogue for a personality in a given mood, if it has its own lines.
const fn dialogue_lines(personality: Personality, mood: Mood) -> &'static [&'static str] {
    match (personality, mood) {
        (Personality::Cheerful, Mood::Joyful) => &[
            "Isn't today just perfect? I want to skip all the way to the plaza!",
            "I woke up humming and I haven't stopped since.",
        ],
        (Personality::Cheerful, Mood::Content) => &[
            "Morning, neighbour! The cafe has fresh scones today.",
            "I'm off to pick flowers. Want me to bring you some?",
        ],
        (Personality::Grumpy, Mood::Neutral) => &[
            "Hmph. Weather's bearable, I'll give it that.",
            "Oh, it's you. Fine. Stay if you must.",
        ],
        (Personality::Grumpy, Mood::Upset) => &[
            "Not today. Whatever it is, not today.",
            "The fence is broken, the kettle's cold, and I'm out of nails.",
        ],
        (Personality::Shy, Mood::Lonely) => &[
            "Oh! Hello... I didn't think anyone would come by.",
            "Would you... maybe sit with me a while? Only if you want.",
        ],
        (Personality::Shy, Mood::Content) => &[
            "I pressed a new batch of violets. They came out so well.",
            "It's peaceful here today, isn't it?",
        ],
        (Personality::Adventurous, Mood::Joyful) => &[
            "There's a cave behind the waterfall. We're going. Today.",
            "I climbed the ridge before sunrise. You should've seen it!",
        ],
        (Personality::Adventurous, Mood::Content) => &[
            "Found a fossil on the beach. Look at the little spirals!",
            "Mapping the east trail tomorrow. Coming along?",
        ],
        (Personality::Scholarly, Mood::Content) => &[
            "The library just got a treatise on moss. Riveting stuff.",
            "Did you know the old windmill predates the village charter?",
        ],
        (Personality::Scholarly, Mood::Neutral) => &[
            "Hm? Sorry, I was halfway through a footnote.",
            "The folklore shelf is a disaster. Someone has to fix it.",
        ],
        (Personality::Nurturing, Mood::Joyful) => &[
            "The seedlings are up! Come and look before they grow shy.",
            "I made a huge pot of stew. Bring a bowl, dear.",
        ],
        (Personality::Nurturing, Mood::Content) => &[
            "Have you eaten today? You look like you need a biscuit.",
            "Don't forget to rest. The garden will wait for you.",
        ],
        _ => &[],
    }
}

/// Generic dialogue for a mood.
const fn fallback_line(mood: Mood) -> &'static str {
    match mood {
        Mood::Joyful => "What a lovely day!",
        Mood::Content => "Things are going nicely.",
        Mood::Neutral => "Hello there.",
        Mood::Lonely => "It's been awfully quiet lately...",
        Mood::Upset => "I'd rather be on my own right now.",
    }
}

// ---------------------------------------------------------------------------
// Gifts and records
// ---------------------------------------------------------------------------

/// Something given to a villager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    /// What it is.
    pub name: String,
    /// What kind of thing it is.
    pub category: GiftCategory,
    /// Star quality, 1 to 5.
    pub quality: u8,
}

impl Gift {
    /// Build a gift.
    pub fn new(name: impl Into<String>, category: GiftCategory, quality: u8) -> Self {
        Self {
            name: name.into(),
            category,
            quality,
        }
    }
}

/// One villager's friendship toward someone else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    /// Accumulated points.
    pub points: u32,
    /// Conversations held today.
    pub conversations_today: u32,
    /// Whether any interaction happened today (conversation, gift, visit).
    pub interacted_today: bool,
    /// Days since the two met.
    pub days_known: u32,
    /// Names of gifts received from them.
    pub gifts_received: Vec<String>,
}

impl Friendship {
    /// The tier the points correspond to.
    pub fn tier(&self) -> FriendshipTier {
        FRIENDSHIP_LADDER.tier_for(self.points)
    }

    /// Apply a signed change, never dropping below the current tier.
    pub fn adjust(&mut self, delta: i32) {
        self.points = FRIENDSHIP_LADDER.apply_delta(self.points, delta);
    }
}

/// Something a villager remembers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// When it happened.
    pub day: u64,
    /// What happened.
    pub description: String,
    /// How it felt, -2 to +2.
    pub sentiment: i8,
}

/// Where a villager is and what they are doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whereabouts {
    /// Time of day.
    pub slot: TimeOfDay,
    /// Where.
    pub location: Location,
    /// Doing what.
    pub activity: String,
}

/// A villager's response to a gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftReaction {
    /// The narrated reaction.
    pub message: String,
    /// Points the gift was worth before tier protection.
    pub points: i32,
    /// Friendship tier after the gift.
    pub tier: FriendshipTier,
    /// Whether the tier went up.
    pub tier_changed: bool,
}

// ---------------------------------------------------------------------------
// Villager
// ---------------------------------------------------------------------------

/// An inhabitant of the village.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Villager {
    /// Stable key.
    pub id: VillagerId,
    /// Display name.
    pub name: String,
    /// Temperament.
    pub personality: Personality,
    /// Where they live.
    pub home: Location,
    /// Season of their birthday.
    pub birthday_season: Season,
    /// Day of the season of their birthday.
    pub birthday_day: u32,
    /// The one gift they love above all.
    pub favourite_gift: Gift,
    /// Today's mood.
    pub mood: Mood,
    /// Energy, 0 to 100.
    pub energy: u32,
    /// Current whereabouts.
    pub whereabouts: Whereabouts,
    /// Friendships keyed by the other party.
    pub friendships: BTreeMap<VillagerId, Friendship>,
    /// Recent memories, oldest first.
    pub memories: Vec<Memory>,
}

impl Villager {
    /// A villager at home, rested, with no friends yet.
    pub fn new(
        id: impl Into<VillagerId>,
        name: impl Into<String>,
        personality: Personality,
        home: Location,
        birthday: (Season, u32),
        favourite_gift: Gift,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            personality,
            home,
            birthday_season: birthday.0,
            birthday_day: birthday.1,
            favourite_gift,
            mood: Mood::Neutral,
            energy: MAX_ENERGY,
            whereabouts: Whereabouts {
                slot: TimeOfDay::Dawn,
                location: home,
                activity: "resting at home".to_owned(),
            },
            friendships: BTreeMap::new(),
            memories: Vec::new(),
        }
    }

    /// Whether today is this villager's birthday.
    pub fn is_birthday(&self, season: Season, day_of_season: u32) -> bool {
        self.birthday_season == season && self.birthday_day == day_of_season
    }

    /// Friendship tier toward someone (stranger if they have never met).
    pub fn tier_toward(&self, other: &VillagerId) -> FriendshipTier {
        self.friendships
            .get(other)
            .map_or(FRIENDSHIP_LADDER.base(), Friendship::tier)
    }

    /// Friendship points toward someone.
    pub fn points_toward(&self, other: &VillagerId) -> u32 {
        self.friendships.get(other).map_or(0, |f| f.points)
    }

    /// Shift mood along the ladder.
    pub fn adjust_mood(&mut self, delta: i32) {
        self.mood = self.mood.shift(delta);
    }

    /// Sample today's base mood from the personality's distribution.
    pub fn roll_mood(&mut self, rng: &mut impl Rng) -> Mood {
        let table = WeightedTable::new(mood_weights(self.personality));
        self.mood = table.pick(rng).unwrap_or(Mood::Neutral);
        self.mood
    }

    /// Remember something, forgetting the oldest memory when full.
    pub fn remember(&mut self, day: u64, description: impl Into<String>, sentiment: i8) {
        if self.memories.len() >= MEMORY_LIMIT {
            self.memories.remove(0);
        }
        self.memories.push(Memory {
            day,
            description: description.into(),
            sentiment: sentiment.clamp(-2, 2),
        });
    }

    /// The most recent `count` memories, oldest first.
    pub fn recall_recent(&self, count: usize) -> &[Memory] {
        let start = self.memories.len().saturating_sub(count);
        self.memories.get(start..).unwrap_or_default()
    }

    /// Something the villager might say right now.
    pub fn dialogue(&self, rng: &mut impl Rng) -> String {
        let lines = dialogue_lines(self.personality, self.mood);
        let line = if lines.is_empty() {
            fallback_line(self.mood)
        } else {
            lines
                .get(rng.random_range(0..lines.len()))
                .copied()
                .unwrap_or_else(|| fallback_line(self.mood))
        };
        format!("{}: \"{line}\"", self.name)
    }

    /// Receive a gift from `from`.
    ///
    /// Points are affinity times quality, plus a bonus for the favourite
    /// gift, floored at -5. Losses never cost a tier already reached.
    pub fn receive_gift(
        &mut self,
        from: &VillagerId,
        gift: &Gift,
        day: u64,
    ) -> Result<GiftReaction, AgentError> {
        if !(1..=5).contains(&gift.quality) {
            return Err(AgentError::InvalidQuality(gift.quality));
        }

        let affinity = gift_affinity(self.personality, gift.category);
        let mut points = affinity.saturating_mul(i32::from(gift.quality));
        let favourite = gift.name.eq_ignore_ascii_case(&self.favourite_gift.name);
        if favourite {
            points = points.saturating_add(FAVOURITE_GIFT_BONUS);
        }
        let points = points.max(GIFT_POINT_FLOOR);

        let name = &self.name;
        let message = if favourite {
            format!("{name} gasps: \"My absolute favourite! How did you know?\"")
        } else if points >= DELIGHT_THRESHOLD {
            format!("{name} beams: \"Oh, I love this! You're so thoughtful.\"")
        } else if points > 0 {
            format!("{name} smiles: \"That's kind of you, thank you.\"")
        } else if points == 0 {
            format!("{name} nods politely: \"Oh... thanks, I suppose.\"")
        } else {
            format!("{name} frowns: \"Hm. This isn't really my sort of thing.\"")
        };

        let record = self.friendships.entry(from.clone()).or_default();
        let before = record.tier();
        record.adjust(points);
        record.interacted_today = true;
        record.gifts_received.push(gift.name.clone());
        let tier = record.tier();

        let sentiment = if points >= DELIGHT_THRESHOLD {
            2
        } else {
            i8::try_from(points.signum()).unwrap_or(0)
        };
        self.remember(day, format!("Was given {} by {from}", gift.name), sentiment);
        self.adjust_mood(points.signum());

        Ok(GiftReaction {
            message,
            points,
            tier,
            tier_changed: tier != before,
        })
    }

    /// Start a new day: rested, with fresh conversation counters.
    pub fn start_day(&mut self) {
        self.energy = MAX_ENERGY;
        for record in self.friendships.values_mut() {
            record.conversations_today = 0;
            record.interacted_today = false;
            record.days_known = record.days_known.saturating_add(1);
        }
    }

    /// End the day: friendships left untended lose a point, but never a tier.
    pub fn decay_friendships(&mut self) {
        for record in self.friendships.values_mut() {
            if !record.interacted_today && record.points > 0 {
                record.adjust(-1);
            }
        }
    }

    /// Mean sentiment across remembered events.
    #[allow(clippy::cast_precision_loss)] // Memory counts are tiny.
    pub fn overall_sentiment(&self) -> f64 {
        if self.memories.is_empty() {
            return 0.0;
        }
        let total: i64 = self.memories.iter().map(|m| i64::from(m.sentiment)).sum();
        total as f64 / self.memories.len() as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn fern() -> Villager {
        Villager::new(
            "fern",
            "Fern",
            Personality::Shy,
            Location::IvyCabin,
            (Season::Autumn, 21),
            Gift::new("Pressed Wildflower Journal", GiftCategory::Handmade, 4),
        )
    }

    #[test]
    fn favourite_gift_is_a_delight() {
        let mut villager = fern();
        let gift = Gift::new("Pressed Wildflower Journal", GiftCategory::Handmade, 4);
        let reaction = villager.receive_gift(&VillagerId::player(), &gift, 1).unwrap();
        assert_eq!(reaction.points, 22);
        assert!(reaction.message.contains("gasps"));
        assert_eq!(reaction.tier, FriendshipTier::Acquaintance);
        assert!(reaction.tier_changed);
    }

    #[test]
    fn disliked_gifts_are_floored() {
        let mut villager = Villager {
            personality: Personality::Grumpy,
            ..fern()
        };
        let gift = Gift::new("Wilted Daisy", GiftCategory::Flower, 5);
        let reaction = villager.receive_gift(&VillagerId::player(), &gift, 1).unwrap();
        assert_eq!(reaction.points, -5);
        assert!(reaction.message.contains("frowns"));
        assert_eq!(villager.points_toward(&VillagerId::player()), 0);
    }

    #[test]
    fn bad_gift_cannot_drop_a_tier() {
        let mut villager = Villager {
            personality: Personality::Grumpy,
            ..fern()
        };
        let player = VillagerId::player();
        villager.friendships.insert(
            player.clone(),
            Friendship {
                points: 52,
                ..Friendship::default()
            },
        );
        let gift = Gift::new("Daisy Chain", GiftCategory::Flower, 5);
        villager.receive_gift(&player, &gift, 3).unwrap();
        assert_eq!(villager.points_toward(&player), 50);
        assert_eq!(villager.tier_toward(&player), FriendshipTier::Friend);
    }

    #[test]
    fn invalid_quality_changes_nothing() {
        let mut villager = fern();
        let before = villager.clone();
        let gift = Gift::new("Book", GiftCategory::Book, 9);
        assert_eq!(
            villager.receive_gift(&VillagerId::player(), &gift, 1),
            Err(AgentError::InvalidQuality(9))
        );
        assert_eq!(villager, before);
    }

    #[test]
    fn untended_friendships_decay_to_the_tier_floor() {
        let mut villager = fern();
        let lily = VillagerId::new("lily");
        villager.friendships.insert(
            lily.clone(),
            Friendship {
                points: 21,
                ..Friendship::default()
            },
        );
        for _ in 0..5 {
            villager.start_day();
            villager.decay_friendships();
        }
        assert_eq!(villager.points_toward(&lily), 20);
    }

    #[test]
    fn favourite_categories() {
        assert_eq!(favourite_category(Personality::Scholarly), GiftCategory::Book);
        assert_eq!(favourite_category(Personality::Grumpy), GiftCategory::Tool);
        assert_eq!(favourite_category(Personality::Nurturing), GiftCategory::Flower);
    }

    #[test]
    fn memory_is_bounded() {
        let mut villager = fern();
        for day in 0..100 {
            villager.remember(day, "walked by the pond", 1);
        }
        assert_eq!(villager.memories.len(), MEMORY_LIMIT);
        assert_eq!(villager.recall_recent(1).first().unwrap().day, 99);
    }

    #[test]
    fn dialogue_falls_back_by_mood() {
        let mut rng = StdRng::seed_from_u64(4);
        let villager = Villager {
            mood: Mood::Upset,
            ..fern()
        };
        assert_eq!(
            villager.dialogue(&mut rng),
            "Fern: \"I'd rather be on my own right now.\""
        );
    }
}
