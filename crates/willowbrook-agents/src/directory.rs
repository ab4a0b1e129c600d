//! The village roster and its daily routine.
//!
//! [`VillagerDirectory::advance_day`] runs one full day for every villager:
//! fresh moods nudged by the weather, birthday gifts, five schedule slots
//! with chance encounters between villagers who share a spot, and the
//! evening decay of friendships nobody tended.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use willowbrook_types::{
    Calendar, FriendshipTier, GiftCategory, Location, Mood, Personality, TimeOfDay, VillagerId,
    WeatherState,
};

use crate::error::AgentError;
use crate::roster::{founding_villagers, resolve_slot};
use crate::social::{Outcome, are_compatible, interaction_rule};
use crate::villager::{Friendship, Gift, GiftReaction, MAX_ENERGY, Villager, Whereabouts, favourite_category};

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Tunable constants for villager life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillagerTuning {
    /// Base chance that two villagers sharing a spot start talking.
    pub encounter_chance: f64,
    /// Conversations a pair may hold in one day.
    pub conversation_cap: u32,
    /// Chance that a friend brings a birthday gift.
    pub birthday_gift_chance: f64,
}

impl Default for VillagerTuning {
    fn default() -> Self {
        Self {
            encounter_chance: 0.4,
            conversation_cap: 3,
            birthday_gift_chance: 0.5,
        }
    }
}

/// Energy regained overnight.
const NIGHT_RECOVERY: u32 = 40;

/// Quality of a spontaneous birthday gift.
const BIRTHDAY_GIFT_QUALITY: u8 = 3;

/// A typical present in each category, used for birthday gifts.
const fn birthday_present(category: GiftCategory) -> &'static str {
    match category {
        GiftCategory::Flower => "Wildflower Posy",
        GiftCategory::Food => "Honey Cake",
        GiftCategory::Handmade => "Knitted Scarf",
        GiftCategory::Book => "Pocket Almanac",
        GiftCategory::Tool => "Brass Trowel",
        GiftCategory::Gemstone => "Polished Amethyst",
        GiftCategory::Fish => "Smoked Trout",
        GiftCategory::Foraged => "Basket of Chanterelles",
    }
}

// ---------------------------------------------------------------------------
// Read-only views
// ---------------------------------------------------------------------------

/// Where a villager spent the afternoon, for other subsystems to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillagerSighting {
    /// Villager key.
    pub id: VillagerId,
    /// Display name.
    pub name: String,
    /// Their home.
    pub home: Location,
    /// Their afternoon spot.
    pub spot: Location,
}

/// A compact view of a villager for status screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillagerSummary {
    /// Villager key.
    pub id: VillagerId,
    /// Display name.
    pub name: String,
    /// Temperament.
    pub personality: Personality,
    /// Today's mood.
    pub mood: Mood,
    /// Remaining energy.
    pub energy: u32,
    /// Current location.
    pub location: Location,
    /// Current activity.
    pub activity: String,
    /// Friendship points toward the player.
    pub player_points: u32,
    /// Friendship tier toward the player.
    pub player_tier: FriendshipTier,
}

// ---------------------------------------------------------------------------
// VillagerDirectory
// ---------------------------------------------------------------------------

/// Every villager, in roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillagerDirectory {
    calendar: Calendar,
    tuning: VillagerTuning,
    villagers: Vec<Villager>,
    /// Afternoon spots of the last advanced day.
    sightings: Vec<VillagerSighting>,
    last_day: u64,
}

impl Default for VillagerDirectory {
    fn default() -> Self {
        Self::new(Calendar::default(), VillagerTuning::default())
    }
}

impl VillagerDirectory {
    /// A directory holding the founding villagers.
    pub fn new(calendar: Calendar, tuning: VillagerTuning) -> Self {
        Self::with_villagers(calendar, tuning, founding_villagers())
    }

    /// A directory holding a custom roster.
    pub const fn with_villagers(
        calendar: Calendar,
        tuning: VillagerTuning,
        villagers: Vec<Villager>,
    ) -> Self {
        Self {
            calendar,
            tuning,
            villagers,
            sightings: Vec::new(),
            last_day: 0,
        }
    }

    // -- Queries ------------------------------------------------------------

    /// All villagers in roster order.
    pub fn villagers(&self) -> &[Villager] {
        &self.villagers
    }

    /// Look up a villager.
    pub fn villager(&self, id: &VillagerId) -> Result<&Villager, AgentError> {
        self.villagers
            .iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| AgentError::UnknownVillager(id.clone()))
    }

    fn villager_mut(&mut self, id: &VillagerId) -> Result<&mut Villager, AgentError> {
        self.villagers
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| AgentError::UnknownVillager(id.clone()))
    }

    /// The last day advanced, 0 before the first.
    pub const fn last_day(&self) -> u64 {
        self.last_day
    }

    /// Where everyone spent the afternoon of the last advanced day. Before
    /// the first day everyone is at home.
    pub fn locations(&self) -> Vec<VillagerSighting> {
        if !self.sightings.is_empty() {
            return self.sightings.clone();
        }
        self.villagers.iter().map(|v| sighting(v, v.home)).collect()
    }

    /// Status view of every villager.
    pub fn summaries(&self) -> Vec<VillagerSummary> {
        let player = VillagerId::player();
        self.villagers
            .iter()
            .map(|v| VillagerSummary {
                id: v.id.clone(),
                name: v.name.clone(),
                personality: v.personality,
                mood: v.mood,
                energy: v.energy,
                location: v.whereabouts.location,
                activity: v.whereabouts.activity.clone(),
                player_points: v.points_toward(&player),
                player_tier: v.tier_toward(&player),
            })
            .collect()
    }

    /// One line per known pair, e.g. `Lily <-> Hazel: 12 pts (stranger)`.
    ///
    /// Each pair appears once, described from the side of whoever comes
    /// first in the roster. Friendships with the player are listed too.
    pub fn friendship_report(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (index, villager) in self.villagers.iter().enumerate() {
            for (other, record) in &villager.friendships {
                let earlier = self
                    .villagers
                    .iter()
                    .take(index)
                    .any(|v| &v.id == other);
                if earlier {
                    continue;
                }
                let other_name = self
                    .villagers
                    .iter()
                    .find(|v| &v.id == other)
                    .map_or_else(|| other.to_string(), |v| v.name.clone());
                lines.push(format!(
                    "{} <-> {other_name}: {} pts ({})",
                    villager.name,
                    record.points,
                    record.tier()
                ));
            }
        }
        lines
    }

    /// Friendship points other villagers and the player hold toward `id`.
    fn incoming_points(&self, id: &VillagerId) -> u64 {
        self.villagers
            .iter()
            .map(|v| u64::from(v.points_toward(id)))
            .sum()
    }

    /// The villager everyone likes most, or `None` if nobody has any
    /// friendship points yet. Ties go to the earlier roster entry.
    pub fn most_popular(&self) -> Option<&Villager> {
        let mut best: Option<(&Villager, u64)> = None;
        for villager in &self.villagers {
            let score = self.incoming_points(&villager.id);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((villager, score));
            }
        }
        best.map(|(villager, _)| villager)
    }

    /// The villager with the fewest incoming friendship points. Ties go to
    /// the earlier roster entry.
    pub fn loneliest(&self) -> Option<&Villager> {
        let mut worst: Option<(&Villager, u64)> = None;
        for villager in &self.villagers {
            let score = self.incoming_points(&villager.id);
            if worst.is_none_or(|(_, s)| score < s) {
                worst = Some((villager, score));
            }
        }
        worst.map(|(villager, _)| villager)
    }

    /// Something the villager might say right now.
    pub fn dialogue(&self, id: &VillagerId, rng: &mut impl Rng) -> Result<String, AgentError> {
        Ok(self.villager(id)?.dialogue(rng))
    }

    // -- Player interactions ----------------------------------------------------

    /// Give a gift to a villager. Nothing changes if the villager or the
    /// gift's quality is invalid.
    pub fn give_gift(
        &mut self,
        to: &VillagerId,
        gift: &Gift,
        from: &VillagerId,
        day: u64,
    ) -> Result<GiftReaction, AgentError> {
        let villager = self.villager_mut(to)?;
        let reaction = villager.receive_gift(from, gift, day)?;
        debug!(
            villager = %to,
            gift = %gift.name,
            points = reaction.points,
            tier = %reaction.tier,
            "Gift received"
        );
        Ok(reaction)
    }

    /// A pet belonging to the player stopped by to say hello.
    pub fn receive_pet_greeting(
        &mut self,
        id: &VillagerId,
        pet_name: &str,
        friendship_bonus: u32,
        day: u64,
    ) -> Result<(), AgentError> {
        let villager = self.villager_mut(id)?;
        villager.adjust_mood(1);
        let record = villager.friendships.entry(VillagerId::player()).or_default();
        record.adjust(i32::try_from(friendship_bonus).unwrap_or(i32::MAX));
        record.interacted_today = true;
        villager.remember(day, format!("{pet_name} came by to say hello"), 1);
        Ok(())
    }

    // -- Daily advance ------------------------------------------------------

    /// Run one full day for every villager and return the narration.
    pub fn advance_day(
        &mut self,
        day: u64,
        weather: &WeatherState,
        rng: &mut impl Rng,
    ) -> Result<Vec<String>, AgentError> {
        let expected = self.calendar.season(day);
        if expected != weather.season {
            return Err(AgentError::SeasonMismatch {
                day,
                expected,
                actual: weather.season,
            });
        }

        let mut events = Vec::new();

        for villager in &mut self.villagers {
            villager.start_day();
            villager.roll_mood(rng);
            if weather.sky.is_stormy() && villager.personality != Personality::Adventurous {
                villager.adjust_mood(-1);
            }
            if weather.is_magical {
                villager.adjust_mood(1);
            }
        }

        self.celebrate_birthdays(day, rng, &mut events);

        for slot in TimeOfDay::ALL {
            self.move_everyone(weather, slot, rng);
            if slot == TimeOfDay::Afternoon {
                events.extend(self.villagers.iter().map(|v| {
                    format!(
                        "{} spent the afternoon {} at {}.",
                        v.name, v.whereabouts.activity, v.whereabouts.location
                    )
                }));
                self.sightings = self
                    .villagers
                    .iter()
                    .map(|v| sighting(v, v.whereabouts.location))
                    .collect();
            }
            self.run_encounters(day, slot, rng, &mut events);
        }

        for villager in &mut self.villagers {
            villager.decay_friendships();
        }
        self.last_day = day;

        debug!(day, events = events.len(), "Villager day complete");
        Ok(events)
    }

    /// Friends at friend tier or above may bring the birthday villager a gift.
    fn celebrate_birthdays(&mut self, day: u64, rng: &mut impl Rng, events: &mut Vec<String>) {
        let season = self.calendar.season(day);
        let day_of_season = self.calendar.day_of_season(day);

        for index in 0..self.villagers.len() {
            let Some(birthday) = self.villagers.get(index) else {
                continue;
            };
            if !birthday.is_birthday(season, day_of_season) {
                continue;
            }
            let birthday_id = birthday.id.clone();
            let birthday_name = birthday.name.clone();
            let category = favourite_category(birthday.personality);
            events.push(format!("Today is {birthday_name}'s birthday!"));

            let friends: Vec<(VillagerId, String)> = self
                .villagers
                .iter()
                .filter(|v| {
                    v.id != birthday_id && v.tier_toward(&birthday_id) >= FriendshipTier::Friend
                })
                .map(|v| (v.id.clone(), v.name.clone()))
                .collect();

            for (friend_id, friend_name) in friends {
                if rng.random::<f64>() >= self.tuning.birthday_gift_chance {
                    continue;
                }
                let gift = Gift::new(birthday_present(category), category, BIRTHDAY_GIFT_QUALITY);
                let Some(recipient) = self.villagers.get_mut(index) else {
                    continue;
                };
                if let Ok(reaction) = recipient.receive_gift(&friend_id, &gift, day) {
                    events.push(format!(
                        "{friend_name} brings {birthday_name} a {} for the birthday. {}",
                        gift.name, reaction.message
                    ));
                }
            }
        }
    }

    /// Send everyone to their scheduled spot for `slot`.
    fn move_everyone(&mut self, weather: &WeatherState, slot: TimeOfDay, rng: &mut impl Rng) {
        for villager in &mut self.villagers {
            let (location, activity) = resolve_slot(
                villager.personality,
                villager.home,
                weather.season,
                slot,
                weather.sky,
            );
            villager.whereabouts = Whereabouts {
                slot,
                location,
                activity,
            };
            villager.energy = if slot == TimeOfDay::Night {
                villager.energy.saturating_add(NIGHT_RECOVERY).min(MAX_ENERGY)
            } else {
                villager.energy.saturating_sub(rng.random_range(5..=15))
            };
        }
    }

    /// Let every pair sharing a spot maybe talk.
    fn run_encounters(
        &mut self,
        day: u64,
        slot: TimeOfDay,
        rng: &mut impl Rng,
        events: &mut Vec<String>,
    ) {
        let count = self.villagers.len();
        for i in 0..count {
            for j in i.saturating_add(1)..count {
                let Some((a, b)) = pair_mut(&mut self.villagers, i, j) else {
                    continue;
                };
                if a.whereabouts.location != b.whereabouts.location {
                    continue;
                }
                let talked = a
                    .friendships
                    .get(&b.id)
                    .map_or(0, |f| f.conversations_today);
                if talked >= self.tuning.conversation_cap {
                    continue;
                }
                let rule = interaction_rule(a.personality, b.personality);
                if !rule.encounters(self.tuning.encounter_chance, rng) {
                    continue;
                }
                let line = converse(a, b, day, rule.roll_outcome(rng), rng);
                events.push(format!("[{}] {line}", capitalize_slot(slot)));
            }
        }
    }
}

fn sighting(villager: &Villager, spot: Location) -> VillagerSighting {
    VillagerSighting {
        id: villager.id.clone(),
        name: villager.name.clone(),
        home: villager.home,
        spot,
    }
}

/// Hold one conversation between `a` (who speaks first) and `b`.
fn converse(
    a: &mut Villager,
    b: &mut Villager,
    day: u64,
    outcome: Outcome,
    rng: &mut impl Rng,
) -> String {
    let place = a.whereabouts.location;
    let first_meeting = !a.friendships.contains_key(&b.id) && !b.friendships.contains_key(&a.id);

    let points = outcome.points(are_compatible(a.personality, b.personality), a.mood, b.mood);
    let (a_id, b_id) = (a.id.clone(), b.id.clone());
    for (me, them) in [(&mut *a, b_id), (&mut *b, a_id)] {
        let record: &mut Friendship = me.friendships.entry(them).or_default();
        record.conversations_today = record.conversations_today.saturating_add(1);
        record.interacted_today = true;
        if !first_meeting {
            record.adjust(points);
        }
    }

    a.adjust_mood(outcome.mood_delta());
    b.adjust_mood(outcome.mood_delta());

    if first_meeting {
        a.remember(day, format!("Met {} at {place}", b.name), 1);
        b.remember(day, format!("Met {} at {place}", a.name), 1);
        return format!("{} met {} for the first time at {place}.", a.name, b.name);
    }

    a.remember(day, format!("Talked with {} at {place}", b.name), outcome.sentiment());
    b.remember(day, format!("Talked with {} at {place}", a.name), outcome.sentiment());

    format!(
        "{} {} {} at {place}. {}",
        a.name,
        outcome.verb(),
        b.name,
        a.dialogue(rng)
    )
}

/// Borrow two distinct villagers mutably, `i < j`.
fn pair_mut(villagers: &mut [Villager], i: usize, j: usize) -> Option<(&mut Villager, &mut Villager)> {
    let (left, right) = villagers.split_at_mut_checked(j)?;
    Some((left.get_mut(i)?, right.first_mut()?))
}

const fn capitalize_slot(slot: TimeOfDay) -> &'static str {
    match slot {
        TimeOfDay::Dawn => "Dawn",
        TimeOfDay::Morning => "Morning",
        TimeOfDay::Afternoon => "Afternoon",
        TimeOfDay::Evening => "Evening",
        TimeOfDay::Night => "Night",
    }
}
