//! The adoption pool and every adopted pet.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use willowbrook_types::{PetActivity, PetPersonality, PetWeather, Season, Species, VillagerId, WeatherState};

use crate::directory::VillagerSighting;
use crate::error::AgentError;
use crate::pet::{FoundItem, Pet, weather_dislike_line, weather_love_line, greeting_line};

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Tunable constants for pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetTuning {
    /// How many times a pet can be petted in a day.
    pub daily_pet_cap: u32,
}

impl Default for PetTuning {
    fn default() -> Self {
        Self { daily_pet_cap: 3 }
    }
}

// ---------------------------------------------------------------------------
// Adoption pool
// ---------------------------------------------------------------------------

/// An animal waiting for a home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoptable {
    /// The name the shelter gave it.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Temperament.
    pub personality: PetPersonality,
    /// A short biography.
    pub bio: String,
}

/// The animals available when a game starts.
pub fn starting_pool() -> Vec<Adoptable> {
    [
        (
            "Whiskers",
            Species::Cat,
            PetPersonality::Lazy,
            "Found asleep on the library windowsill. Likes fish and laps.",
        ),
        (
            "Biscuit",
            Species::Dog,
            PetPersonality::Loyal,
            "A scruffy golden pup who waited by the village gate for days.",
        ),
        (
            "Clover",
            Species::Rabbit,
            PetPersonality::Curious,
            "Turned up in the garden one spring morning. Adores dandelions.",
        ),
        (
            "Archimedes",
            Species::Owl,
            PetPersonality::Gentle,
            "Roosts in the oak by the library and seems to read over shoulders.",
        ),
        (
            "Russet",
            Species::Fox,
            PetPersonality::Mischievous,
            "Steals socks off washing lines. Impossible not to forgive.",
        ),
        (
            "Bramble",
            Species::Hedgehog,
            PetPersonality::Gentle,
            "Found curled up among the chamomile.",
        ),
    ]
    .into_iter()
    .map(|(name, species, personality, bio)| Adoptable {
        name: name.to_owned(),
        species,
        personality,
        bio: bio.to_owned(),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Daily output
// ---------------------------------------------------------------------------

/// A pet said hello to a villager, warming the villager toward the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetGreeting {
    /// The pet.
    pub pet: String,
    /// The villager it greeted.
    pub villager: VillagerId,
    /// Friendship points the villager gains toward the player.
    pub friendship_bonus: u32,
}

/// A find, credited to the pet that made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    /// The pet.
    pub pet: String,
    /// What it found.
    pub item: FoundItem,
}

/// Everything the pets did in one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDay {
    /// Narration, in pet order.
    pub events: Vec<String>,
    /// New finds.
    pub discoveries: Vec<Discovery>,
    /// Greetings the villager directory should apply.
    pub greetings: Vec<PetGreeting>,
}

// ---------------------------------------------------------------------------
// PetRegistry
// ---------------------------------------------------------------------------

/// Adopted pets in adoption order, plus those still waiting for a home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRegistry {
    tuning: PetTuning,
    pool: Vec<Adoptable>,
    pets: Vec<Pet>,
}

impl Default for PetRegistry {
    fn default() -> Self {
        Self::new(PetTuning::default())
    }
}

impl PetRegistry {
    /// A registry with the full adoption pool and no pets.
    pub fn new(tuning: PetTuning) -> Self {
        Self {
            tuning,
            pool: starting_pool(),
            pets: Vec::new(),
        }
    }

    /// Animals still waiting for a home.
    pub fn adoptable(&self) -> &[Adoptable] {
        &self.pool
    }

    /// Adopted pets in adoption order.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Look up a pet by name, ignoring case.
    pub fn pet(&self, name: &str) -> Result<&Pet, AgentError> {
        self.pets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AgentError::UnknownPet(name.to_owned()))
    }

    fn pet_mut(&mut self, name: &str) -> Result<&mut Pet, AgentError> {
        self.pets
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AgentError::UnknownPet(name.to_owned()))
    }

    /// Every find of every pet, oldest first per pet.
    pub fn all_found_items(&self) -> impl Iterator<Item = (&str, &FoundItem)> {
        self.pets
            .iter()
            .flat_map(|p| p.found_items.iter().map(move |item| (p.name.as_str(), item)))
    }

    /// Adopt the pool animal with this species and personality under a new name.
    pub fn adopt(
        &mut self,
        name: &str,
        species: Species,
        personality: PetPersonality,
    ) -> Result<&Pet, AgentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AgentError::EmptyName);
        }
        if self.pets.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(AgentError::NameTaken(name.to_owned()));
        }
        let index = self
            .pool
            .iter()
            .position(|a| a.species == species && a.personality == personality)
            .ok_or(AgentError::NotAdoptable {
                species,
                personality,
            })?;
        self.pool.remove(index);
        info!(pet = name, species = %species, personality = %personality, "Pet adopted");
        self.pets.push(Pet::new(name, species, personality));
        self.pets.last().ok_or_else(|| AgentError::UnknownPet(name.to_owned()))
    }

    /// Give a pet some affection.
    pub fn pet_animal(&mut self, name: &str) -> Result<String, AgentError> {
        let cap = self.tuning.daily_pet_cap;
        self.pet_mut(name)?.pet(cap)
    }

    /// Feed a pet.
    pub fn feed(&mut self, name: &str) -> Result<String, AgentError> {
        self.pet_mut(name)?.feed()
    }

    /// Play with a pet.
    pub fn play(&mut self, name: &str) -> Result<String, AgentError> {
        self.pet_mut(name)?.play()
    }

    /// Run one day for every pet.
    ///
    /// `sightings` is the villager directory's finalized snapshot for the
    /// day; a pet whose haunt matches a villager's home or afternoon spot
    /// goes to say hello.
    pub fn advance_day(
        &mut self,
        day: u64,
        season: Season,
        weather: &WeatherState,
        sightings: &[VillagerSighting],
        rng: &mut impl Rng,
    ) -> Result<PetDay, AgentError> {
        if weather.season != season {
            return Err(AgentError::SeasonMismatch {
                day,
                expected: season,
                actual: weather.season,
            });
        }
        let pet_weather = PetWeather::from_sky(weather.sky);
        let mut out = PetDay::default();

        for pet in &mut self.pets {
            pet.start_day();
            pet.roll_mood(pet_weather, rng);
            let activity = pet.choose_activity(pet_weather);
            match activity {
                PetActivity::Sheltering => out
                    .events
                    .push(format!("{} {}", pet.name, weather_dislike_line(pet.species))),
                PetActivity::Playing => out
                    .events
                    .push(format!("{} {}", pet.name, weather_love_line(pet.species))),
                _ => {}
            }
            if activity == PetActivity::Sheltering {
                continue;
            }

            if let Some(item) = pet.forage(day, season, pet_weather, rng) {
                out.events.push(format!("{} found a {item}", pet.name));
                out.discoveries.push(Discovery {
                    pet: pet.name.clone(),
                    item,
                });
            }

            let haunt = pet.profile().haunt;
            let nearby: Vec<&VillagerSighting> = sightings
                .iter()
                .filter(|s| s.spot == haunt || s.home == haunt)
                .collect();
            if nearby.is_empty() {
                continue;
            }
            let Some(villager) = nearby.get(rng.random_range(0..nearby.len())) else {
                continue;
            };
            let friendship_bonus = match pet.species {
                Species::Dog => 3,
                Species::Cat => u32::from(rng.random::<f64>() < 0.7),
                _ => 1,
            };
            pet.activity = PetActivity::Greeting;
            pet.bond_points = pet.bond_points.saturating_add(1);
            pet.mood = pet.mood.shift(1);
            out.events
                .push(greeting_line(pet.species, &pet.name, &villager.name));
            out.greetings.push(PetGreeting {
                pet: pet.name.clone(),
                villager: villager.id.clone(),
                friendship_bonus,
            });
        }

        debug!(
            day,
            pets = self.pets.len(),
            finds = out.discoveries.len(),
            greetings = out.greetings.len(),
            "Pet day complete"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use willowbrook_types::{
        BondTier, Calendar, ErrorKind, Location, Sky, VillageMood, WeatherStreak, WindDirection,
    };

    use super::*;

    fn weather(day: u64, sky: Sky) -> WeatherState {
        WeatherState {
            day,
            season: Calendar::default().season(day),
            sky,
            temperature_c: 15.0,
            feels_like_c: 15.0,
            humidity: 0.5,
            wind_kph: 5.0,
            wind_direction: WindDirection::S,
            severity: 0.1,
            is_magical: false,
            magical_event: None,
            festivals: Vec::new(),
            village_mood: VillageMood::Content,
            streak: WeatherStreak { sky, days: 1 },
            description: String::new(),
        }
    }

    fn plaza_regular() -> VillagerSighting {
        VillagerSighting {
            id: VillagerId::new("lily"),
            name: "Lily".to_owned(),
            home: Location::RosewoodCottage,
            spot: Location::TownPlaza,
        }
    }

    #[test]
    fn adoption_takes_from_the_pool() {
        let mut registry = PetRegistry::default();
        let pet = registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
        assert_eq!(pet.bond_tier(), BondTier::Stranger);
        assert_eq!(registry.adoptable().len(), 5);

        let err = registry
            .adopt("Rover", Species::Dog, PetPersonality::Loyal)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn names_are_unique() {
        let mut registry = PetRegistry::default();
        registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
        let err = registry
            .adopt("biscuit", Species::Cat, PetPersonality::Lazy)
            .unwrap_err();
        assert_eq!(err, AgentError::NameTaken("biscuit".to_owned()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(registry.adoptable().len(), 5);
        assert_eq!(registry.adopt("  ", Species::Cat, PetPersonality::Lazy), Err(AgentError::EmptyName));
    }

    #[test]
    fn feeding_every_day_builds_the_bond() {
        let mut registry = PetRegistry::default();
        let mut rng = StdRng::seed_from_u64(42);
        registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();

        let mut previous = 0;
        for day in 1..=10 {
            registry
                .advance_day(day, Season::Spring, &weather(day, Sky::Overcast), &[], &mut rng)
                .unwrap();
            registry.feed("Biscuit").unwrap();
            let points = registry.pet("Biscuit").unwrap().bond_points;
            assert!(points > previous);
            previous = points;
        }
        assert!(registry.pet("Biscuit").unwrap().bond_tier() >= BondTier::Familiar);
    }

    #[test]
    fn unknown_pets_are_rejected() {
        let mut registry = PetRegistry::default();
        assert_eq!(registry.feed("Ghost"), Err(AgentError::UnknownPet("Ghost".to_owned())));
    }

    #[test]
    fn dogs_greet_villagers_at_the_plaza() {
        let mut registry = PetRegistry::default();
        let mut rng = StdRng::seed_from_u64(1);
        registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
        let day = registry
            .advance_day(1, Season::Spring, &weather(1, Sky::Overcast), &[plaza_regular()], &mut rng)
            .unwrap();
        assert_eq!(
            day.greetings,
            vec![PetGreeting {
                pet: "Biscuit".to_owned(),
                villager: VillagerId::new("lily"),
                friendship_bonus: 3,
            }]
        );
    }

    #[test]
    fn greetings_lift_mood_and_bond() {
        let run = |sightings: &[VillagerSighting]| {
            let mut registry = PetRegistry::default();
            let mut rng = StdRng::seed_from_u64(9);
            registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
            registry
                .advance_day(1, Season::Spring, &weather(1, Sky::Overcast), sightings, &mut rng)
                .unwrap();
            registry.pet("Biscuit").unwrap().clone()
        };
        let alone = run(&[]);
        let greeted = run(&[plaza_regular()]);

        assert_eq!(greeted.bond_points, alone.bond_points.saturating_add(1));
        assert_eq!(greeted.mood, alone.mood.shift(1));
        assert_eq!(greeted.activity, PetActivity::Greeting);
    }

    #[test]
    fn an_untended_day_leaves_pets_tired() {
        let mut registry = PetRegistry::default();
        let mut rng = StdRng::seed_from_u64(2);
        registry.adopt("Whiskers", Species::Cat, PetPersonality::Lazy).unwrap();
        let mut last = registry.pet("Whiskers").unwrap().energy;
        for day in 1..=5 {
            registry
                .advance_day(day, Season::Spring, &weather(day, Sky::Overcast), &[], &mut rng)
                .unwrap();
            let energy = registry.pet("Whiskers").unwrap().energy;
            assert!(energy < last);
            last = energy;
        }
    }

    #[test]
    fn sheltering_pets_stay_in() {
        let mut registry = PetRegistry::default();
        let mut rng = StdRng::seed_from_u64(4);
        registry.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
        let day = registry
            .advance_day(1, Season::Spring, &weather(1, Sky::Thunderstorm), &[plaza_regular()], &mut rng)
            .unwrap();
        assert!(day.greetings.is_empty());
        assert!(day.discoveries.is_empty());
        assert_eq!(registry.pet("Biscuit").unwrap().activity, PetActivity::Sheltering);
    }

    #[test]
    fn pets_serialize_with_readable_enums() {
        let mut registry = PetRegistry::default();
        registry.adopt("Russet", Species::Fox, PetPersonality::Mischievous).unwrap();
        let json = serde_json::to_value(registry.pet("Russet").unwrap()).unwrap();
        assert_eq!(json["species"], "fox");
        assert_eq!(json["personality"], "mischievous");
        assert_eq!(json["bond_points"], 0);
    }

    #[test]
    fn season_must_match_the_weather() {
        let mut registry = PetRegistry::default();
        let mut rng = StdRng::seed_from_u64(4);
        let err = registry
            .advance_day(1, Season::Winter, &weather(1, Sky::Clear), &[], &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }
}
