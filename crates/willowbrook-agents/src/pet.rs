//! Pet companions: species profiles, foraging, and care actions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use willowbrook_types::{
    BOND_LADDER, BondTier, Location, PetActivity, PetMood, PetPersonality, PetWeather, Rarity,
    Season, Species,
};
use willowbrook_world::WeightedTable;

use crate::error::AgentError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Full energy.
pub const MAX_PET_ENERGY: u32 = 100;

/// Energy lost overnight. Only feeding brings it back.
pub const DAILY_ENERGY_DECAY: u32 = 10;

/// Energy a meal restores.
const FEED_ENERGY: u32 = 30;

/// Energy a play session costs.
pub const PLAY_COST: u32 = 15;

/// Energy a forage attempt costs.
pub const FORAGE_COST: u32 = 10;

// ---------------------------------------------------------------------------
// Species profiles
// ---------------------------------------------------------------------------

/// A kind of thing a pet can dig up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForageCategory {
    /// Pond fish.
    Fish,
    /// Pretty stones.
    Gemstone,
    /// Lost odds and ends.
    Trinket,
    /// Sticks.
    Stick,
    /// Bones.
    Bone,
    /// Nuts and seeds.
    Foraged,
    /// Wild herbs.
    Herb,
    /// Wildflowers.
    Flower,
    /// Wild vegetables.
    Vegetable,
    /// Old books and pages.
    RareBook,
    /// Feathers.
    Feather,
    /// Old coins.
    AncientCoin,
    /// Mushrooms.
    Mushroom,
    /// Relics of the old kingdom.
    RareArtifact,
    /// Wild berries.
    Berry,
}

impl ForageCategory {
    /// Whether anything in this category can turn up today.
    pub const fn available(self, season: Season, weather: PetWeather) -> bool {
        match self {
            Self::Flower | Self::Herb | Self::Vegetable | Self::Berry => {
                !matches!(season, Season::Winter)
            }
            Self::Fish => !matches!(weather, PetWeather::Frost),
            Self::Mushroom => {
                matches!(season, Season::Spring | Season::Autumn)
                    || matches!(weather, PetWeather::Rainy | PetWeather::Foggy)
            }
            Self::Gemstone
            | Self::Trinket
            | Self::Stick
            | Self::Bone
            | Self::Foraged
            | Self::RareBook
            | Self::Feather
            | Self::AncientCoin
            | Self::RareArtifact => true,
        }
    }

    /// The common, uncommon and rare finds of this category.
    const fn items(self) -> [(&'static str, &'static str); 3] {
        match self {
            Self::Fish => [
                ("Small Trout", "Still flapping."),
                ("Silver Perch", "Its scales flash like coins."),
                ("Golden Koi", "Said to bring a year of luck."),
            ],
            Self::Gemstone => [
                ("Quartz Pebble", "Milky and smooth from the stream."),
                ("Amethyst Shard", "A sliver of violet crystal."),
                ("Star Sapphire", "A six-rayed star hides inside."),
            ],
            Self::Trinket => [
                ("Old Button", "Brass, with a little anchor on it."),
                ("Glass Marble", "Green and gold swirls."),
                ("Tiny Music Box", "It still plays half a lullaby."),
            ],
            Self::Stick => [
                ("Ordinary Stick", "Objectively the finest stick."),
                ("Gnarled Branch", "Twisted like a wizard's staff."),
                ("Petrified Twig", "Wood that turned to stone long ago."),
            ],
            Self::Bone => [
                ("Old Bone", "Best not to ask whose."),
                ("Carved Bone", "Covered in tiny scratched runes."),
                ("Dragon Tooth", "Much too big for anything living nearby."),
            ],
            Self::Foraged => [
                ("Acorn", "Glossy and brown."),
                ("Four-Leaf Clover", "Lucky!"),
                ("Ancient Seed", "Warm, and it hums a little."),
            ],
            Self::Herb => [
                ("Wild Mint", "Sharp and fresh."),
                ("Healing Herb", "The leaves shimmer faintly."),
                ("Moonpetal Sprig", "Glows softly after dusk."),
            ],
            Self::Flower => [
                ("Daisy", "Plain and happy."),
                ("Wild Orchid", "Delicate purple petals."),
                ("Enchanted Rose", "It never wilts."),
            ],
            Self::Vegetable => [
                ("Wild Carrot", "Small and crunchy."),
                ("Golden Turnip", "Oddly shiny for a turnip."),
                ("Fairy Radish", "Sparkles in the light."),
            ],
            Self::RareBook => [
                ("Torn Page", "Half a recipe for plum jam."),
                ("Leather Journal", "Someone's careful bird notes."),
                ("Enchanted Tome", "The pages turn on their own."),
            ],
            Self::Feather => [
                ("Grey Feather", "Soft as smoke."),
                ("Owl Plume", "Barred brown and cream."),
                ("Phoenix Feather", "Warm to the touch."),
            ],
            Self::AncientCoin => [
                ("Copper Penny", "Green with age."),
                ("Silver Ducat", "An old trading coin."),
                ("Golden Relic Coin", "Stamped with a forgotten king."),
            ],
            Self::Mushroom => [
                ("Button Mushroom", "Round and cheerful."),
                ("Chanterelle", "Golden and fragrant."),
                ("Starlight Truffle", "Speckled with glowing dots."),
            ],
            Self::RareArtifact => [
                ("Rusted Key", "It opens something, somewhere."),
                ("Crystal Compass", "The needle points at magic."),
                ("Ancient Amulet", "Hums with old power."),
            ],
            Self::Berry => [
                ("Wild Raspberry", "Tart and sweet."),
                ("Elderberry Cluster", "Almost black."),
                ("Shimmer Berry", "Translucent and faintly glowing."),
            ],
        }
    }
}

/// Static facts about a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesProfile {
    /// Flavour text.
    pub description: &'static str,
    /// Weather that cheers it up.
    pub favourite_weather: PetWeather,
    /// Weather that sends it into hiding.
    pub disliked_weather: PetWeather,
    /// Season it forages best in.
    pub favourite_season: Season,
    /// What it tends to find.
    pub forage_categories: &'static [ForageCategory],
    /// Base forage chance in percent.
    pub base_forage_percent: u32,
    /// The part of the village it likes to wander.
    pub haunt: Location,
}

impl SpeciesProfile {
    /// Base chance of finding something on a forage attempt.
    pub fn base_forage_chance(&self) -> f64 {
        f64::from(self.base_forage_percent) / 100.0
    }
}

/// The profile of a species.
pub const fn species_profile(species: Species) -> SpeciesProfile {
    use ForageCategory as F;
    match species {
        Species::Cat => SpeciesProfile {
            description: "Independent and graceful, always finds the warmest spot.",
            favourite_weather: PetWeather::Sunny,
            disliked_weather: PetWeather::Rainy,
            favourite_season: Season::Summer,
            forage_categories: &[F::Fish, F::Gemstone, F::Trinket],
            base_forage_percent: 35,
            haunt: Location::DustyTome,
        },
        Species::Dog => SpeciesProfile {
            description: "Loyal and friendly, overjoyed to see anyone at all.",
            favourite_weather: PetWeather::Sunny,
            disliked_weather: PetWeather::Stormy,
            favourite_season: Season::Autumn,
            forage_categories: &[F::Stick, F::Bone, F::Foraged],
            base_forage_percent: 45,
            haunt: Location::TownPlaza,
        },
        Species::Rabbit => SpeciesProfile {
            description: "Quick and curious, with the softest ears in the village.",
            favourite_weather: PetWeather::Sunny,
            disliked_weather: PetWeather::Stormy,
            favourite_season: Season::Spring,
            forage_categories: &[F::Herb, F::Flower, F::Vegetable],
            base_forage_percent: 40,
            haunt: Location::CommunityGarden,
        },
        Species::Owl => SpeciesProfile {
            description: "Wise and quiet, happiest in the mist.",
            favourite_weather: PetWeather::Foggy,
            disliked_weather: PetWeather::Stormy,
            favourite_season: Season::Autumn,
            forage_categories: &[F::RareBook, F::Feather, F::AncientCoin],
            base_forage_percent: 25,
            haunt: Location::DustyTome,
        },
        Species::Fox => SpeciesProfile {
            description: "Clever and sly, with a nose for hidden things.",
            favourite_weather: PetWeather::Foggy,
            disliked_weather: PetWeather::Frost,
            favourite_season: Season::Autumn,
            forage_categories: &[F::Gemstone, F::Mushroom, F::RareArtifact],
            base_forage_percent: 30,
            haunt: Location::WhisperingWoods,
        },
        Species::Hedgehog => SpeciesProfile {
            description: "Tiny and determined, forever pottering in the garden.",
            favourite_weather: PetWeather::Rainy,
            disliked_weather: PetWeather::Frost,
            favourite_season: Season::Spring,
            forage_categories: &[F::Mushroom, F::Herb, F::Berry],
            base_forage_percent: 40,
            haunt: Location::CommunityGarden,
        },
    }
}

/// Daily mood distribution for a pet personality, from ecstatic down to lonely.
const fn mood_weights(personality: PetPersonality) -> [(PetMood, f64); 5] {
    let [ecstatic, happy, content, restless, lonely] = match personality {
        PetPersonality::Playful => [0.30, 0.35, 0.20, 0.10, 0.05],
        PetPersonality::Lazy => [0.10, 0.20, 0.45, 0.05, 0.20],
        PetPersonality::Curious => [0.25, 0.30, 0.20, 0.20, 0.05],
        PetPersonality::Loyal => [0.20, 0.35, 0.25, 0.05, 0.15],
        PetPersonality::Mischievous => [0.25, 0.25, 0.15, 0.30, 0.05],
        PetPersonality::Gentle => [0.15, 0.30, 0.35, 0.05, 0.15],
    };
    [
        (PetMood::Ecstatic, ecstatic),
        (PetMood::Happy, happy),
        (PetMood::Content, content),
        (PetMood::Restless, restless),
        (PetMood::Lonely, lonely),
    ]
}

// ---------------------------------------------------------------------------
// Narration
// ---------------------------------------------------------------------------

const fn petting_lines(species: Species) -> [&'static str; 3] {
    match species {
        Species::Cat => [
            "purrs and bumps against your hand.",
            "rolls over to show a fluffy belly. It is a trap.",
            "gives you a slow blink.",
        ],
        Species::Dog => [
            "wags so hard the whole dog wiggles.",
            "licks your hand and gazes up at you.",
            "barks once, tail going like a windmill.",
        ],
        Species::Rabbit => [
            "does a happy little binky.",
            "nuzzles into your palm, nose twitching.",
            "flops over sideways, utterly relaxed.",
        ],
        Species::Owl => [
            "ruffles up and hoots softly.",
            "closes both eyes and leans into the scratches.",
            "tilts its head almost upside down, pleased.",
        ],
        Species::Fox => [
            "makes that chuckling noise foxes make.",
            "rolls belly-up in a patch of sun.",
            "nips your sleeve and darts away.",
        ],
        Species::Hedgehog => [
            "uncurls and sniffs your fingers.",
            "wiggles its tiny nose with delight.",
            "trundles a happy circle round your feet.",
        ],
    }
}

const fn play_lines(species: Species) -> [&'static str; 3] {
    match species {
        Species::Cat => [
            "stalks a bit of string with total focus.",
            "pounces on a crunchy leaf and wins.",
            "bats a ball of yarn under the dresser.",
        ],
        Species::Dog => [
            "fetches the stick and brings it back dripping.",
            "zooms round the garden in big loops.",
            "plays tug of war with a rope toy.",
        ],
        Species::Rabbit => [
            "hops through a little obstacle course.",
            "races through a tunnel of boxes.",
            "kicks up its heels in a mad sprint.",
        ],
        Species::Owl => [
            "swoops silently between perches.",
            "catches a tossed treat in mid-air.",
            "plays hide and seek among the bookshelves.",
        ],
        Species::Fox => [
            "pounces on a squeaky toy hidden in the grass.",
            "plays keep-away, always just out of reach.",
            "digs a pretend den in the blankets.",
        ],
        Species::Hedgehog => [
            "explores a maze of books and cushions.",
            "pushes a tiny ball along with its nose.",
            "splashes in a shallow dish of water.",
        ],
    }
}

/// How a species reacts to its favourite weather.
pub const fn weather_love_line(species: Species) -> &'static str {
    match species {
        Species::Cat => "stretches out in a perfect sunbeam.",
        Species::Dog => "bounds through the sunshine, tongue lolling.",
        Species::Rabbit => "hops around the sunlit garden, ears up.",
        Species::Owl => "glides through the fog, perfectly at home.",
        Species::Fox => "vanishes into the mist and comes back looking smug.",
        Species::Hedgehog => "trundles happily through the puddles.",
    }
}

/// How a species reacts to the weather it hates.
pub const fn weather_dislike_line(species: Species) -> &'static str {
    match species {
        Species::Cat => "glares at the rain from the windowsill.",
        Species::Dog => "hides under the table until the storm passes.",
        Species::Rabbit => "thumps a back foot and won't leave the burrow.",
        Species::Owl => "fluffs up grumpily on the highest shelf.",
        Species::Fox => "curls up by the fire with its nose under its tail.",
        Species::Hedgehog => "rolls into a tight ball and stays that way.",
    }
}

/// How a species says hello to a villager.
pub fn greeting_line(species: Species, pet: &str, villager: &str) -> String {
    match species {
        Species::Cat => format!("{pet} winds round {villager}'s ankles, purring."),
        Species::Dog => format!("{pet} bounds up to {villager}, tail a blur!"),
        Species::Rabbit => format!("{pet} hops over to sniff {villager}'s shoes."),
        Species::Owl => format!("{pet} swoops down onto {villager}'s shoulder."),
        Species::Fox => format!("{pet} sidles up to {villager} and steals a snack."),
        Species::Hedgehog => format!("{pet} snuffles around {villager}'s boots."),
    }
}

// ---------------------------------------------------------------------------
// Found items
// ---------------------------------------------------------------------------

/// Something a pet dug up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundItem {
    /// What it is.
    pub name: String,
    /// What kind of thing it is.
    pub category: ForageCategory,
    /// How rare it is.
    pub rarity: Rarity,
    /// Flavour text.
    pub description: String,
    /// The day it was found.
    pub day: u64,
}

impl FoundItem {
    /// Collector's value in coins.
    pub const fn value(&self) -> u32 {
        match self.rarity {
            Rarity::Common => 2,
            Rarity::Uncommon => 5,
            Rarity::Rare => 12,
        }
    }
}

impl std::fmt::Display for FoundItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.rarity, self.description)
    }
}

/// Roll an item from a category, weighted toward common finds.
pub fn roll_item(category: ForageCategory, day: u64, rng: &mut impl Rng) -> FoundItem {
    let rarity = WeightedTable::new([
        (Rarity::Common, 0.65),
        (Rarity::Uncommon, 0.28),
        (Rarity::Rare, 0.07),
    ])
    .pick(rng)
    .unwrap_or(Rarity::Common);
    let [common, uncommon, rare] = category.items();
    let (name, description) = match rarity {
        Rarity::Common => common,
        Rarity::Uncommon => uncommon,
        Rarity::Rare => rare,
    };
    FoundItem {
        name: name.to_owned(),
        category,
        rarity,
        description: description.to_owned(),
        day,
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// An adopted animal companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Unique name.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Temperament.
    pub personality: PetPersonality,
    /// Accumulated bond points.
    pub bond_points: u32,
    /// Today's mood.
    pub mood: PetMood,
    /// Energy, 0 to 100.
    pub energy: u32,
    /// What it is doing.
    pub activity: PetActivity,
    /// Everything it has ever found, oldest first.
    pub found_items: Vec<FoundItem>,
    /// Days since adoption.
    pub days_owned: u32,
    /// Pets received today.
    pub times_pet_today: u32,
    /// Whether it has eaten today.
    pub fed_today: bool,
    /// Whether anyone petted, fed or played with it today.
    pub cared_today: bool,
}

impl Pet {
    /// A freshly adopted pet.
    pub fn new(name: impl Into<String>, species: Species, personality: PetPersonality) -> Self {
        Self {
            name: name.into(),
            species,
            personality,
            bond_points: 0,
            mood: PetMood::Content,
            energy: MAX_PET_ENERGY,
            activity: PetActivity::Sleeping,
            found_items: Vec::new(),
            days_owned: 0,
            times_pet_today: 0,
            fed_today: false,
            cared_today: false,
        }
    }

    /// Bond tier derived from points.
    pub fn bond_tier(&self) -> BondTier {
        BOND_LADDER.tier_for(self.bond_points)
    }

    /// The species profile.
    pub const fn profile(&self) -> SpeciesProfile {
        species_profile(self.species)
    }

    fn gain_bond(&mut self, points: u32) {
        self.bond_points = self.bond_points.saturating_add(points);
    }

    /// Give the pet some affection.
    pub fn pet(&mut self, daily_cap: u32) -> Result<String, AgentError> {
        if self.times_pet_today >= daily_cap {
            return Err(AgentError::PettedOut(self.name.clone()));
        }
        let mut points: u32 = 2;
        if self.personality == PetPersonality::Gentle {
            points = points.saturating_add(1);
        }
        if self.mood >= PetMood::Happy {
            points = points.saturating_add(1);
        }
        let lines = petting_lines(self.species);
        let line = lines
            .get(usize::try_from(self.times_pet_today).unwrap_or(0) % lines.len())
            .copied()
            .unwrap_or_default();

        self.times_pet_today = self.times_pet_today.saturating_add(1);
        self.cared_today = true;
        self.gain_bond(points);
        self.mood = self.mood.shift(1);
        Ok(format!("{} {line}", self.name))
    }

    /// Feed the pet. Once per day.
    pub fn feed(&mut self) -> Result<String, AgentError> {
        if self.fed_today {
            return Err(AgentError::AlreadyFed(self.name.clone()));
        }
        self.fed_today = true;
        self.cared_today = true;
        self.energy = self.energy.saturating_add(FEED_ENERGY).min(MAX_PET_ENERGY);
        self.gain_bond(3);
        self.mood = self.mood.shift(1);
        Ok(format!("{} munches happily.", self.name))
    }

    /// Play with the pet. Costs energy and builds the bond.
    pub fn play(&mut self) -> Result<String, AgentError> {
        if self.energy < PLAY_COST {
            return Err(AgentError::TooTired {
                name: self.name.clone(),
                energy: self.energy,
                needed: PLAY_COST,
            });
        }
        let points: u32 = match self.personality {
            PetPersonality::Playful => 5,
            PetPersonality::Lazy => 2,
            _ => 3,
        };
        let lines = play_lines(self.species);
        let line = lines
            .get(usize::try_from(self.days_owned).unwrap_or(0) % lines.len())
            .copied()
            .unwrap_or_default();

        self.energy = self.energy.saturating_sub(PLAY_COST);
        self.cared_today = true;
        self.gain_bond(points);
        self.mood = self.mood.shift(1);
        Ok(format!("{} {line}", self.name))
    }

    /// Wake up a little more tired, and lose a bond point if nobody cared
    /// for it yesterday (never dropping a tier).
    pub fn start_day(&mut self) {
        if self.days_owned >= 1 && !self.cared_today {
            self.bond_points = BOND_LADDER.apply_delta(self.bond_points, -1);
        }
        self.days_owned = self.days_owned.saturating_add(1);
        self.times_pet_today = 0;
        self.fed_today = false;
        self.cared_today = false;
        self.energy = self.energy.saturating_sub(DAILY_ENERGY_DECAY);
    }

    /// Pick today's mood from temperament, weather and bond.
    pub fn roll_mood(&mut self, weather: PetWeather, rng: &mut impl Rng) -> PetMood {
        let profile = self.profile();
        let mut mood = WeightedTable::new(mood_weights(self.personality))
            .pick(rng)
            .unwrap_or(PetMood::Content);
        if weather == profile.favourite_weather {
            mood = mood.shift(1);
        } else if weather == profile.disliked_weather {
            mood = mood.shift(-1);
        }
        if self.bond_tier() >= BondTier::Devoted {
            mood = mood.shift(1);
        }
        self.mood = mood;
        mood
    }

    /// Choose what to do under today's weather.
    pub fn choose_activity(&mut self, weather: PetWeather) -> PetActivity {
        let profile = self.profile();
        self.activity = if weather == profile.disliked_weather {
            PetActivity::Sheltering
        } else if weather == profile.favourite_weather {
            PetActivity::Playing
        } else {
            match self.personality {
                PetPersonality::Lazy => PetActivity::Sleeping,
                PetPersonality::Loyal => PetActivity::Following,
                _ => PetActivity::Exploring,
            }
        };
        self.activity
    }

    /// Chance that a forage attempt today finds something.
    pub fn forage_chance(&self, season: Season) -> f64 {
        let profile = self.profile();
        let mut chance = profile.base_forage_chance();
        if self.bond_tier() >= BondTier::Devoted {
            chance += 0.10;
        }
        if season == profile.favourite_season {
            chance += 0.05;
        }
        if self.personality == PetPersonality::Curious {
            chance += 0.08;
        }
        chance
    }

    /// Try to dig something up. Needs and spends energy; a find is kept
    /// forever and strengthens the bond.
    pub fn forage(
        &mut self,
        day: u64,
        season: Season,
        weather: PetWeather,
        rng: &mut impl Rng,
    ) -> Option<FoundItem> {
        if self.energy < FORAGE_COST {
            return None;
        }
        self.energy = self.energy.saturating_sub(FORAGE_COST);
        self.activity = PetActivity::Foraging;

        if rng.random::<f64>() >= self.forage_chance(season) {
            return None;
        }
        let available: Vec<ForageCategory> = self
            .profile()
            .forage_categories
            .iter()
            .copied()
            .filter(|c| c.available(season, weather))
            .collect();
        if available.is_empty() {
            return None;
        }
        let category = available
            .get(rng.random_range(0..available.len()))
            .copied()?;
        let item = roll_item(category, day, rng);
        self.found_items.push(item.clone());
        self.gain_bond(1);
        Some(item)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn biscuit() -> Pet {
        Pet::new("Biscuit", Species::Dog, PetPersonality::Loyal)
    }

    #[test]
    fn petting_is_capped() {
        let mut pet = biscuit();
        for _ in 0..3 {
            pet.pet(3).unwrap();
        }
        assert_eq!(pet.pet(3), Err(AgentError::PettedOut("Biscuit".to_owned())));
        assert_eq!(pet.times_pet_today, 3);
    }

    #[test]
    fn gentle_happy_pets_bond_faster() {
        let mut pet = Pet::new("Bramble", Species::Hedgehog, PetPersonality::Gentle);
        pet.mood = PetMood::Happy;
        pet.pet(3).unwrap();
        assert_eq!(pet.bond_points, 4);
        assert_eq!(pet.mood, PetMood::Ecstatic);
    }

    #[test]
    fn feeding_once_a_day() {
        let mut pet = biscuit();
        pet.energy = 50;
        assert_eq!(pet.feed().unwrap(), "Biscuit munches happily.");
        assert_eq!(pet.energy, 80);
        assert_eq!(pet.bond_points, 3);
        assert_eq!(pet.feed(), Err(AgentError::AlreadyFed("Biscuit".to_owned())));
        assert_eq!(pet.bond_points, 3);
    }

    #[test]
    fn tired_pets_will_not_play() {
        let mut pet = Pet::new("Whiskers", Species::Cat, PetPersonality::Lazy);
        pet.energy = 14;
        let err = pet.play().unwrap_err();
        assert_eq!(err.kind(), willowbrook_types::ErrorKind::InsufficientResource);
        assert_eq!(pet.energy, 14);
        assert_eq!(pet.bond_points, 0);

        pet.energy = 30;
        pet.play().unwrap();
        assert_eq!(pet.energy, 15);
        assert_eq!(pet.bond_points, 2);
    }

    #[test]
    fn neglect_costs_a_point_but_not_a_tier() {
        let mut pet = biscuit();
        pet.start_day();
        assert_eq!(pet.bond_points, 0);
        pet.bond_points = 16;
        pet.start_day();
        pet.start_day();
        pet.start_day();
        assert_eq!(pet.bond_points, 15);
        assert_eq!(pet.bond_tier(), BondTier::Familiar);
    }

    #[test]
    fn energy_runs_down_until_fed() {
        let mut pet = biscuit();
        pet.energy = 50;
        pet.start_day();
        assert_eq!(pet.energy, 40);

        pet.energy = 5;
        pet.start_day();
        assert_eq!(pet.energy, 0);

        pet.feed().unwrap();
        assert_eq!(pet.energy, 30);
        pet.start_day();
        assert_eq!(pet.energy, 20);
    }

    #[test]
    fn disliked_weather_means_shelter() {
        let mut pet = biscuit();
        assert_eq!(pet.choose_activity(PetWeather::Stormy), PetActivity::Sheltering);
        assert_eq!(pet.choose_activity(PetWeather::Sunny), PetActivity::Playing);
        assert_eq!(pet.choose_activity(PetWeather::Cloudy), PetActivity::Following);
    }

    #[test]
    fn forage_chance_bonuses_stack() {
        let mut fox = Pet::new("Russet", Species::Fox, PetPersonality::Curious);
        fox.bond_points = 80;
        let chance = fox.forage_chance(Season::Autumn);
        assert!((chance - (0.30 + 0.10 + 0.05 + 0.08)).abs() < 1e-9);
    }

    #[test]
    fn winter_rabbits_find_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rabbit = Pet::new("Clover", Species::Rabbit, PetPersonality::Curious);
        for day in 1..=30 {
            rabbit.energy = MAX_PET_ENERGY;
            assert!(rabbit.forage(day, Season::Winter, PetWeather::Frost, &mut rng).is_none());
        }
        assert!(rabbit.found_items.is_empty());
    }

    #[test]
    fn finds_are_kept_and_bond() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut dog = biscuit();
        let mut found = 0;
        for day in 1..=40 {
            dog.energy = MAX_PET_ENERGY;
            if dog.forage(day, Season::Autumn, PetWeather::Sunny, &mut rng).is_some() {
                found += 1;
            }
        }
        assert!(found > 0);
        assert_eq!(dog.found_items.len(), found);
        assert_eq!(dog.bond_points, u32::try_from(found).unwrap());
    }

    #[test]
    fn common_items_dominate() {
        let mut rng = StdRng::seed_from_u64(99);
        let commons = (0..1000)
            .filter(|_| roll_item(ForageCategory::Stick, 1, &mut rng).rarity == Rarity::Common)
            .count();
        assert!((550..750).contains(&commons), "{commons}");
    }
}
