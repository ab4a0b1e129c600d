//! Enumeration types shared by every subsystem of the village.
//!
//! Each enum carries an `ALL` table in declaration order and a
//! human-readable `label()` used by narration and reports. Ordering derives
//! (`PartialOrd`/`Ord`) follow the declaration order, which for the mood
//! and tier enums is the ordinal ladder from worst to best.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Implements [`fmt::Display`] by delegating to the type's `label()`.
macro_rules! display_via_label {
    ($($name:ident),+ $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// 1. Calendar
// ---------------------------------------------------------------------------

/// A season of the village year. Each lasts a fixed number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Blossoms, drizzle, and the first plantings.
    Spring,
    /// Long warm days and thunderstorms.
    Summer,
    /// Fog, harvests, and lanterns.
    Autumn,
    /// Snow, frost fairs, and aurora.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Zero-based position in the year.
    pub const fn index(self) -> usize {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Autumn => 2,
            Self::Winter => 3,
        }
    }

    /// Season at a zero-based position, wrapping every four.
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Spring,
            1 => Self::Summer,
            2 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// The season that follows this one.
    pub const fn next(self) -> Self {
        Self::from_index(self.index().wrapping_add(1))
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// One of the five time slots a village day is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// First light.
    Dawn,
    /// Before noon.
    Morning,
    /// After noon.
    Afternoon,
    /// Sunset and supper.
    Evening,
    /// Sleep.
    Night,
}

impl TimeOfDay {
    /// All slots in the order a day visits them.
    pub const ALL: [Self; 5] = [
        Self::Dawn,
        Self::Morning,
        Self::Afternoon,
        Self::Evening,
        Self::Night,
    ];

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Weather
// ---------------------------------------------------------------------------

/// The sky condition of a day. Exactly ten values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    /// Cloudless.
    Clear,
    /// Scattered clouds.
    PartlyCloudy,
    /// Full cloud cover.
    Overcast,
    /// Light rain.
    Drizzle,
    /// Steady rain.
    Rain,
    /// Rain with thunder and lightning.
    Thunderstorm,
    /// Snowfall.
    Snow,
    /// Heavy snow and wind.
    Blizzard,
    /// Low visibility mist.
    Fog,
    /// Ice pellets.
    Hail,
}

impl Sky {
    /// All sky conditions.
    pub const ALL: [Self; 10] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::Overcast,
        Self::Drizzle,
        Self::Rain,
        Self::Thunderstorm,
        Self::Snow,
        Self::Blizzard,
        Self::Fog,
        Self::Hail,
    ];

    /// Title-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Overcast => "Overcast",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Blizzard => "Blizzard",
            Self::Fog => "Fog",
            Self::Hail => "Hail",
        }
    }

    /// Skies that keep everyone indoors.
    pub const fn is_stormy(self) -> bool {
        matches!(self, Self::Thunderstorm | Self::Blizzard | Self::Hail)
    }
}

/// One of the eight compass points the wind blows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    /// North.
    N,
    /// North-east.
    NE,
    /// East.
    E,
    /// South-east.
    SE,
    /// South.
    S,
    /// South-west.
    SW,
    /// West.
    W,
    /// North-west.
    NW,
}

impl WindDirection {
    /// All compass points clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Compass abbreviation.
    pub const fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

/// A rare named weather overlay with its own narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicalEvent {
    /// Cherry petals fall like snow.
    PetalBlizzard,
    /// Every raindrop carries a tiny rainbow.
    RainbowRain,
    /// Fog that seems to murmur old stories.
    WhisperingMist,
    /// Twin halos around the sun.
    SundogHalo,
    /// The sunset lingers for hours.
    EternalGoldenHour,
    /// Swarms of fireflies light the meadows.
    FireflyStorm,
    /// Shooting stars all night long.
    Starfall,
    /// A rainbow drawn by moonlight.
    MoonbowNight,
    /// Aurora ribbons with a shimmer of sparks.
    AuroraShower,
    /// Frost that grows into crystal flowers.
    CrystalFrost,
}

impl MagicalEvent {
    /// Title-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PetalBlizzard => "Petal Blizzard",
            Self::RainbowRain => "Rainbow Rain",
            Self::WhisperingMist => "Whispering Mist",
            Self::SundogHalo => "Sundog Halo",
            Self::EternalGoldenHour => "Eternal Golden Hour",
            Self::FireflyStorm => "Firefly Storm",
            Self::Starfall => "Starfall",
            Self::MoonbowNight => "Moonbow Night",
            Self::AuroraShower => "Aurora Shower",
            Self::CrystalFrost => "Crystal Frost",
        }
    }
}

/// A village festival unlocked by a season and sky combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Festival {
    /// Spring dance under open skies.
    BlossomDance,
    /// Spring gathering during a petal blizzard.
    PetalReverie,
    /// Summer night gala lit by a firefly storm.
    FireflyGala,
    /// Summer feast on a hot clear day.
    MidsummerFeast,
    /// Autumn vigil under a moonbow.
    HarvestMoonVigil,
    /// Autumn lantern procession through fog.
    LanternWalk,
    /// Winter fair on frozen ground.
    FrostFair,
    /// Winter celebration beneath the aurora.
    AuroraCelebration,
}

impl Festival {
    /// Title-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BlossomDance => "Blossom Dance",
            Self::PetalReverie => "Petal Reverie",
            Self::FireflyGala => "Firefly Gala",
            Self::MidsummerFeast => "Midsummer Feast",
            Self::HarvestMoonVigil => "Harvest Moon Vigil",
            Self::LanternWalk => "Lantern Walk",
            Self::FrostFair => "Frost Fair",
            Self::AuroraCelebration => "Aurora Celebration",
        }
    }
}

/// The collective mood of the village, derived from recent weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillageMood {
    /// Several magical days in a row.
    Enchanted,
    /// Mostly bright weather.
    Joyful,
    /// Pleasant enough.
    Content,
    /// Grey but snug.
    Cozy,
    /// Long grey spell.
    Melancholy,
    /// Harsh weather wearing everyone down.
    Restless,
}

impl VillageMood {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enchanted => "enchanted",
            Self::Joyful => "joyful",
            Self::Content => "content",
            Self::Cozy => "cozy",
            Self::Melancholy => "melancholy",
            Self::Restless => "restless",
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Villagers
// ---------------------------------------------------------------------------

/// One of the six villager archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Sunny and sociable.
    Cheerful,
    /// Gruff but loyal.
    Grumpy,
    /// Quiet and thoughtful.
    Shy,
    /// Always off exploring.
    Adventurous,
    /// Bookish and curious.
    Scholarly,
    /// Looks after everyone.
    Nurturing,
}

impl Personality {
    /// All archetypes.
    pub const ALL: [Self; 6] = [
        Self::Cheerful,
        Self::Grumpy,
        Self::Shy,
        Self::Adventurous,
        Self::Scholarly,
        Self::Nurturing,
    ];

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cheerful => "cheerful",
            Self::Grumpy => "grumpy",
            Self::Shy => "shy",
            Self::Adventurous => "adventurous",
            Self::Scholarly => "scholarly",
            Self::Nurturing => "nurturing",
        }
    }
}

/// A villager's mood, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Wants to be left alone.
    Upset,
    /// Wishes someone would visit.
    Lonely,
    /// Neither here nor there.
    Neutral,
    /// Quietly happy.
    Content,
    /// Radiant.
    Joyful,
}

impl Mood {
    /// The mood ladder from worst to best.
    pub const LADDER: [Self; 5] = [
        Self::Upset,
        Self::Lonely,
        Self::Neutral,
        Self::Content,
        Self::Joyful,
    ];

    /// Move `delta` steps along the ladder, stopping at either end.
    pub fn shift(self, delta: i32) -> Self {
        shift_on_ladder(&Self::LADDER, self, delta)
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upset => "upset",
            Self::Lonely => "lonely",
            Self::Neutral => "neutral",
            Self::Content => "content",
            Self::Joyful => "joyful",
        }
    }
}

/// What kind of thing a gift is. Drives the receiver's preference lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftCategory {
    /// Cut or potted flowers.
    Flower,
    /// Cooked or fresh food.
    Food,
    /// Something made by hand.
    Handmade,
    /// A book.
    Book,
    /// A tool.
    Tool,
    /// A precious stone.
    Gemstone,
    /// A fish.
    Fish,
    /// Something found in the wild.
    Foraged,
}

impl GiftCategory {
    /// All gift categories.
    pub const ALL: [Self; 8] = [
        Self::Flower,
        Self::Food,
        Self::Handmade,
        Self::Book,
        Self::Tool,
        Self::Gemstone,
        Self::Fish,
        Self::Foraged,
    ];

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Food => "food",
            Self::Handmade => "handmade",
            Self::Book => "book",
            Self::Tool => "tool",
            Self::Gemstone => "gemstone",
            Self::Fish => "fish",
            Self::Foraged => "foraged",
        }
    }
}

/// Friendship rank between a villager and someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipTier {
    /// Never really talked.
    Stranger,
    /// Knows your name.
    Acquaintance,
    /// Happy to see you.
    Friend,
    /// Shares secrets.
    CloseFriend,
    /// Inseparable.
    BestFriend,
}

impl FriendshipTier {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stranger => "stranger",
            Self::Acquaintance => "acquaintance",
            Self::Friend => "friend",
            Self::CloseFriend => "close friend",
            Self::BestFriend => "best friend",
        }
    }
}

/// A named place in the village.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Lily and Hazel's cottage.
    RosewoodCottage,
    /// Ridge's house.
    MapleHouse,
    /// Fern and Sage's cabin.
    IvyCabin,
    /// Gruff's lodge.
    StonehearthLodge,
    /// The village library.
    DustyTome,
    /// The cafe.
    BlossomCafe,
    /// The central square.
    TownPlaza,
    /// The farm east of town.
    SunriseFarm,
    /// The forest.
    WhisperingWoods,
    /// The shore.
    TidalBeach,
    /// The shared allotments.
    CommunityGarden,
    /// The tinker's shop.
    TinkersWorkshop,
}

impl Location {
    /// All locations.
    pub const ALL: [Self; 12] = [
        Self::RosewoodCottage,
        Self::MapleHouse,
        Self::IvyCabin,
        Self::StonehearthLodge,
        Self::DustyTome,
        Self::BlossomCafe,
        Self::TownPlaza,
        Self::SunriseFarm,
        Self::WhisperingWoods,
        Self::TidalBeach,
        Self::CommunityGarden,
        Self::TinkersWorkshop,
    ];

    /// Proper name of the place.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RosewoodCottage => "Rosewood Cottage",
            Self::MapleHouse => "Maple House",
            Self::IvyCabin => "Ivy Cabin",
            Self::StonehearthLodge => "Stonehearth Lodge",
            Self::DustyTome => "The Dusty Tome",
            Self::BlossomCafe => "Blossom Cafe",
            Self::TownPlaza => "Town Plaza",
            Self::SunriseFarm => "Sunrise Farm",
            Self::WhisperingWoods => "Whispering Woods",
            Self::TidalBeach => "Tidal Beach",
            Self::CommunityGarden => "Community Garden",
            Self::TinkersWorkshop => "Tinker's Workshop",
        }
    }

    /// Whether the place is exposed to the weather.
    pub const fn is_outdoor(self) -> bool {
        matches!(
            self,
            Self::TownPlaza
                | Self::SunriseFarm
                | Self::WhisperingWoods
                | Self::TidalBeach
                | Self::CommunityGarden
        )
    }
}

// ---------------------------------------------------------------------------
// 4. Pets
// ---------------------------------------------------------------------------

/// An adoptable animal species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Cat.
    Cat,
    /// Dog.
    Dog,
    /// Rabbit.
    Rabbit,
    /// Owl.
    Owl,
    /// Fox.
    Fox,
    /// Hedgehog.
    Hedgehog,
}

impl Species {
    /// All species.
    pub const ALL: [Self; 6] = [
        Self::Cat,
        Self::Dog,
        Self::Rabbit,
        Self::Owl,
        Self::Fox,
        Self::Hedgehog,
    ];

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Rabbit => "rabbit",
            Self::Owl => "owl",
            Self::Fox => "fox",
            Self::Hedgehog => "hedgehog",
        }
    }
}

/// A pet's temperament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetPersonality {
    /// Loves games.
    Playful,
    /// Loves naps.
    Lazy,
    /// Pokes its nose into everything.
    Curious,
    /// Never leaves your side.
    Loyal,
    /// Steals socks.
    Mischievous,
    /// Calm and affectionate.
    Gentle,
}

impl PetPersonality {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playful => "playful",
            Self::Lazy => "lazy",
            Self::Curious => "curious",
            Self::Loyal => "loyal",
            Self::Mischievous => "mischievous",
            Self::Gentle => "gentle",
        }
    }
}

/// A pet's mood, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetMood {
    /// Misses you.
    Lonely,
    /// Fidgety.
    Restless,
    /// Settled.
    Content,
    /// Tail wagging.
    Happy,
    /// Bouncing off the walls.
    Ecstatic,
}

impl PetMood {
    /// The mood ladder from worst to best.
    pub const LADDER: [Self; 5] = [
        Self::Lonely,
        Self::Restless,
        Self::Content,
        Self::Happy,
        Self::Ecstatic,
    ];

    /// Move `delta` steps along the ladder, stopping at either end.
    pub fn shift(self, delta: i32) -> Self {
        shift_on_ladder(&Self::LADDER, self, delta)
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lonely => "lonely",
            Self::Restless => "restless",
            Self::Content => "content",
            Self::Happy => "happy",
            Self::Ecstatic => "ecstatic",
        }
    }
}

/// Bond rank between the player and a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondTier {
    /// Just adopted.
    Stranger,
    /// Recognises you.
    Familiar,
    /// Follows you around.
    Companion,
    /// Utterly devoted.
    Devoted,
    /// Two halves of one soul.
    Soulbound,
}

impl BondTier {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stranger => "stranger",
            Self::Familiar => "familiar",
            Self::Companion => "companion",
            Self::Devoted => "devoted",
            Self::Soulbound => "soulbound",
        }
    }
}

/// What a pet spent the day doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetActivity {
    /// Trailing after the player.
    Following,
    /// Roaming its favourite haunt.
    Exploring,
    /// Napping.
    Sleeping,
    /// Playing.
    Playing,
    /// Nose to the ground looking for treasure.
    Foraging,
    /// Saying hello to a villager.
    Greeting,
    /// Hiding from the weather.
    Sheltering,
}

impl PetActivity {
    /// Present-participle phrase for narration.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Following => "following you around",
            Self::Exploring => "exploring",
            Self::Sleeping => "sleeping",
            Self::Playing => "playing",
            Self::Foraging => "foraging",
            Self::Greeting => "greeting a villager",
            Self::Sheltering => "sheltering from the weather",
        }
    }
}

/// The coarse weather categories pets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetWeather {
    /// Clear or partly cloudy.
    Sunny,
    /// Overcast.
    Cloudy,
    /// Drizzle or rain.
    Rainy,
    /// Thunderstorm, blizzard, or hail.
    Stormy,
    /// Snow.
    Frost,
    /// Fog.
    Foggy,
}

impl PetWeather {
    /// Collapse a sky condition into the pet weather category.
    pub const fn from_sky(sky: Sky) -> Self {
        match sky {
            Sky::Clear | Sky::PartlyCloudy => Self::Sunny,
            Sky::Overcast => Self::Cloudy,
            Sky::Drizzle | Sky::Rain => Self::Rainy,
            Sky::Thunderstorm | Sky::Blizzard | Sky::Hail => Self::Stormy,
            Sky::Snow => Self::Frost,
            Sky::Fog => Self::Foggy,
        }
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Frost => "frost",
            Self::Foggy => "foggy",
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Garden
// ---------------------------------------------------------------------------

/// Growth stage of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Just planted.
    Seed,
    /// First green shoots.
    Sprout,
    /// Leafing out.
    Growing,
    /// In bloom.
    Flowering,
    /// Ready to pick.
    Harvestable,
    /// Dead. Must be cleared before replanting.
    Withered,
}

impl GrowthStage {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Sprout => "sprout",
            Self::Growing => "growing",
            Self::Flowering => "flowering",
            Self::Harvestable => "harvestable",
            Self::Withered => "withered",
        }
    }
}

/// Quality of harvested produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Ordinary produce.
    Normal,
    /// Above average.
    Silver,
    /// Excellent.
    Gold,
    /// Shimmering, once-a-season produce.
    Iridescent,
}

impl QualityTier {
    /// Sale price multiplier for this tier.
    pub fn price_multiplier(self) -> Decimal {
        match self {
            Self::Normal => Decimal::ONE,
            Self::Silver => Decimal::new(15, 1),
            Self::Gold => Decimal::new(22, 1),
            Self::Iridescent => Decimal::new(35, 1),
        }
    }

    /// Star rating (1..=5) when the produce is given as a gift.
    pub const fn gift_quality(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Silver => 2,
            Self::Gold => 3,
            Self::Iridescent => 5,
        }
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Iridescent => "iridescent",
        }
    }
}

/// Soil of a garden plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Plain soil.
    Normal,
    /// Composted soil.
    Enriched,
    /// Soil touched by old magic.
    Enchanted,
}

impl SoilType {
    /// Bonus added to the quality score at harvest.
    pub const fn quality_bonus(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Enriched => 0.3,
            Self::Enchanted => 0.7,
        }
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Enriched => "enriched",
            Self::Enchanted => "enchanted",
        }
    }
}

/// The coarse weather categories the garden reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GardenWeather {
    /// Clear or partly cloudy.
    Sunny,
    /// Overcast, drizzle, rain, or fog.
    Rainy,
    /// Thunderstorm, blizzard, or hail.
    Stormy,
    /// Snow.
    Frost,
    /// Any magical day.
    Magical,
}

impl GardenWeather {
    /// Collapse a day's weather into the garden category. Magic wins.
    pub const fn from_sky(sky: Sky, is_magical: bool) -> Self {
        if is_magical {
            return Self::Magical;
        }
        match sky {
            Sky::Clear | Sky::PartlyCloudy => Self::Sunny,
            Sky::Overcast | Sky::Drizzle | Sky::Rain | Sky::Fog => Self::Rainy,
            Sky::Thunderstorm | Sky::Blizzard | Sky::Hail => Self::Stormy,
            Sky::Snow => Self::Frost,
        }
    }

    /// Whether the sky does the watering today.
    pub const fn waters_garden(self) -> bool {
        matches!(self, Self::Rainy | Self::Stormy)
    }

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Frost => "frost",
            Self::Magical => "magical",
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Rarity
// ---------------------------------------------------------------------------

/// How rare a foraged find is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Found most days.
    Common,
    /// A pleasant surprise.
    Uncommon,
    /// Worth telling the whole village about.
    Rare,
}

impl Rarity {
    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }
}

display_via_label!(
    Season,
    TimeOfDay,
    Sky,
    WindDirection,
    MagicalEvent,
    Festival,
    VillageMood,
    Personality,
    Mood,
    GiftCategory,
    FriendshipTier,
    Location,
    Species,
    PetPersonality,
    PetMood,
    BondTier,
    PetActivity,
    PetWeather,
    GrowthStage,
    QualityTier,
    SoilType,
    GardenWeather,
    Rarity,
);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Step along an ordered ladder, saturating at both ends.
fn shift_on_ladder<T: Copy + PartialEq>(ladder: &[T], current: T, delta: i32) -> T {
    let Some(position) = ladder.iter().position(|step| *step == current) else {
        return current;
    };
    let last = ladder.len().saturating_sub(1);
    let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
    let target = if delta >= 0 {
        position.saturating_add(magnitude).min(last)
    } else {
        position.saturating_sub(magnitude)
    };
    ladder.get(target).copied().unwrap_or(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn season_wraps_after_winter() {
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(Season::from_index(5), Season::Summer);
    }

    #[test]
    fn mood_shift_saturates() {
        assert_eq!(Mood::Joyful.shift(1), Mood::Joyful);
        assert_eq!(Mood::Upset.shift(-3), Mood::Upset);
        assert_eq!(Mood::Neutral.shift(1), Mood::Content);
        assert_eq!(Mood::Neutral.shift(-2), Mood::Upset);
        assert_eq!(PetMood::Content.shift(2), PetMood::Ecstatic);
    }

    #[test]
    fn magic_overrides_garden_weather() {
        assert_eq!(GardenWeather::from_sky(Sky::Snow, true), GardenWeather::Magical);
        assert_eq!(GardenWeather::from_sky(Sky::Snow, false), GardenWeather::Frost);
        assert_eq!(GardenWeather::from_sky(Sky::Fog, false), GardenWeather::Rainy);
        assert!(GardenWeather::Stormy.waters_garden());
        assert!(!GardenWeather::Sunny.waters_garden());
    }

    #[test]
    fn pet_weather_covers_every_sky() {
        for sky in Sky::ALL {
            let _ = PetWeather::from_sky(sky);
        }
        assert_eq!(PetWeather::from_sky(Sky::Hail), PetWeather::Stormy);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Sky::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly_cloudy\"");
        let back: Sky = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Sky::PartlyCloudy);
    }

    #[test]
    fn tier_ordering_follows_ladder() {
        assert!(FriendshipTier::Stranger < FriendshipTier::BestFriend);
        assert!(BondTier::Familiar < BondTier::Companion);
        assert!(QualityTier::Gold > QualityTier::Silver);
    }
}
