//! The six founding villagers and their seasonal schedules.

use willowbrook_types::Location::{
    BlossomCafe, CommunityGarden, DustyTome, SunriseFarm, TidalBeach, TinkersWorkshop, TownPlaza,
    WhisperingWoods,
};
use willowbrook_types::{GiftCategory, Location, Personality, Season, Sky, TimeOfDay};

use crate::villager::{Gift, Villager};

// ---------------------------------------------------------------------------
// Schedule table
// ---------------------------------------------------------------------------

/// Where a schedule entry sends a villager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    /// The villager's own home.
    Home,
    /// A named place in the village.
    At(Location),
}

/// One slot of a daily routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Where to be.
    pub place: Place,
    /// What to do there.
    pub activity: &'static str,
}

const fn at(location: Location, activity: &'static str) -> ScheduleEntry {
    ScheduleEntry {
        place: Place::At(location),
        activity,
    }
}

const fn home(activity: &'static str) -> ScheduleEntry {
    ScheduleEntry {
        place: Place::Home,
        activity,
    }
}

/// Night is always spent asleep at home.
const SLEEPING: ScheduleEntry = home("sleeping");

/// Daytime routine (dawn, morning, afternoon, evening) for a personality in a season.
#[allow(clippy::too_many_lines)] // One flat table reads better than four.
const fn daytime(personality: Personality, season: Season) -> [ScheduleEntry; 4] {
    match (personality, season) {
        (Personality::Cheerful, Season::Spring) => [
            at(CommunityGarden, "tending seedlings"),
            at(TownPlaza, "selling flowers"),
            at(BlossomCafe, "sipping herbal tea"),
            home("arranging bouquets"),
        ],
        (Personality::Cheerful, Season::Summer) => [
            at(TidalBeach, "collecting shells"),
            at(CommunityGarden, "watering flowers"),
            at(TownPlaza, "chatting with friends"),
            at(BlossomCafe, "enjoying iced lemonade"),
        ],
        (Personality::Cheerful, Season::Autumn) => [
            home("baking apple bread"),
            at(SunriseFarm, "picking apples"),
            at(TownPlaza, "hanging garlands"),
            at(BlossomCafe, "sharing cinnamon buns"),
        ],
        (Personality::Cheerful, Season::Winter) => [
            home("knitting scarves"),
            at(BlossomCafe, "serving cocoa"),
            at(TownPlaza, "building snowmen"),
            home("writing holiday cards"),
        ],
        (Personality::Grumpy, Season::Spring) => [
            home("chopping firewood"),
            at(TinkersWorkshop, "repairing fences"),
            at(WhisperingWoods, "foraging mushrooms"),
            home("whittling by the fire"),
        ],
        (Personality::Grumpy, Season::Summer) => [
            at(TidalBeach, "fishing in silence"),
            at(TinkersWorkshop, "sharpening tools"),
            home("napping in the shade"),
            home("whittling by the fire"),
        ],
        (Personality::Grumpy, Season::Autumn) => [
            at(WhisperingWoods, "gathering kindling"),
            at(TinkersWorkshop, "mending a cart wheel"),
            at(SunriseFarm, "hauling hay"),
            home("muttering at the news"),
        ],
        (Personality::Grumpy, Season::Winter) => [
            home("stoking the stove"),
            at(TinkersWorkshop, "forging nails"),
            home("splitting logs"),
            at(BlossomCafe, "complaining about the cold"),
        ],
        (Personality::Shy, Season::Spring) => [
            home("sketching in a journal"),
            at(WhisperingWoods, "collecting pressed leaves"),
            at(DustyTome, "reading fairy tales"),
            home("making bookmarks"),
        ],
        (Personality::Shy, Season::Summer) => [
            at(CommunityGarden, "drawing butterflies"),
            at(DustyTome, "hiding in the poetry aisle"),
            at(TidalBeach, "watching the tide"),
            home("pressing flowers"),
        ],
        (Personality::Shy, Season::Autumn) => [
            at(WhisperingWoods, "collecting red leaves"),
            at(DustyTome, "reading ghost stories"),
            home("binding a notebook"),
            home("sipping cider by the window"),
        ],
        (Personality::Shy, Season::Winter) => [
            home("watching the frost on the glass"),
            at(DustyTome, "reading by the fire"),
            home("embroidering snowflakes"),
            at(BlossomCafe, "sitting in a quiet corner"),
        ],
        (Personality::Adventurous, Season::Spring) => [
            at(WhisperingWoods, "jogging the forest trail"),
            at(TidalBeach, "swimming in the cove"),
            at(TownPlaza, "showing off found treasures"),
            at(BlossomCafe, "telling adventure stories"),
        ],
        (Personality::Adventurous, Season::Summer) => [
            at(TidalBeach, "diving for shells"),
            at(WhisperingWoods, "climbing the old oak"),
            at(SunriseFarm, "racing the farm dogs"),
            at(TownPlaza, "planning an expedition"),
        ],
        (Personality::Adventurous, Season::Autumn) => [
            at(WhisperingWoods, "tracking deer"),
            at(SunriseFarm, "helping with the harvest"),
            at(TidalBeach, "searching for sea glass"),
            at(BlossomCafe, "telling adventure stories"),
        ],
        (Personality::Adventurous, Season::Winter) => [
            at(WhisperingWoods, "snowshoeing"),
            at(TownPlaza, "organizing a snowball fight"),
            at(TinkersWorkshop, "waxing a sled"),
            home("poring over maps"),
        ],
        (Personality::Scholarly, Season::Spring) => [
            at(DustyTome, "cataloguing new arrivals"),
            at(DustyTome, "researching local history"),
            at(CommunityGarden, "studying plant species"),
            at(BlossomCafe, "writing field notes"),
        ],
        (Personality::Scholarly, Season::Summer) => [
            at(TidalBeach, "sampling tide pools"),
            at(DustyTome, "transcribing old letters"),
            at(CommunityGarden, "counting bees"),
            at(TownPlaza, "giving a stargazing talk"),
        ],
        (Personality::Scholarly, Season::Autumn) => [
            at(DustyTome, "restoring a ledger"),
            at(WhisperingWoods, "identifying fungi"),
            at(DustyTome, "drafting a monograph"),
            at(BlossomCafe, "debating over tea"),
        ],
        (Personality::Scholarly, Season::Winter) => [
            home("reading by lamplight"),
            at(DustyTome, "reorganizing the archive"),
            at(DustyTome, "annotating star charts"),
            at(BlossomCafe, "writing field notes"),
        ],
        (Personality::Nurturing, Season::Spring) => [
            at(SunriseFarm, "feeding the chickens"),
            at(CommunityGarden, "planting herbs"),
            at(BlossomCafe, "baking pies for neighbours"),
            at(TownPlaza, "handing out warm bread"),
        ],
        (Personality::Nurturing, Season::Summer) => [
            at(SunriseFarm, "collecting eggs"),
            at(CommunityGarden, "weeding the beds"),
            at(BlossomCafe, "making jam"),
            at(TownPlaza, "handing out lemonade"),
        ],
        (Personality::Nurturing, Season::Autumn) => [
            at(SunriseFarm, "milking the goats"),
            at(CommunityGarden, "saving seeds"),
            home("canning preserves"),
            at(TownPlaza, "sharing pumpkin soup"),
        ],
        (Personality::Nurturing, Season::Winter) => [
            at(SunriseFarm, "checking on the animals"),
            home("brewing remedies"),
            at(BlossomCafe, "knitting mittens for everyone"),
            home("baking gingerbread"),
        ],
    }
}

/// The schedule entry for a personality, season and time of day.
pub const fn schedule_entry(
    personality: Personality,
    season: Season,
    slot: TimeOfDay,
) -> ScheduleEntry {
    let [dawn, morning, afternoon, evening] = daytime(personality, season);
    match slot {
        TimeOfDay::Dawn => dawn,
        TimeOfDay::Morning => morning,
        TimeOfDay::Afternoon => afternoon,
        TimeOfDay::Evening => evening,
        TimeOfDay::Night => SLEEPING,
    }
}

/// Resolve where a villager with this home spends a slot under today's sky.
///
/// Stormy skies send everyone scheduled outdoors back home.
pub fn resolve_slot(
    personality: Personality,
    home: Location,
    season: Season,
    slot: TimeOfDay,
    sky: Sky,
) -> (Location, String) {
    let entry = schedule_entry(personality, season, slot);
    match entry.place {
        Place::At(location) if sky.is_stormy() && location.is_outdoor() => {
            (home, "sheltering from the storm".to_owned())
        }
        Place::At(location) => (location, entry.activity.to_owned()),
        Place::Home => (home, entry.activity.to_owned()),
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The founding villagers, in roster order.
pub fn founding_villagers() -> Vec<Villager> {
    vec![
        Villager::new(
            "lily",
            "Lily",
            Personality::Cheerful,
            Location::RosewoodCottage,
            (Season::Spring, 14),
            Gift::new("Sunflower Bouquet", GiftCategory::Flower, 3),
        ),
        Villager::new(
            "gruff",
            "Gruff",
            Personality::Grumpy,
            Location::StonehearthLodge,
            (Season::Winter, 3),
            Gift::new("Masterwork Axe", GiftCategory::Tool, 5),
        ),
        Villager::new(
            "fern",
            "Fern",
            Personality::Shy,
            Location::IvyCabin,
            (Season::Autumn, 21),
            Gift::new("Pressed Wildflower Journal", GiftCategory::Handmade, 4),
        ),
        Villager::new(
            "ridge",
            "Ridge",
            Personality::Adventurous,
            Location::MapleHouse,
            (Season::Summer, 8),
            Gift::new("Ancient Map Fragment", GiftCategory::Foraged, 5),
        ),
        Villager::new(
            "sage",
            "Sage",
            Personality::Scholarly,
            Location::IvyCabin,
            (Season::Autumn, 10),
            Gift::new("Rare First Edition", GiftCategory::Book, 5),
        ),
        Villager::new(
            "hazel",
            "Hazel",
            Personality::Nurturing,
            Location::RosewoodCottage,
            (Season::Spring, 28),
            Gift::new("Heirloom Seed Packet", GiftCategory::Foraged, 3),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_six_distinct_personalities() {
        let roster = founding_villagers();
        assert_eq!(roster.len(), 6);
        for personality in Personality::ALL {
            assert_eq!(
                roster.iter().filter(|v| v.personality == personality).count(),
                1
            );
        }
    }

    #[test]
    fn everyone_sleeps_at_home() {
        for personality in Personality::ALL {
            for season in Season::ALL {
                let (location, activity) = resolve_slot(
                    personality,
                    Location::MapleHouse,
                    season,
                    TimeOfDay::Night,
                    Sky::Clear,
                );
                assert_eq!(location, Location::MapleHouse);
                assert_eq!(activity, "sleeping");
            }
        }
    }

    #[test]
    fn storms_send_outdoor_plans_home() {
        let (clear, _) = resolve_slot(
            Personality::Adventurous,
            Location::MapleHouse,
            Season::Spring,
            TimeOfDay::Dawn,
            Sky::Clear,
        );
        assert_eq!(clear, Location::WhisperingWoods);

        let (stormy, activity) = resolve_slot(
            Personality::Adventurous,
            Location::MapleHouse,
            Season::Spring,
            TimeOfDay::Dawn,
            Sky::Thunderstorm,
        );
        assert_eq!(stormy, Location::MapleHouse);
        assert_eq!(activity, "sheltering from the storm");
    }

    #[test]
    fn indoor_plans_survive_storms() {
        let (location, _) = resolve_slot(
            Personality::Scholarly,
            Location::IvyCabin,
            Season::Spring,
            TimeOfDay::Morning,
            Sky::Blizzard,
        );
        assert_eq!(location, Location::DustyTome);
    }
}
