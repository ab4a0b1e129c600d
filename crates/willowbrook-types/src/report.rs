//! The per-day audit record assembled by the orchestrator.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::enums::{Festival, MagicalEvent, Season, VillageMood};
use crate::weather::capitalize;

/// Everything that happened in the village on one day.
///
/// Produced once at the end of a daily advance and never modified. Event
/// lists keep the order in which the subsystems emitted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// The day this report covers (1-based).
    pub day: u64,
    /// Season of that day.
    pub season: Season,
    /// One-line weather summary.
    pub weather_summary: String,
    /// Cozy weather narration.
    pub weather_description: String,
    /// Whether a magical event happened.
    pub is_magical: bool,
    /// The magical event, if any.
    pub magical_event: Option<MagicalEvent>,
    /// Festivals held today.
    pub festivals: Vec<Festival>,
    /// The village's collective mood.
    pub village_mood: VillageMood,
    /// Villager schedule, encounter, and birthday narration.
    pub villager_events: Vec<String>,
    /// Growth, weather damage, and ripening narration.
    pub garden_events: Vec<String>,
    /// Crops that became ready to harvest today.
    pub harvests: Vec<String>,
    /// Pet narration.
    pub pet_events: Vec<String>,
    /// Treasures pets found today, as `"<pet> found: <item>"`.
    pub found_items: Vec<String>,
    /// Price movements worth mentioning.
    pub market_events: Vec<String>,
}

/// Upper bound on lines shown per section when rendering.
const RENDER_SECTION_LIMIT: usize = 8;

impl DailyReport {
    /// Pretty-print the report for a text log.
    pub fn render(&self) -> String {
        let rule = "-".repeat(60);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "  Day {} of {}", self.day, capitalize(self.season.label()));
        let _ = writeln!(out, "  Weather: {}", self.weather_summary);
        let _ = writeln!(out, "  {}", self.weather_description);
        if let Some(event) = self.magical_event {
            let _ = writeln!(out, "  Magical event: {event}!");
        }
        if !self.festivals.is_empty() {
            let names: Vec<&str> = self.festivals.iter().map(|f| f.label()).collect();
            let _ = writeln!(out, "  Festivals today: {}", names.join(", "));
        }
        let _ = writeln!(out, "  Village mood: {}", self.village_mood);
        let _ = writeln!(out, "{rule}");

        let sections = [
            ("Villagers", &self.villager_events),
            ("Garden", &self.garden_events),
            ("Harvests", &self.harvests),
            ("Pets", &self.pet_events),
            ("Found items", &self.found_items),
            ("Market", &self.market_events),
        ];
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {title}:");
            for line in lines.iter().take(RENDER_SECTION_LIMIT) {
                let _ = writeln!(out, "    {line}");
            }
        }
        out.push_str(&rule);
        out
    }

    /// Whether anything beyond the weather happened.
    pub fn is_eventful(&self) -> bool {
        self.is_magical
            || !self.festivals.is_empty()
            || !self.harvests.is_empty()
            || !self.found_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_day() -> DailyReport {
        DailyReport {
            day: 1,
            season: Season::Spring,
            weather_summary: String::from("Day 1 | Spring | Clear"),
            weather_description: String::from("Blue skies."),
            is_magical: false,
            magical_event: None,
            festivals: Vec::new(),
            village_mood: VillageMood::Content,
            villager_events: vec![String::from("Lily waters the tulips.")],
            garden_events: Vec::new(),
            harvests: Vec::new(),
            pet_events: Vec::new(),
            found_items: Vec::new(),
            market_events: Vec::new(),
        }
    }

    #[test]
    fn render_includes_header_and_nonempty_sections() {
        let text = quiet_day().render();
        assert!(text.contains("Day 1 of Spring"));
        assert!(text.contains("Villagers:"));
        assert!(!text.contains("Garden:"));
        assert!(text.contains("Village mood: content"));
    }

    #[test]
    fn festivals_make_a_day_eventful() {
        let mut report = quiet_day();
        assert!(!report.is_eventful());
        report.festivals.push(Festival::BlossomDance);
        assert!(report.is_eventful());
        assert!(report.render().contains("Festivals today: Blossom Dance"));
    }
}
