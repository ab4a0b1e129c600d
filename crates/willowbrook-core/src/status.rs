//! A read-only snapshot of the whole village for display.

use rust_decimal::Decimal;
use serde::Serialize;
use willowbrook_agents::{Adoptable, Pet, VillagerSummary};
use willowbrook_market::{InventoryLine, PriceBoard, TradeSummary};
use willowbrook_types::{DailyReport, Season, WeatherState};
use willowbrook_world::{GardenPlot, GardenSummary, Harvest};

use crate::actions::JournalEntry;
use crate::orchestrator::{Phase, Simulation};

/// Everything a status screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStatus {
    /// Current day, 0 before the first advance.
    pub day: u64,
    /// Current season.
    pub season: Season,
    /// 1-based year.
    pub year: u64,
    /// 1-based day within the season.
    pub day_of_season: u32,
    /// Days until the season turns, counting today.
    pub days_until_season_change: u32,
    /// Idle or halted mid-advance.
    pub phase: Phase,
    /// Today's weather, absent before the first advance.
    pub weather: Option<WeatherState>,
    /// Villager summaries.
    pub villagers: VillagerStatus,
    /// Garden counts and plots.
    pub garden: GardenStatus,
    /// Adopted pets and the adoption pool.
    pub pets: PetStatus,
    /// Wallet, goods, and prices.
    pub economy: EconomyStatus,
    /// The most recent reports, oldest first.
    pub recent_reports: Vec<DailyReport>,
    /// Every journal entry.
    pub journal: Vec<JournalEntry>,
}

/// The villagers section of the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VillagerStatus {
    /// One summary per villager, in roster order.
    pub summaries: Vec<VillagerSummary>,
    /// Friendship lines.
    pub friendships: Vec<String>,
    /// Name of the villager with the most friendship points received.
    pub most_popular: Option<String>,
    /// Name of the villager with the fewest.
    pub loneliest: Option<String>,
}

/// The garden section of the status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenStatus {
    /// Plot counts.
    pub summary: GardenSummary,
    /// Every plot, row-major.
    pub plots: Vec<GardenPlot>,
}

/// The pets section of the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetStatus {
    /// Adopted pets, in adoption order.
    pub pets: Vec<Pet>,
    /// Animals still waiting for a home.
    pub adoptable: Vec<Adoptable>,
}

/// The economy section of the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EconomyStatus {
    /// Coins in the wallet.
    pub coins: Decimal,
    /// Goods held.
    pub inventory: Vec<InventoryLine>,
    /// Harvested produce not yet sold.
    pub basket: Vec<Harvest>,
    /// Current prices.
    pub price_board: PriceBoard,
    /// Trading totals.
    pub trades: TradeSummary,
}

impl Simulation {
    /// Snapshot the village. Reads only.
    pub fn status(&self) -> SimulationStatus {
        let recent = self.config.report.recent_reports;
        let skip = self.reports.len().saturating_sub(recent);

        SimulationStatus {
            day: self.clock.day(),
            season: self.clock.season(),
            year: self.clock.year(),
            day_of_season: self.clock.day_of_season(),
            days_until_season_change: self.clock.days_until_season_change(),
            phase: self.phase,
            weather: self.today.clone(),
            villagers: VillagerStatus {
                summaries: self.villagers.summaries(),
                friendships: self.villagers.friendship_report(),
                most_popular: self.villagers.most_popular().map(|v| v.name.clone()),
                loneliest: self.villagers.loneliest().map(|v| v.name.clone()),
            },
            garden: GardenStatus {
                summary: self.garden.summary(),
                plots: self.garden.plots().to_vec(),
            },
            pets: PetStatus {
                pets: self.pets.pets().to_vec(),
                adoptable: self.pets.adoptable().to_vec(),
            },
            economy: EconomyStatus {
                coins: self.wallet.balance(),
                inventory: self.inventory.lines(),
                basket: self.inventory.basket().to_vec(),
                price_board: self.market.price_board(),
                trades: self.market.trade_summary(),
            },
            recent_reports: self.reports.iter().skip(skip).cloned().collect(),
            journal: self.journal.clone(),
        }
    }
}
