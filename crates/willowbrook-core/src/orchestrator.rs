//! The daily orchestrator: the one place that advances every subsystem.
//!
//! Each call to [`Simulation::advance_day`] runs the same fixed order:
//!
//! 1. **Clock** -- move to the next day and derive its season.
//! 2. **Weather** -- generate and commit today's [`WeatherState`].
//! 3. **Villagers** -- schedules, moods, encounters, birthdays.
//! 4. **Garden** -- growth, watering by rain, neglect, ripening.
//! 5. **Pets** -- care decay, moods, foraging, and greetings, reading the
//!    villagers' finalized locations for the day.
//! 6. **Market** -- inventory ageing and price drift, with the day's
//!    ripened crops as supply.
//! 7. **Report** -- stitch every subsystem's output into one
//!    [`DailyReport`].
//!
//! All randomness comes from one [`StdRng`] seeded by
//! [`Simulation::new_game`], so a seed replays the same village.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use willowbrook_agents::{PetRegistry, VillagerDirectory};
use willowbrook_market::{Inventory, Market, Wallet, find_item};
use willowbrook_types::{DailyReport, ErrorKind, WeatherState};
use willowbrook_world::{GardenGrid, WeatherEngine};

use crate::actions::JournalEntry;
use crate::clock::VillageClock;
use crate::config::SimulationConfig;
use crate::error::SimulationError;

/// Where the simulation is in its daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Between days. Actions and advances are accepted.
    Idle,
    /// A day is being advanced. A failed advance stays here until the next
    /// [`Simulation::new_game`].
    Advancing,
}

/// The whole village and the player's belongings.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: SimulationConfig,
    pub(crate) seed: u64,
    pub(crate) clock: VillageClock,
    pub(crate) phase: Phase,
    pub(crate) rng: StdRng,
    pub(crate) weather: WeatherEngine,
    pub(crate) today: Option<WeatherState>,
    pub(crate) villagers: VillagerDirectory,
    pub(crate) garden: GardenGrid,
    pub(crate) pets: PetRegistry,
    pub(crate) market: Market,
    pub(crate) wallet: Wallet,
    pub(crate) inventory: Inventory,
    pub(crate) reports: Vec<DailyReport>,
    pub(crate) journal: Vec<JournalEntry>,
}

impl Simulation {
    /// Start a game from `config`, seeded with `config.world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Clock`] if the calendar configuration is
    /// invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let seed = config.world.seed;
        Self::build(config, seed)
    }

    fn build(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        let clock = VillageClock::new(&config.world)?;
        let calendar = clock.calendar();
        let season = clock.season();
        let simulation = Self {
            seed,
            clock,
            phase: Phase::Idle,
            rng: StdRng::seed_from_u64(seed),
            weather: WeatherEngine::new(config.weather_tuning()),
            today: None,
            villagers: VillagerDirectory::new(calendar, config.villagers),
            garden: GardenGrid::new(config.garden),
            pets: PetRegistry::new(config.pets),
            market: Market::new(config.market.clone(), season),
            wallet: Wallet::new(config.market.starting_coins),
            inventory: Inventory::new(),
            reports: Vec::new(),
            journal: Vec::new(),
            config,
        };
        info!(
            village = %simulation.config.world.name,
            seed,
            days_per_season = calendar.days_per_season(),
            "New game started"
        );
        Ok(simulation)
    }

    /// Throw the current game away and start over from day 0 with `seed`.
    ///
    /// This also clears a game halted by a failed advance.
    pub fn new_game(&mut self, seed: u64) -> Result<(), SimulationError> {
        *self = Self::build(self.config.clone(), seed)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The current day, 0 before the first advance.
    pub const fn day(&self) -> u64 {
        self.clock.day()
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seed of the current game.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration the game was built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Today's weather, `None` before the first advance.
    pub const fn weather_today(&self) -> Option<&WeatherState> {
        self.today.as_ref()
    }

    /// The villagers.
    pub const fn villagers(&self) -> &VillagerDirectory {
        &self.villagers
    }

    /// The garden.
    pub const fn garden(&self) -> &GardenGrid {
        &self.garden
    }

    /// The pets and the adoption pool.
    pub const fn pets(&self) -> &PetRegistry {
        &self.pets
    }

    /// The market.
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// The player's wallet.
    pub const fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// The player's goods and harvest basket.
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Every report since the game began, oldest first.
    pub fn reports(&self) -> &[DailyReport] {
        &self.reports
    }

    /// Reject work while a day is in flight or after a failed advance.
    pub(crate) const fn ensure_idle(&self) -> Result<(), SimulationError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Advancing => Err(SimulationError::DayInProgress {
                day: self.clock.day(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Daily advance
    // -----------------------------------------------------------------------

    /// Advance the village by one day and return its report.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::DayInProgress`] if the game is halted by
    /// an earlier failure. Any subsystem failure during the day is an
    /// invariant violation; the game then stays halted until
    /// [`new_game`](Self::new_game).
    pub fn advance_day(&mut self) -> Result<DailyReport, SimulationError> {
        self.ensure_idle()?;
        self.phase = Phase::Advancing;
        match self.run_day() {
            Ok(report) => {
                self.phase = Phase::Idle;
                Ok(report)
            }
            Err(err) => {
                if err.kind() == ErrorKind::InvariantViolation {
                    error!(day = self.clock.day(), %err, "Daily advance failed, game halted");
                } else {
                    warn!(day = self.clock.day(), %err, "Daily advance failed, game halted");
                }
                Err(err)
            }
        }
    }

    fn run_day(&mut self) -> Result<DailyReport, SimulationError> {
        let day = self.clock.advance()?;
        let season = self.clock.season();
        info!(day, %season, "Day started");

        // Phase 2: weather
        let weather = self.weather.advance(day, season, &mut self.rng)?;

        // Phase 3: villagers
        let villager_events = self.villagers.advance_day(day, &weather, &mut self.rng)?;

        // Phase 4: garden
        let garden_day = self.garden.advance_day(&weather, &mut self.rng);

        // Phase 5: pets, on the villagers' finalized locations
        let sightings = self.villagers.locations();
        let pet_day = self
            .pets
            .advance_day(day, season, &weather, &sightings, &mut self.rng)?;
        for greeting in &pet_day.greetings {
            self.villagers.receive_pet_greeting(
                &greeting.villager,
                &greeting.pet,
                greeting.friendship_bonus,
                day,
            )?;
        }

        // Phase 6: market
        let mut market_events: Vec<String> = self
            .inventory
            .advance_day()
            .iter()
            .map(|key| {
                let name = find_item(key.as_str()).map_or(key.as_str(), |item| item.name);
                format!("Your {name} has gone stale.")
            })
            .collect();
        let ripened = u32::try_from(garden_day.ripened.len()).unwrap_or(u32::MAX);
        market_events.extend(self.market.advance_day(day, season, ripened, &mut self.rng)?);

        // Phase 7: report
        let report = DailyReport {
            day,
            season,
            weather_summary: weather.short_summary(),
            weather_description: weather.description.clone(),
            is_magical: weather.is_magical,
            magical_event: weather.magical_event,
            festivals: weather.festivals.clone(),
            village_mood: weather.village_mood,
            villager_events,
            garden_events: garden_day.events,
            harvests: garden_day
                .ripened
                .iter()
                .map(|crop| format!("{crop} is ready to harvest."))
                .collect(),
            pet_events: pet_day.events,
            found_items: pet_day
                .discoveries
                .iter()
                .map(|found| format!("{} found: {}", found.pet, found.item))
                .collect(),
            market_events,
        };

        debug!(
            day,
            villager_events = report.villager_events.len(),
            garden_events = report.garden_events.len(),
            pet_events = report.pet_events.len(),
            market_events = report.market_events.len(),
            "Report assembled"
        );
        info!(day, sky = %weather.sky, mood = %weather.village_mood, "Day complete");

        self.today = Some(weather);
        self.reports.push(report.clone());
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Forecast
    // -----------------------------------------------------------------------

    /// Project the weather for the next `days` days.
    ///
    /// Runs on copies of the weather engine and the generator, so nothing
    /// committed changes and the next advance is unaffected.
    pub fn forecast(&self, days: usize) -> Result<Vec<WeatherState>, SimulationError> {
        let max = self.config.weather.forecast_horizon;
        if days == 0 || days > max {
            return Err(SimulationError::ForecastRange {
                requested: days,
                max,
            });
        }
        Ok(self.weather.forecast(days, &self.rng)?)
    }
}
