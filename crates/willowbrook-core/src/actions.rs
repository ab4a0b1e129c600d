//! Player actions between days.
//!
//! Each action touches one subsystem, runs synchronously, and is rejected
//! with [`SimulationError::DayInProgress`] unless the simulation is idle.
//! A rejected action changes nothing.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use willowbrook_agents::{Gift, GiftReaction, Pet};
use willowbrook_market::{MarketError, Trade};
use willowbrook_types::{
    ErrorKind, GiftCategory, ItemKey, PetPersonality, QualityTier, Species, VillagerId,
};
use willowbrook_world::Harvest;

use crate::error::SimulationError;
use crate::orchestrator::Simulation;

/// A player-written note, kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Day the entry was written on.
    pub day: u64,
    /// The entry.
    pub text: String,
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    /// One line for the player.
    pub message: String,
    /// Structured result.
    pub detail: ActionDetail,
}

/// Structured result of an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ActionDetail {
    /// A villager's reaction to a gift.
    Gift(GiftReaction),
    /// A crop went into the ground.
    Planted {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
        /// Crop name.
        crop: String,
    },
    /// Plots watered by hand.
    Watered {
        /// How many plots took water.
        plots: usize,
    },
    /// Produce picked and put in the basket.
    Harvest(Harvest),
    /// A plot was emptied.
    Cleared {
        /// Plot row.
        row: usize,
        /// Plot column.
        col: usize,
    },
    /// A new pet joined the household.
    Adopted(Pet),
    /// A pet was petted, fed, or played with.
    PetCare {
        /// The pet.
        pet: String,
        /// Bond points afterwards.
        bond_points: u32,
    },
    /// A market trade.
    Trade(Trade),
    /// A journal entry was written.
    Journal(JournalEntry),
}

impl ActionOutcome {
    fn new(message: impl Into<String>, detail: ActionDetail) -> Self {
        Self {
            message: message.into(),
            detail,
        }
    }
}

/// Wrap harvested produce as a gift: flowers stay flowers, herbs count as
/// foraged finds, everything else is food.
fn harvest_gift(harvest: &Harvest) -> Gift {
    let category = match harvest.crop.as_str() {
        "Tulip" | "Sunflower" | "Lavender" | "Winter Rose" | "Moonbloom" | "Chamomile" => {
            GiftCategory::Flower
        }
        "Sage" | "Basil" | "Frost Mint" => GiftCategory::Foraged,
        _ => GiftCategory::Food,
    };
    Gift::new(
        format!("Fresh {}", harvest.crop),
        category,
        gift_stars(harvest.quality),
    )
}

/// Gift quality for a harvest tier.
const fn gift_stars(quality: QualityTier) -> u8 {
    match quality {
        QualityTier::Normal => 1,
        QualityTier::Silver => 2,
        QualityTier::Gold => 3,
        QualityTier::Iridescent => 5,
    }
}

/// Which care action to give a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Care {
    Pet,
    Feed,
    Play,
}

impl Simulation {
    /// Run `action` only while idle, and log how it went.
    fn act<T>(
        &mut self,
        action: &'static str,
        run: impl FnOnce(&mut Self) -> Result<T, SimulationError>,
    ) -> Result<T, SimulationError> {
        let result = match self.ensure_idle() {
            Ok(()) => run(self),
            Err(err) => Err(err),
        };
        let day = self.clock.day();
        match &result {
            Ok(_) => info!(action, day, "Player action"),
            Err(err) if err.kind() == ErrorKind::InvariantViolation => {
                error!(action, day, %err, "Player action failed");
            }
            Err(err) => warn!(action, day, %err, "Player action rejected"),
        }
        result
    }

    // -----------------------------------------------------------------------
    // Villagers
    // -----------------------------------------------------------------------

    /// Give `gift` to a villager.
    pub fn gift(
        &mut self,
        villager: &VillagerId,
        gift: &Gift,
    ) -> Result<ActionOutcome, SimulationError> {
        self.act("gift", |sim| {
            let day = sim.clock.day();
            let reaction = sim
                .villagers
                .give_gift(villager, gift, &VillagerId::player(), day)?;
            Ok(ActionOutcome::new(
                reaction.message.clone(),
                ActionDetail::Gift(reaction),
            ))
        })
    }

    /// Give a villager one basket entry of `crop`, wrapped as a gift.
    ///
    /// The produce leaves the basket only if the villager accepts it.
    pub fn gift_harvest(
        &mut self,
        villager: &VillagerId,
        crop: &str,
    ) -> Result<ActionOutcome, SimulationError> {
        self.act("gift_harvest", |sim| {
            let harvest = sim
                .inventory
                .basket()
                .iter()
                .find(|harvest| harvest.crop.eq_ignore_ascii_case(crop))
                .ok_or_else(|| MarketError::NoProduce(crop.to_owned()))?;
            let gift = harvest_gift(harvest);
            let day = sim.clock.day();
            let reaction = sim
                .villagers
                .give_gift(villager, &gift, &VillagerId::player(), day)?;
            sim.inventory.take_one_produce(crop)?;
            Ok(ActionOutcome::new(
                reaction.message.clone(),
                ActionDetail::Gift(reaction),
            ))
        })
    }

    // -----------------------------------------------------------------------
    // Garden
    // -----------------------------------------------------------------------

    /// Plant `crop` at (`row`, `col`) for the current season.
    pub fn plant(
        &mut self,
        row: usize,
        col: usize,
        crop: &str,
    ) -> Result<ActionOutcome, SimulationError> {
        self.act("plant", |sim| {
            let season = sim.clock.season();
            let message = sim.garden.plant(row, col, crop, season)?;
            let crop = sim.garden.plot(row, col)?.crop.map_or(crop, |c| c.name);
            Ok(ActionOutcome::new(
                message,
                ActionDetail::Planted {
                    row,
                    col,
                    crop: crop.to_owned(),
                },
            ))
        })
    }

    /// Water one plot.
    pub fn water(&mut self, row: usize, col: usize) -> Result<ActionOutcome, SimulationError> {
        self.act("water", |sim| {
            let message = sim.garden.water(row, col)?;
            Ok(ActionOutcome::new(message, ActionDetail::Watered { plots: 1 }))
        })
    }

    /// Water every living plot that is still dry today.
    pub fn water_all(&mut self) -> Result<ActionOutcome, SimulationError> {
        self.act("water_all", |sim| {
            let lines = sim.garden.water_all();
            let message = if lines.is_empty() {
                "Nothing needed watering.".to_owned()
            } else {
                lines.join(" ")
            };
            Ok(ActionOutcome::new(
                message,
                ActionDetail::Watered { plots: lines.len() },
            ))
        })
    }

    /// Pick a ripe crop and put it in the basket.
    pub fn harvest(&mut self, row: usize, col: usize) -> Result<ActionOutcome, SimulationError> {
        self.act("harvest", |sim| {
            let harvest = sim.garden.harvest(row, col, &mut sim.rng)?;
            sim.inventory.store_harvest(harvest.clone());
            let message = format!(
                "Harvested {} {} ({} quality).",
                harvest.quantity, harvest.crop, harvest.quality
            );
            Ok(ActionOutcome::new(message, ActionDetail::Harvest(harvest)))
        })
    }

    /// Empty a plot, withered or not.
    pub fn clear_plot(&mut self, row: usize, col: usize) -> Result<ActionOutcome, SimulationError> {
        self.act("clear_plot", |sim| {
            let message = sim.garden.clear(row, col)?;
            Ok(ActionOutcome::new(message, ActionDetail::Cleared { row, col }))
        })
    }

    // -----------------------------------------------------------------------
    // Pets
    // -----------------------------------------------------------------------

    /// Adopt the waiting animal of this species and personality.
    pub fn adopt(
        &mut self,
        name: &str,
        species: Species,
        personality: PetPersonality,
    ) -> Result<ActionOutcome, SimulationError> {
        self.act("adopt", |sim| {
            let pet = sim.pets.adopt(name, species, personality)?.clone();
            let message = format!("Welcome home, {}! ({} {})", pet.name, pet.personality, pet.species);
            Ok(ActionOutcome::new(message, ActionDetail::Adopted(pet)))
        })
    }

    /// Give a pet some affection.
    pub fn pet(&mut self, name: &str) -> Result<ActionOutcome, SimulationError> {
        self.act("pet", |sim| sim.care(name, Care::Pet))
    }

    /// Feed a pet. Once a day.
    pub fn feed(&mut self, name: &str) -> Result<ActionOutcome, SimulationError> {
        self.act("feed", |sim| sim.care(name, Care::Feed))
    }

    /// Play with a pet.
    pub fn play(&mut self, name: &str) -> Result<ActionOutcome, SimulationError> {
        self.act("play", |sim| sim.care(name, Care::Play))
    }

    fn care(&mut self, name: &str, care: Care) -> Result<ActionOutcome, SimulationError> {
        let message = match care {
            Care::Pet => self.pets.pet_animal(name)?,
            Care::Feed => self.pets.feed(name)?,
            Care::Play => self.pets.play(name)?,
        };
        let pet = self.pets.pet(name)?;
        Ok(ActionOutcome::new(
            message,
            ActionDetail::PetCare {
                pet: pet.name.clone(),
                bond_points: pet.bond_points,
            },
        ))
    }

    // -----------------------------------------------------------------------
    // Market
    // -----------------------------------------------------------------------

    /// Buy goods at the current price plus tax.
    pub fn buy(&mut self, item: &ItemKey, quantity: u32) -> Result<ActionOutcome, SimulationError> {
        self.act("buy", |sim| {
            let trade = sim
                .market
                .buy(&mut sim.wallet, &mut sim.inventory, item, quantity)?;
            Ok(ActionOutcome::new(trade.to_string(), ActionDetail::Trade(trade)))
        })
    }

    /// Sell fresh goods back to the market.
    pub fn sell(&mut self, item: &ItemKey, quantity: u32) -> Result<ActionOutcome, SimulationError> {
        self.act("sell", |sim| {
            let trade = sim
                .market
                .sell(&mut sim.wallet, &mut sim.inventory, item, quantity)?;
            Ok(ActionOutcome::new(trade.to_string(), ActionDetail::Trade(trade)))
        })
    }

    /// Sell every basket entry of one crop.
    pub fn sell_harvest(&mut self, crop: &str) -> Result<ActionOutcome, SimulationError> {
        self.act("sell_harvest", |sim| {
            let trade = sim
                .market
                .sell_harvest(&mut sim.wallet, &mut sim.inventory, crop)?;
            Ok(ActionOutcome::new(trade.to_string(), ActionDetail::Trade(trade)))
        })
    }

    // -----------------------------------------------------------------------
    // Journal
    // -----------------------------------------------------------------------

    /// Write a journal entry for today.
    pub fn write_journal(&mut self, text: &str) -> Result<ActionOutcome, SimulationError> {
        self.act("write_journal", |sim| {
            if text.trim().is_empty() {
                return Err(SimulationError::EmptyJournalEntry);
            }
            let entry = JournalEntry {
                day: sim.clock.day(),
                text: text.to_owned(),
            };
            sim.journal.push(entry.clone());
            Ok(ActionOutcome::new(
                format!("Journal entry saved for day {}.", entry.day),
                ActionDetail::Journal(entry),
            ))
        })
    }

    /// Every journal entry, oldest first.
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::SimulationConfig;
    use crate::orchestrator::Phase;

    fn new_sim() -> Simulation {
        Simulation::new(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn gifts_warm_a_villager_toward_the_player() {
        let mut sim = new_sim();
        let lily = VillagerId::new("lily");
        let outcome = sim
            .gift(&lily, &Gift::new("Bluebells", GiftCategory::Flower, 5))
            .unwrap();
        let ActionDetail::Gift(reaction) = outcome.detail else {
            panic!("expected a gift reaction");
        };
        assert!(reaction.points > 0);
        assert!(reaction.points >= 15);
        assert_eq!(outcome.message, reaction.message);
    }

    fn basket_of(crop: &str, quality: QualityTier) -> Harvest {
        Harvest {
            crop: crop.to_owned(),
            quality,
            quantity: 1,
            base_price: dec!(3.00),
        }
    }

    #[test]
    fn harvests_become_gifts_by_kind_and_quality() {
        let tulip = harvest_gift(&basket_of("Tulip", QualityTier::Gold));
        assert_eq!(tulip.name, "Fresh Tulip");
        assert_eq!(tulip.category, GiftCategory::Flower);
        assert_eq!(tulip.quality, 3);

        let mint = harvest_gift(&basket_of("Frost Mint", QualityTier::Iridescent));
        assert_eq!(mint.category, GiftCategory::Foraged);
        assert_eq!(mint.quality, 5);

        let pumpkin = harvest_gift(&basket_of("Pumpkin", QualityTier::Normal));
        assert_eq!(pumpkin.category, GiftCategory::Food);
        assert_eq!(pumpkin.quality, 1);
        assert_eq!(gift_stars(QualityTier::Silver), 2);
    }

    #[test]
    fn gifting_a_harvest_takes_one_entry_from_the_basket() {
        let mut sim = new_sim();
        sim.inventory.store_harvest(basket_of("Tulip", QualityTier::Silver));
        sim.inventory.store_harvest(basket_of("Tulip", QualityTier::Normal));

        let outcome = sim.gift_harvest(&VillagerId::new("lily"), "tulip").unwrap();
        let ActionDetail::Gift(reaction) = outcome.detail else {
            panic!("expected a gift reaction");
        };
        assert!(reaction.points > 0);
        assert_eq!(sim.inventory.basket().len(), 1);
        assert_eq!(sim.inventory.basket()[0].quality, QualityTier::Normal);
    }

    #[test]
    fn a_refused_harvest_gift_stays_in_the_basket() {
        let mut sim = new_sim();
        sim.inventory.store_harvest(basket_of("Pea", QualityTier::Normal));

        let err = sim.gift_harvest(&VillagerId::new("nobody"), "Pea").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(sim.inventory.basket().len(), 1);

        let err = sim.gift_harvest(&VillagerId::new("lily"), "Pumpkin").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientResource);
        assert_eq!(sim.inventory.basket().len(), 1);
    }

    #[test]
    fn gifts_to_strangers_of_the_village_are_rejected() {
        let mut sim = new_sim();
        let err = sim
            .gift(&VillagerId::new("nobody"), &Gift::new("Rock", GiftCategory::Foraged, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn planting_an_occupied_plot_changes_nothing() {
        let mut sim = new_sim();
        sim.plant(0, 0, "Pea").unwrap();
        let before = sim.garden().plot(0, 0).unwrap().clone();

        let err = sim.plant(0, 0, "Tulip").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(sim.garden().plot(0, 0).unwrap(), &before);
    }

    #[test]
    fn water_then_clear() {
        let mut sim = new_sim();
        sim.plant(1, 1, "Basil").unwrap();
        let outcome = sim.water(1, 1).unwrap();
        assert_eq!(outcome.detail, ActionDetail::Watered { plots: 1 });
        assert!(sim.water(1, 1).is_err());

        sim.clear_plot(1, 1).unwrap();
        assert!(sim.garden().plot(1, 1).unwrap().is_empty());
    }

    #[test]
    fn unripe_crops_stay_in_the_ground() {
        let mut sim = new_sim();
        sim.plant(0, 2, "Pea").unwrap();
        assert!(sim.harvest(0, 2).is_err());
        assert!(sim.inventory().basket().is_empty());
    }

    #[test]
    fn buy_then_sell() {
        let mut sim = new_sim();
        let scone = ItemKey::new("lavender_scone");
        sim.buy(&scone, 2).unwrap();
        assert_eq!(sim.inventory().quantity(&scone), 2);
        assert!(sim.wallet().balance() < dec!(50));

        sim.sell(&scone, 1).unwrap();
        assert_eq!(sim.inventory().quantity(&scone), 1);
        assert_eq!(sim.market().trade_log().len(), 2);
    }

    #[test]
    fn overselling_leaves_wallet_and_inventory_alone() {
        let mut sim = new_sim();
        let tart = ItemKey::new("berry_tart");
        sim.buy(&tart, 1).unwrap();
        let coins = sim.wallet().balance();

        let err = sim.sell(&tart, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientResource);
        assert_eq!(sim.wallet().balance(), coins);
        assert_eq!(sim.inventory().quantity(&tart), 1);
    }

    #[test]
    fn pet_care_reports_the_bond() {
        let mut sim = new_sim();
        sim.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
        let outcome = sim.feed("Biscuit").unwrap();
        assert_eq!(
            outcome.detail,
            ActionDetail::PetCare {
                pet: "Biscuit".to_owned(),
                bond_points: sim.pets().pet("Biscuit").unwrap().bond_points,
            }
        );
        assert!(sim.feed("Biscuit").is_err());
        assert!(sim.pet("Biscuit").is_ok());
    }

    #[test]
    fn journal_keeps_entries_verbatim() {
        let mut sim = new_sim();
        sim.write_journal("  The pond froze over.  ").unwrap();
        assert_eq!(sim.journal().len(), 1);
        assert_eq!(sim.journal().first().unwrap().text, "  The pond froze over.  ");

        let err = sim.write_journal("   ").unwrap_err();
        assert!(matches!(err, SimulationError::EmptyJournalEntry));
        assert_eq!(sim.journal().len(), 1);
    }

    #[test]
    fn actions_wait_for_the_day_to_finish() {
        let mut sim = new_sim();
        sim.phase = Phase::Advancing;

        assert_eq!(sim.plant(0, 0, "Pea").unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(
            sim.buy(&ItemKey::new("sourdough_loaf"), 1).unwrap_err().kind(),
            ErrorKind::Conflict
        );
        assert!(sim.garden().plot(0, 0).unwrap().is_empty());
        assert_eq!(sim.wallet().balance(), dec!(50));
    }

    #[test]
    fn outcomes_serialize_with_a_kind_tag() {
        let mut sim = new_sim();
        let outcome = sim.write_journal("First frost.").unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["detail"]["kind"], "journal");
        assert_eq!(json["detail"]["data"]["text"], "First frost.");
    }
}
