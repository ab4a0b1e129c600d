//! The player's coins, goods, and basket of harvested produce.
//!
//! Goods carry an age in days. Spoilage is never stored: a slot is spoiled
//! whenever its age has reached the item's shelf life, checked on read.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use willowbrook_types::ItemKey;
use willowbrook_world::Harvest;

use crate::catalog::find_item;
use crate::error::MarketError;

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A coin balance that never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    coins: Decimal,
}

impl Wallet {
    /// Create a wallet holding `coins`.
    pub const fn new(coins: Decimal) -> Self {
        Self { coins }
    }

    /// Current balance.
    pub const fn balance(&self) -> Decimal {
        self.coins
    }

    /// Whether the balance covers `amount`.
    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.coins >= amount
    }

    /// Add coins.
    pub fn deposit(&mut self, amount: Decimal) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Remove coins, or fail without touching the balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), MarketError> {
        if !self.can_afford(amount) {
            return Err(MarketError::InsufficientFunds {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins = self.coins.saturating_sub(amount);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Units of one good and how long they have been held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSlot {
    /// Units held.
    pub quantity: u32,
    /// Days since the oldest unit was made.
    pub age_days: u32,
}

/// One row of the inventory as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    /// Item key.
    pub key: ItemKey,
    /// Display name.
    pub name: String,
    /// Units held.
    pub quantity: u32,
    /// Age in days.
    pub age_days: u32,
    /// Whether the units are past their shelf life.
    pub spoiled: bool,
}

/// Market goods keyed by item, plus harvested produce awaiting sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    goods: BTreeMap<ItemKey, StockSlot>,
    basket: Vec<Harvest>,
}

impl Inventory {
    /// An empty inventory.
    pub const fn new() -> Self {
        Self {
            goods: BTreeMap::new(),
            basket: Vec::new(),
        }
    }

    /// Units of `key` held.
    pub fn quantity(&self, key: &ItemKey) -> u32 {
        self.goods.get(key).map_or(0, |slot| slot.quantity)
    }

    /// The slot for `key`, if any units are held.
    pub fn slot(&self, key: &ItemKey) -> Option<&StockSlot> {
        self.goods.get(key)
    }

    /// Whether the units of `key` have spoiled.
    pub fn is_spoiled(&self, key: &ItemKey) -> bool {
        match (self.goods.get(key), find_item(key.as_str())) {
            (Some(slot), Some(item)) => item.is_spoiled_at(slot.age_days),
            _ => false,
        }
    }

    /// Add units of `key` at `age_days`. When merging into an existing
    /// slot, the older age wins.
    pub fn add(&mut self, key: ItemKey, quantity: u32, age_days: u32) {
        let slot = self.goods.entry(key).or_insert(StockSlot {
            quantity: 0,
            age_days,
        });
        slot.quantity = slot.quantity.saturating_add(quantity);
        slot.age_days = slot.age_days.max(age_days);
    }

    /// Take `quantity` units of `key`, returning the slot's age.
    pub fn remove(&mut self, key: &ItemKey, quantity: u32) -> Result<u32, MarketError> {
        let held = self.quantity(key);
        let slot = match self.goods.get_mut(key) {
            Some(slot) if slot.quantity >= quantity => slot,
            _ => {
                return Err(MarketError::InsufficientStock {
                    item: key.clone(),
                    held,
                    requested: quantity,
                });
            }
        };
        slot.quantity = slot.quantity.saturating_sub(quantity);
        let age = slot.age_days;
        if slot.quantity == 0 {
            self.goods.remove(key);
        }
        Ok(age)
    }

    /// Age every slot by one day and return the keys that spoiled today.
    pub fn advance_day(&mut self) -> Vec<ItemKey> {
        let mut spoiled = Vec::new();
        for (key, slot) in &mut self.goods {
            slot.age_days = slot.age_days.saturating_add(1);
            let life = find_item(key.as_str()).and_then(|item| item.shelf_life);
            if life == Some(slot.age_days) {
                spoiled.push(key.clone());
            }
        }
        spoiled
    }

    /// Rows for display, in key order.
    pub fn lines(&self) -> Vec<InventoryLine> {
        self.goods
            .iter()
            .map(|(key, slot)| {
                let item = find_item(key.as_str());
                InventoryLine {
                    key: key.clone(),
                    name: item.map_or_else(|| key.to_string(), |item| item.name.to_owned()),
                    quantity: slot.quantity,
                    age_days: slot.age_days,
                    spoiled: item.is_some_and(|item| item.is_spoiled_at(slot.age_days)),
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Produce basket
    // -----------------------------------------------------------------------

    /// Put freshly harvested produce in the basket.
    pub fn store_harvest(&mut self, harvest: Harvest) {
        self.basket.push(harvest);
    }

    /// Produce waiting to be sold.
    pub fn basket(&self) -> &[Harvest] {
        &self.basket
    }

    /// Remove the oldest basket entry for `crop` (case-insensitive).
    pub fn take_one_produce(&mut self, crop: &str) -> Result<Harvest, MarketError> {
        let index = self
            .basket
            .iter()
            .position(|harvest| harvest.crop.eq_ignore_ascii_case(crop))
            .ok_or_else(|| MarketError::NoProduce(crop.to_owned()))?;
        Ok(self.basket.remove(index))
    }

    /// Remove every basket entry for `crop` (case-insensitive).
    pub fn take_produce(&mut self, crop: &str) -> Result<Vec<Harvest>, MarketError> {
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .basket
            .drain(..)
            .partition(|harvest| harvest.crop.eq_ignore_ascii_case(crop));
        self.basket = kept;
        if taken.is_empty() {
            return Err(MarketError::NoProduce(crop.to_owned()));
        }
        Ok(taken)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use willowbrook_types::QualityTier;

    use super::*;

    fn key(k: &str) -> ItemKey {
        ItemKey::from(k)
    }

    #[test]
    fn withdraw_refuses_overdraft() {
        let mut wallet = Wallet::new(dec!(5.00));
        let err = wallet.withdraw(dec!(6.30)).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientFunds {
                needed: dec!(6.30),
                available: dec!(5.00),
            }
        );
        assert_eq!(wallet.balance(), dec!(5.00));

        wallet.withdraw(dec!(1.25)).unwrap();
        wallet.deposit(dec!(0.50));
        assert_eq!(wallet.balance(), dec!(4.25));
    }

    #[test]
    fn merge_keeps_the_older_age() {
        let mut inventory = Inventory::new();
        inventory.add(key("honey_cake"), 2, 3);
        inventory.add(key("honey_cake"), 1, 0);
        let slot = inventory.slot(&key("honey_cake")).unwrap();
        assert_eq!(slot.quantity, 3);
        assert_eq!(slot.age_days, 3);
    }

    #[test]
    fn spoilage_is_read_from_age() {
        let mut inventory = Inventory::new();
        inventory.add(key("berry_tart"), 1, 0);
        inventory.add(key("frost_tonic"), 1, 0);

        assert!(inventory.advance_day().is_empty());
        assert!(inventory.advance_day().is_empty());
        assert!(!inventory.is_spoiled(&key("berry_tart")));

        assert_eq!(inventory.advance_day(), vec![key("berry_tart")]);
        assert!(inventory.is_spoiled(&key("berry_tart")));
        assert!(!inventory.is_spoiled(&key("frost_tonic")));

        // Reported once, when it turns.
        assert!(inventory.advance_day().is_empty());
        assert!(inventory.lines().iter().any(|line| line.spoiled));
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut inventory = Inventory::new();
        inventory.add(key("sleep_draught"), 2, 4);
        let before = inventory.clone();

        assert!(inventory.remove(&key("sleep_draught"), 3).is_err());
        assert_eq!(inventory, before);

        assert_eq!(inventory.remove(&key("sleep_draught"), 2).unwrap(), 4);
        assert_eq!(inventory.quantity(&key("sleep_draught")), 0);
        assert!(inventory.slot(&key("sleep_draught")).is_none());
    }

    #[test]
    fn one_entry_at_a_time_leaves_the_rest() {
        let mut inventory = Inventory::new();
        for quality in [QualityTier::Silver, QualityTier::Normal] {
            inventory.store_harvest(Harvest {
                crop: "Tulip".to_owned(),
                quality,
                quantity: 1,
                base_price: dec!(3.00),
            });
        }

        assert_eq!(inventory.take_one_produce("tulip").unwrap().quality, QualityTier::Silver);
        assert_eq!(inventory.basket().len(), 1);
        assert_eq!(
            inventory.take_one_produce("Pea").unwrap_err(),
            MarketError::NoProduce("Pea".to_owned())
        );
        assert_eq!(inventory.basket().len(), 1);
    }

    #[test]
    fn basket_takes_by_crop_name() {
        let mut inventory = Inventory::new();
        inventory.store_harvest(Harvest {
            crop: "Pea".to_owned(),
            quality: QualityTier::Normal,
            quantity: 1,
            base_price: dec!(2.50),
        });
        inventory.store_harvest(Harvest {
            crop: "Pumpkin".to_owned(),
            quality: QualityTier::Gold,
            quantity: 2,
            base_price: dec!(8.00),
        });

        let peas = inventory.take_produce("pea").unwrap();
        assert_eq!(peas.len(), 1);
        assert_eq!(inventory.basket().len(), 1);
        assert_eq!(
            inventory.take_produce("Pea").unwrap_err(),
            MarketError::NoProduce("Pea".to_owned())
        );
    }
}
