//! The village market: daily price drift, buying, selling, and produce.
//!
//! # Pricing
//!
//! Each listing carries a multiplier on its base price. Every day the
//! multiplier takes a bounded random step plus a pull toward the season's
//! demand multiplier, and is clamped to `[price_floor, price_ceiling]`.
//! Prices are rounded to cents and must stay positive.
//!
//! # Produce
//!
//! Harvested crops are sold at their catalogue value scaled by the produce
//! index. A glut of ripening crops lowers the index for the day.

use std::collections::BTreeMap;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use willowbrook_types::{ItemKey, Season};

use crate::catalog::{CATALOG, CatalogItem, ItemCategory, find_item};
use crate::error::MarketError;
use crate::wallet::{Inventory, Wallet};

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Market balance constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketTuning {
    /// Tax added on top of every purchase.
    pub tax_rate: Decimal,
    /// Fraction of the current price paid back when selling goods.
    pub sell_spread: Decimal,
    /// Lowest multiplier of base price.
    pub price_floor: Decimal,
    /// Highest multiplier of base price.
    pub price_ceiling: Decimal,
    /// Largest random move of the multiplier per day.
    pub drift_step: Decimal,
    /// Share of the gap to the seasonal target closed each day.
    pub seasonal_pull: Decimal,
    /// Produce index drop per ripened crop.
    pub produce_step: Decimal,
    /// Largest produce index drop in one day.
    pub produce_cap: Decimal,
    /// Coins in the player's wallet at the start of a game.
    pub starting_coins: Decimal,
}

impl Default for MarketTuning {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(5, 2),
            sell_spread: Decimal::new(80, 2),
            price_floor: Decimal::new(5, 1),
            price_ceiling: Decimal::new(20, 1),
            drift_step: Decimal::new(5, 2),
            seasonal_pull: Decimal::new(25, 2),
            produce_step: Decimal::new(1, 2),
            produce_cap: Decimal::new(10, 2),
            starting_coins: Decimal::new(50, 0),
        }
    }
}

/// Price change that earns a line in the daily report.
const NOTABLE_MOVE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

// ---------------------------------------------------------------------------
// Listings and trades
// ---------------------------------------------------------------------------

/// Live price state of one catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Item key.
    pub key: ItemKey,
    /// Current multiplier on base price.
    pub multiplier: Decimal,
    /// Current unit price.
    pub price: Decimal,
    /// Unit price before the last drift.
    pub previous_price: Decimal,
}

/// Which way coins moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    /// The player bought goods.
    Buy,
    /// The player sold goods back.
    Sell,
    /// The player sold harvested crops.
    Produce,
}

/// A completed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Day of the trade.
    pub day: u64,
    /// Buy, sell, or produce sale.
    pub kind: TradeKind,
    /// Display name of what changed hands.
    pub item: String,
    /// Units moved.
    pub quantity: u32,
    /// Price per unit before tax.
    pub unit_price: Decimal,
    /// Coins paid or received.
    pub total: Decimal,
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TradeKind::Buy => write!(
                f,
                "Bought {} {} for {} coins (tax included).",
                self.quantity, self.item, self.total
            ),
            TradeKind::Sell => write!(
                f,
                "Sold {} {} for {} coins.",
                self.quantity, self.item, self.total
            ),
            TradeKind::Produce => write!(
                f,
                "Sold {} {} from the garden for {} coins.",
                self.quantity, self.item, self.total
            ),
        }
    }
}

/// One row of the price board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    /// Item key.
    pub key: ItemKey,
    /// Display name.
    pub name: &'static str,
    /// Baked good or potion.
    pub category: ItemCategory,
    /// Current unit price.
    pub price: Decimal,
    /// Catalogue base price.
    pub base_price: Decimal,
    /// Shelf life in days, `None` for goods that keep.
    pub shelf_life: Option<u32>,
}

/// Every current price plus the produce index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBoard {
    /// Day of the last drift.
    pub day: u64,
    /// Season the prices belong to.
    pub season: Season,
    /// Multiplier applied to crop sales today.
    pub produce_index: Decimal,
    /// Quotes in catalogue order.
    pub quotes: Vec<PriceQuote>,
}

/// Aggregates over the trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeSummary {
    /// Trades completed.
    pub total_trades: usize,
    /// Units moved across all trades.
    pub total_volume: u32,
    /// Item with the most units moved.
    pub top_item: Option<String>,
    /// Coins paid for goods, tax included.
    pub coins_spent: Decimal,
    /// Coins received from sales.
    pub coins_earned: Decimal,
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// The market's price state and trade history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    tuning: MarketTuning,
    day: u64,
    season: Season,
    listings: Vec<Listing>,
    produce_index: Decimal,
    trade_log: Vec<Trade>,
}

impl Market {
    /// Open a market with every price at its seasonal level.
    pub fn new(tuning: MarketTuning, season: Season) -> Self {
        let listings = CATALOG
            .iter()
            .map(|item| {
                let multiplier = clamp(
                    item.seasonal_multiplier(season),
                    tuning.price_floor,
                    tuning.price_ceiling,
                );
                let price = item.base_price().saturating_mul(multiplier).round_dp(2);
                Listing {
                    key: ItemKey::from(item.key),
                    multiplier,
                    price,
                    previous_price: price,
                }
            })
            .collect();
        Self {
            tuning,
            day: 0,
            season,
            listings,
            produce_index: Decimal::ONE,
            trade_log: Vec::new(),
        }
    }

    /// Balance constants in use.
    pub const fn tuning(&self) -> &MarketTuning {
        &self.tuning
    }

    /// Season of the current prices.
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Multiplier applied to crop sales.
    pub const fn produce_index(&self) -> Decimal {
        self.produce_index
    }

    /// Every listing in catalogue order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Completed trades, oldest first.
    pub fn trade_log(&self) -> &[Trade] {
        &self.trade_log
    }

    /// The listing for `key`.
    pub fn listing(&self, key: &ItemKey) -> Result<&Listing, MarketError> {
        self.listings
            .iter()
            .find(|listing| &listing.key == key)
            .ok_or_else(|| MarketError::UnknownItem(key.clone()))
    }

    /// Current unit price of `key`.
    pub fn compute_price(&self, key: &ItemKey) -> Result<Decimal, MarketError> {
        self.listing(key).map(|listing| listing.price)
    }

    // -----------------------------------------------------------------------
    // Daily drift
    // -----------------------------------------------------------------------

    /// Drift every price one day and set the produce index from the number
    /// of crops that ripened today.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NonPositivePrice`] if any price would drift to
    /// zero or below.
    pub fn advance_day(
        &mut self,
        day: u64,
        season: Season,
        ripened: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<String>, MarketError> {
        let mut events = Vec::new();
        if season != self.season {
            events.push(format!("The market restocks its shelves for {season}."));
        }

        let tuning = &self.tuning;
        for listing in &mut self.listings {
            let Some(item) = find_item(listing.key.as_str()) else {
                continue;
            };
            let step = tuning
                .drift_step
                .saturating_mul(Decimal::new(rng.random_range(-1000..=1000), 3));
            let pull = item
                .seasonal_multiplier(season)
                .saturating_sub(listing.multiplier)
                .saturating_mul(tuning.seasonal_pull);
            let multiplier = clamp(
                listing.multiplier.saturating_add(step).saturating_add(pull),
                tuning.price_floor,
                tuning.price_ceiling,
            )
            .round_dp(4);
            let price = item.base_price().saturating_mul(multiplier).round_dp(2);

            if price <= Decimal::ZERO {
                error!(item = item.key, %price, day, "market price drifted out of range");
                return Err(MarketError::NonPositivePrice {
                    item: listing.key.clone(),
                    price,
                });
            }

            listing.previous_price = listing.price;
            listing.multiplier = multiplier;
            listing.price = price;
            if let Some(line) = notable_move(item, listing) {
                events.push(line);
            }
        }

        let dip = tuning
            .produce_step
            .saturating_mul(Decimal::from(ripened))
            .min(tuning.produce_cap);
        self.produce_index = Decimal::ONE.saturating_sub(dip);
        if ripened > 0 {
            events.push(format!(
                "Fresh produce fills the stalls; crop prices dip {}%.",
                dip.saturating_mul(Decimal::ONE_HUNDRED).normalize()
            ));
        }

        self.day = day;
        self.season = season;
        debug!(
            day,
            %season,
            produce_index = %self.produce_index,
            events = events.len(),
            "market drift complete"
        );
        Ok(events)
    }

    // -----------------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------------

    /// Buy `quantity` units of `key` at the current price plus tax.
    ///
    /// The wallet is charged before the goods are added; if it cannot pay,
    /// neither changes.
    pub fn buy(
        &mut self,
        wallet: &mut Wallet,
        inventory: &mut Inventory,
        key: &ItemKey,
        quantity: u32,
    ) -> Result<Trade, MarketError> {
        if quantity == 0 {
            return Err(MarketError::ZeroQuantity);
        }
        let unit_price = self.compute_price(key)?;
        let subtotal = unit_price.saturating_mul(Decimal::from(quantity));
        let tax = subtotal.saturating_mul(self.tuning.tax_rate).round_dp(2);
        let total = subtotal.saturating_add(tax);

        wallet.withdraw(total)?;
        inventory.add(key.clone(), quantity, 0);

        let trade = self.record(TradeKind::Buy, display_name(key), quantity, unit_price, total);
        info!(item = %key, quantity, %total, "bought at market");
        Ok(trade)
    }

    /// Sell `quantity` fresh units of `key` back at the sell spread.
    pub fn sell(
        &mut self,
        wallet: &mut Wallet,
        inventory: &mut Inventory,
        key: &ItemKey,
        quantity: u32,
    ) -> Result<Trade, MarketError> {
        if quantity == 0 {
            return Err(MarketError::ZeroQuantity);
        }
        let unit_price = self.compute_price(key)?;
        let held = inventory.quantity(key);
        if held < quantity {
            return Err(MarketError::InsufficientStock {
                item: key.clone(),
                held,
                requested: quantity,
            });
        }
        if inventory.is_spoiled(key) {
            return Err(MarketError::Spoiled(key.clone()));
        }

        let total = unit_price
            .saturating_mul(self.tuning.sell_spread)
            .saturating_mul(Decimal::from(quantity))
            .round_dp(2);
        inventory.remove(key, quantity)?;
        wallet.deposit(total);

        let trade = self.record(TradeKind::Sell, display_name(key), quantity, unit_price, total);
        info!(item = %key, quantity, %total, "sold at market");
        Ok(trade)
    }

    /// Sell every basket entry of `crop` at its value times the produce index.
    pub fn sell_harvest(
        &mut self,
        wallet: &mut Wallet,
        inventory: &mut Inventory,
        crop: &str,
    ) -> Result<Trade, MarketError> {
        let harvests = inventory.take_produce(crop)?;
        let quantity = harvests
            .iter()
            .fold(0_u32, |sum, harvest| sum.saturating_add(harvest.quantity));
        let value = harvests
            .iter()
            .fold(Decimal::ZERO, |sum, harvest| sum.saturating_add(harvest.value()));
        let total = value.saturating_mul(self.produce_index).round_dp(2);
        let unit_price = total
            .checked_div(Decimal::from(quantity.max(1)))
            .unwrap_or_default()
            .round_dp(2);
        wallet.deposit(total);

        let name = harvests
            .first()
            .map_or_else(|| crop.to_owned(), |harvest| harvest.crop.clone());
        let trade = self.record(TradeKind::Produce, name, quantity, unit_price, total);
        info!(crop, quantity, %total, "sold produce");
        Ok(trade)
    }

    fn record(
        &mut self,
        kind: TradeKind,
        item: String,
        quantity: u32,
        unit_price: Decimal,
        total: Decimal,
    ) -> Trade {
        let trade = Trade {
            day: self.day,
            kind,
            item,
            quantity,
            unit_price,
            total,
        };
        self.trade_log.push(trade.clone());
        trade
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Current prices in catalogue order.
    pub fn price_board(&self) -> PriceBoard {
        let quotes = self
            .listings
            .iter()
            .filter_map(|listing| {
                let item = find_item(listing.key.as_str())?;
                Some(PriceQuote {
                    key: listing.key.clone(),
                    name: item.name,
                    category: item.category,
                    price: listing.price,
                    base_price: item.base_price(),
                    shelf_life: item.shelf_life,
                })
            })
            .collect();
        PriceBoard {
            day: self.day,
            season: self.season,
            produce_index: self.produce_index,
            quotes,
        }
    }

    /// Totals over every completed trade.
    pub fn trade_summary(&self) -> TradeSummary {
        let mut volume: BTreeMap<&str, u32> = BTreeMap::new();
        let mut total_volume = 0_u32;
        let mut coins_spent = Decimal::ZERO;
        let mut coins_earned = Decimal::ZERO;
        for trade in &self.trade_log {
            let units = volume.entry(trade.item.as_str()).or_insert(0);
            *units = units.saturating_add(trade.quantity);
            total_volume = total_volume.saturating_add(trade.quantity);
            match trade.kind {
                TradeKind::Buy => coins_spent = coins_spent.saturating_add(trade.total),
                TradeKind::Sell | TradeKind::Produce => {
                    coins_earned = coins_earned.saturating_add(trade.total);
                }
            }
        }
        let top_item = volume
            .iter()
            .max_by_key(|(_, units)| **units)
            .map(|(name, _)| (*name).to_owned());
        TradeSummary {
            total_trades: self.trade_log.len(),
            total_volume,
            top_item,
            coins_spent,
            coins_earned,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp without panicking on an inverted range; the ceiling wins.
fn clamp(value: Decimal, floor: Decimal, ceiling: Decimal) -> Decimal {
    value.max(floor).min(ceiling)
}

fn display_name(key: &ItemKey) -> String {
    find_item(key.as_str()).map_or_else(|| key.to_string(), |item| item.name.to_owned())
}

/// A report line when a price moved by at least [`NOTABLE_MOVE`].
fn notable_move(item: &CatalogItem, listing: &Listing) -> Option<String> {
    let change = listing
        .price
        .saturating_sub(listing.previous_price)
        .checked_div(listing.previous_price)?;
    if change.abs() < NOTABLE_MOVE {
        return None;
    }
    let direction = if change.is_sign_positive() { "rose" } else { "fell" };
    Some(format!(
        "{} {direction} to {} coins.",
        item.name, listing.price
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use willowbrook_types::QualityTier;
    use willowbrook_world::Harvest;

    use super::*;

    fn key(k: &str) -> ItemKey {
        ItemKey::from(k)
    }

    fn spring_market() -> Market {
        Market::new(MarketTuning::default(), Season::Spring)
    }

    fn pin_price(market: &mut Market, k: &str, price: Decimal) {
        let listing = market
            .listings
            .iter_mut()
            .find(|listing| listing.key.as_str() == k)
            .unwrap();
        listing.price = price;
    }

    #[test]
    fn opens_at_seasonal_prices() {
        let market = spring_market();
        assert_eq!(market.compute_price(&key("honey_cake")).unwrap(), dec!(7.00));
        assert_eq!(market.compute_price(&key("cinnamon_roll")).unwrap(), dec!(2.75));
        assert_eq!(
            market.compute_price(&key("rock_cake")).unwrap_err().kind(),
            willowbrook_types::ErrorKind::Validation
        );
    }

    #[test]
    fn buy_without_funds_changes_nothing() {
        let mut market = spring_market();
        pin_price(&mut market, "cinnamon_roll", dec!(2.00));
        let mut wallet = Wallet::new(dec!(5.00));
        let mut inventory = Inventory::new();

        let err = market
            .buy(&mut wallet, &mut inventory, &key("cinnamon_roll"), 3)
            .unwrap_err();
        assert_eq!(err.kind(), willowbrook_types::ErrorKind::InsufficientResource);
        assert_eq!(wallet.balance(), dec!(5.00));
        assert_eq!(inventory, Inventory::new());
        assert!(market.trade_log().is_empty());

        let trade = market
            .buy(&mut wallet, &mut inventory, &key("cinnamon_roll"), 2)
            .unwrap();
        assert_eq!(trade.total, dec!(4.20));
        assert_eq!(wallet.balance(), dec!(0.80));
        assert_eq!(inventory.quantity(&key("cinnamon_roll")), 2);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut market = spring_market();
        let mut wallet = Wallet::new(dec!(50));
        let mut inventory = Inventory::new();
        assert_eq!(
            market.buy(&mut wallet, &mut inventory, &key("honey_cake"), 0),
            Err(MarketError::ZeroQuantity)
        );
    }

    #[test]
    fn selling_pays_the_spread() {
        let mut market = spring_market();
        let mut wallet = Wallet::new(dec!(0));
        let mut inventory = Inventory::new();
        inventory.add(key("healing_potion"), 2, 0);

        // 12.00 * 0.9 in spring = 10.80; 80% of two units.
        let trade = market
            .sell(&mut wallet, &mut inventory, &key("healing_potion"), 2)
            .unwrap();
        assert_eq!(trade.total, dec!(17.28));
        assert_eq!(wallet.balance(), dec!(17.28));
        assert_eq!(inventory.quantity(&key("healing_potion")), 0);
    }

    #[test]
    fn overselling_changes_nothing() {
        let mut market = spring_market();
        let mut wallet = Wallet::new(dec!(1.00));
        let mut inventory = Inventory::new();
        inventory.add(key("sleep_draught"), 1, 0);
        let before = inventory.clone();

        let err = market
            .sell(&mut wallet, &mut inventory, &key("sleep_draught"), 2)
            .unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientStock {
                item: key("sleep_draught"),
                held: 1,
                requested: 2,
            }
        );
        assert_eq!(wallet.balance(), dec!(1.00));
        assert_eq!(inventory, before);
    }

    #[test]
    fn spoiled_goods_do_not_sell() {
        let mut market = spring_market();
        let mut wallet = Wallet::new(dec!(0));
        let mut inventory = Inventory::new();
        inventory.add(key("lavender_scone"), 1, 3);

        assert_eq!(
            market.sell(&mut wallet, &mut inventory, &key("lavender_scone"), 1),
            Err(MarketError::Spoiled(key("lavender_scone")))
        );
        assert_eq!(inventory.quantity(&key("lavender_scone")), 1);
    }

    #[test]
    fn drift_stays_in_bounds() {
        let mut market = spring_market();
        let mut rng = StdRng::seed_from_u64(7);
        for day in 1..=448_u64 {
            let season = Season::from_index(usize::try_from(day.saturating_sub(1) / 28).unwrap());
            market.advance_day(day, season, 0, &mut rng).unwrap();
            for listing in market.listings() {
                assert!(listing.price > Decimal::ZERO);
                assert!(listing.multiplier >= dec!(0.5));
                assert!(listing.multiplier <= dec!(2.0));
            }
        }
    }

    #[test]
    fn drift_follows_seasonal_demand() {
        let mut market = spring_market();
        let mut rng = StdRng::seed_from_u64(11);
        for day in 1..=28 {
            market.advance_day(day, Season::Winter, 0, &mut rng).unwrap();
        }
        let tonic = market.listing(&key("frost_tonic")).unwrap();
        assert!(tonic.multiplier > dec!(1.6), "got {}", tonic.multiplier);
    }

    #[test]
    fn ripened_crops_lower_the_produce_index() {
        let mut market = spring_market();
        let mut rng = StdRng::seed_from_u64(3);

        let events = market.advance_day(1, Season::Spring, 3, &mut rng).unwrap();
        assert_eq!(market.produce_index(), dec!(0.97));
        assert!(events.iter().any(|e| e.contains("dip 3%")));

        market.advance_day(2, Season::Spring, 40, &mut rng).unwrap();
        assert_eq!(market.produce_index(), dec!(0.90));

        market.advance_day(3, Season::Spring, 0, &mut rng).unwrap();
        assert_eq!(market.produce_index(), Decimal::ONE);
    }

    #[test]
    fn harvest_sells_at_the_produce_index() {
        let mut market = spring_market();
        let mut rng = StdRng::seed_from_u64(5);
        market.advance_day(1, Season::Spring, 4, &mut rng).unwrap();

        let mut wallet = Wallet::new(dec!(0));
        let mut inventory = Inventory::new();
        inventory.store_harvest(Harvest {
            crop: "Pea".to_owned(),
            quality: QualityTier::Silver,
            quantity: 2,
            base_price: dec!(2.50),
        });

        // 2.50 * 1.5 * 2 = 7.50, then 96%.
        let trade = market
            .sell_harvest(&mut wallet, &mut inventory, "Pea")
            .unwrap();
        assert_eq!(trade.total, dec!(7.20));
        assert_eq!(wallet.balance(), dec!(7.20));
        assert!(inventory.basket().is_empty());
    }

    #[test]
    fn broken_bounds_are_an_invariant_violation() {
        let tuning = MarketTuning {
            price_floor: dec!(0),
            price_ceiling: dec!(0),
            ..MarketTuning::default()
        };
        let mut market = Market::new(tuning, Season::Spring);
        let mut rng = StdRng::seed_from_u64(1);
        let err = market
            .advance_day(1, Season::Spring, 0, &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), willowbrook_types::ErrorKind::InvariantViolation);
    }

    #[test]
    fn summary_totals_the_log() {
        let mut market = spring_market();
        let mut wallet = Wallet::new(dec!(100));
        let mut inventory = Inventory::new();
        market
            .buy(&mut wallet, &mut inventory, &key("cinnamon_roll"), 3)
            .unwrap();
        market
            .buy(&mut wallet, &mut inventory, &key("frost_tonic"), 1)
            .unwrap();
        market
            .sell(&mut wallet, &mut inventory, &key("cinnamon_roll"), 1)
            .unwrap();

        let summary = market.trade_summary();
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.total_volume, 5);
        assert_eq!(summary.top_item.as_deref(), Some("Cinnamon Roll"));
        assert_eq!(summary.coins_earned, dec!(2.20));

        let board = market.price_board();
        assert_eq!(board.quotes.len(), 10);
        assert_eq!(board.quotes[0].name, "Sourdough Loaf");
    }
}
