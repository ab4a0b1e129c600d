//! The Willowbrook village market and the player's purse.
//!
//! Prices drift one day at a time under a seasonal pull. The player buys
//! baked goods and potions with tax, sells them back at a spread, and sells
//! harvested crops at a produce index that dips when the garden is
//! generous. Every coin amount is a [`rust_decimal::Decimal`].
//!
//! # Modules
//!
//! - [`catalog`] -- The ten goods, their shelf lives and seasonal demand.
//! - [`market`] -- The [`Market`]: drift, buy, sell, boards and summaries.
//! - [`wallet`] -- The [`Wallet`] and the aged [`Inventory`].
//! - [`error`] -- Error types for trades and drift.

pub mod catalog;
pub mod error;
pub mod market;
pub mod wallet;

// Re-export primary types at crate root.
pub use catalog::{CATALOG, CatalogItem, ItemCategory, find_item};
pub use error::MarketError;
pub use market::{
    Listing, Market, MarketTuning, PriceBoard, PriceQuote, Trade, TradeKind, TradeSummary,
};
pub use wallet::{Inventory, InventoryLine, StockSlot, Wallet};
