//! Error types for the willowbrook-market crate.

use rust_decimal::Decimal;
use willowbrook_types::{ErrorKind, ItemKey};

/// Errors raised by the market, the wallet, and the inventory.
///
/// Trades are checked in full before anything moves, so on any error the
/// wallet and inventory are exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// The catalogue has no item with this key.
    #[error("unknown market item: {0}")]
    UnknownItem(ItemKey),

    /// Trades must move at least one unit.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The wallet cannot cover the cost.
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds {
        /// Total cost including tax.
        needed: Decimal,
        /// Current balance.
        available: Decimal,
    },

    /// The inventory holds fewer units than requested.
    #[error("only {held} {item} on hand, asked for {requested}")]
    InsufficientStock {
        /// Item key.
        item: ItemKey,
        /// Units held.
        held: u32,
        /// Units requested.
        requested: u32,
    },

    /// The held units have gone past their shelf life.
    #[error("{0} has spoiled and cannot be sold")]
    Spoiled(ItemKey),

    /// No harvested crop with this name is waiting in the basket.
    #[error("no harvested {0} to sell")]
    NoProduce(String),

    /// Drift produced a price that is zero or negative.
    #[error("price of {item} drifted to {price}")]
    NonPositivePrice {
        /// Item key.
        item: ItemKey,
        /// The offending price.
        price: Decimal,
    },
}

impl MarketError {
    /// Classify the error for the caller.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownItem(_) | Self::ZeroQuantity => ErrorKind::Validation,
            Self::InsufficientFunds { .. }
            | Self::InsufficientStock { .. }
            | Self::Spoiled(_)
            | Self::NoProduce(_) => ErrorKind::InsufficientResource,
            Self::NonPositivePrice { .. } => ErrorKind::InvariantViolation,
        }
    }
}
