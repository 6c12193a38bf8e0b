//! Ledger type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from asset identifier (unique per user) to holding.
pub type Portfolio = BTreeMap<String, Holding>;

/// One recorded purchase event. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLot {
    pub quantity: Decimal,
    pub price: Decimal,
}

/// A user's aggregate position in one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Total units held. Accumulated from rounded per-purchase
    /// increments, not recomputed from the lot list.
    pub quantity: Decimal,

    /// Purchase history in insertion order; never reordered or merged.
    pub lots: Vec<PurchaseLot>,

    /// Market price. Absent until explicitly set via a price update.
    pub current_price: Option<Decimal>,
}

impl Holding {
    /// The most recently appended purchase lot.
    pub fn last_lot(&self) -> Option<&PurchaseLot> {
        self.lots.last()
    }
}
