//! Portfolio ledger: types and mutation engine

mod engine;
mod types;

pub use engine::LedgerEngine;
pub use types::{Holding, Portfolio, PurchaseLot};
