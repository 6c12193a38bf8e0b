//! Report aggregation: valuation, ROI, and display rows
//!
//! Derives per-asset and portfolio-level figures from ledger state.
//! Numeric work is delegated to the finance calculator; this module
//! only decides which prices feed it.

mod export;

pub use export::Exporter;

use rust_decimal::Decimal;

use crate::errors::Result;
use crate::finance;
use crate::ledger::{Holding, Portfolio};

/// One row of the tabular report consumed by exporters and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub asset: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub value: Decimal,
}

/// The price used to value a holding: the market price if known,
/// otherwise the price of the most recently added lot.
pub fn valuation_price(holding: &Holding) -> Option<Decimal> {
    holding
        .current_price
        .or_else(|| holding.last_lot().map(|lot| lot.price))
}

/// Current value of a holding: quantity times valuation price.
pub fn asset_value(holding: &Holding) -> Option<Decimal> {
    valuation_price(holding).map(|price| finance::round_money(holding.quantity * price))
}

/// Portfolio-level return on investment.
///
/// Initial investment is the cost basis summed over every lot; final
/// value sums the current valuation of every holding. The calculator's
/// own validation applies, so an empty portfolio (zero cost basis)
/// fails with its non-positive-initial error.
pub fn portfolio_roi(portfolio: &Portfolio) -> Result<Decimal> {
    let initial_investment: Decimal = portfolio
        .values()
        .flat_map(|holding| holding.lots.iter())
        .map(|lot| lot.quantity * lot.price)
        .sum();

    let final_value: Decimal = portfolio.values().filter_map(asset_value).sum();

    finance::roi(initial_investment, final_value)
}

/// Tabular row set for the portfolio, one row per asset.
pub fn report_rows(portfolio: &Portfolio) -> Vec<ReportRow> {
    portfolio
        .iter()
        .filter_map(|(asset, holding)| {
            let price = valuation_price(holding)?;
            let value = asset_value(holding)?;
            Some(ReportRow {
                asset: asset.clone(),
                quantity: holding.quantity,
                price,
                value,
            })
        })
        .collect()
}

/// Sum of row values for the report's total line.
pub fn total_value(rows: &[ReportRow]) -> Decimal {
    rows.iter().map(|row| row.value).sum()
}

/// Human-readable multi-line portfolio summary: each asset with its
/// held quantity and latest purchase price.
pub fn summary_text(portfolio: &Portfolio) -> String {
    portfolio
        .iter()
        .map(|(asset, holding)| {
            let last_price = holding
                .last_lot()
                .map(|lot| lot.price)
                .unwrap_or(Decimal::ZERO);
            format!(
                "{}: {:.2} units at ${:.2}",
                asset, holding.quantity, last_price
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
