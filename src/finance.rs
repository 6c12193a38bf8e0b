//! Finance calculator: ROI, interest, and growth simulation
//!
//! Pure, stateless functions. All monetary results are rounded to two
//! decimal places with half-up semantics so formatted output matches
//! cent-exact expectations.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use std::collections::BTreeMap;

use crate::errors::{AssistantError, Result};

/// Compounding frequency used when the caller does not specify one.
pub const DEFAULT_FREQUENCY: u32 = 1;

/// Round a monetary amount to 2 decimal places, half-up.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Return on investment as a percentage of the initial investment.
pub fn roi(initial_investment: Decimal, final_value: Decimal) -> Result<Decimal> {
    if initial_investment <= Decimal::ZERO {
        return Err(AssistantError::computation(
            "Initial investment must be positive",
        ));
    }
    if final_value < Decimal::ZERO {
        return Err(AssistantError::computation("Final value cannot be negative"));
    }

    let roi = (final_value - initial_investment) / initial_investment * Decimal::ONE_HUNDRED;
    Ok(round_money(roi))
}

/// Final amount under simple interest: P(1 + r*t).
pub fn simple_interest(principal: Decimal, rate: Decimal, years: u32) -> Result<Decimal> {
    validate_growth_inputs(principal, rate)?;
    if years == 0 {
        return Ok(round_money(principal));
    }

    let amount = principal * (Decimal::ONE + rate * Decimal::from(years));
    Ok(round_money(amount))
}

/// Final amount under compound interest: P(1 + r/n)^(n*t).
pub fn compound_interest(
    principal: Decimal,
    rate: Decimal,
    years: u32,
    frequency: u32,
) -> Result<Decimal> {
    validate_growth_inputs(principal, rate)?;
    validate_frequency(frequency)?;
    if years == 0 {
        return Ok(round_money(principal));
    }

    compound_amount(principal, rate, years, frequency).map(round_money)
}

/// Year-by-year growth of an investment, year 0 through `years`
/// inclusive. Each year is recomputed from the principal rather than
/// compounded from the previous rounded value, so rounding never
/// drifts across the series.
pub fn investment_simulation(
    principal: Decimal,
    rate: Decimal,
    years: u32,
    frequency: u32,
) -> Result<BTreeMap<u32, Decimal>> {
    validate_growth_inputs(principal, rate)?;
    validate_frequency(frequency)?;

    let mut result = BTreeMap::new();
    for year in 0..=years {
        let amount = if year == 0 {
            principal
        } else {
            compound_amount(principal, rate, year, frequency)?
        };
        result.insert(year, round_money(amount));
    }
    Ok(result)
}

fn compound_amount(
    principal: Decimal,
    rate: Decimal,
    years: u32,
    frequency: u32,
) -> Result<Decimal> {
    let periods = i64::from(frequency) * i64::from(years);
    let growth = (Decimal::ONE + rate / Decimal::from(frequency))
        .checked_powi(periods)
        .ok_or_else(|| AssistantError::computation("Amount exceeds the representable range"))?;
    principal
        .checked_mul(growth)
        .ok_or_else(|| AssistantError::computation("Amount exceeds the representable range"))
}

fn validate_growth_inputs(principal: Decimal, rate: Decimal) -> Result<()> {
    if principal <= Decimal::ZERO {
        return Err(AssistantError::computation("Principal must be positive"));
    }
    if rate < Decimal::ZERO {
        return Err(AssistantError::computation(
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

fn validate_frequency(frequency: u32) -> Result<()> {
    if frequency == 0 {
        return Err(AssistantError::computation(
            "Compounding frequency must be positive",
        ));
    }
    Ok(())
}
