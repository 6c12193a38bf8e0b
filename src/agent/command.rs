//! Typed commands and the free-text query parser
//!
//! Queries are matched against known phrases case-insensitively, in a
//! fixed precedence order, then split on whitespace for positional
//! arguments. Anything unmatched falls through to `Unrecognized`.

use rust_decimal::Decimal;
use thiserror::Error;

const USAGE_ADD: &str = "add asset [name] [quantity] [price]";
const USAGE_REMOVE: &str = "remove asset [name]";
const USAGE_UPDATE_PRICE: &str = "update current price [name] [price]";
const USAGE_SIMULATE: &str = "simulate investment [principal] [rate] [years]";

/// A parsed portfolio-assistant command with typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddAsset {
        asset: String,
        quantity: Decimal,
        price: Decimal,
    },
    RemoveAsset {
        asset: String,
    },
    ShowPortfolio,
    UpdatePrice {
        asset: String,
        price: Decimal,
    },
    PortfolioRoi,
    SimulateInvestment {
        principal: Decimal,
        rate: Decimal,
        years: u32,
    },
    ExportPortfolio,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The phrase matched but the argument count did not.
    #[error("Invalid format. Use: {0}")]
    BadShape(&'static str),

    /// The arguments were present but failed numeric parsing.
    #[error("{0}. Use: {1}")]
    BadValue(&'static str, &'static str),

    /// No known phrase matched.
    #[error("Sorry, I didn't understand your request.")]
    Unrecognized,
}

impl Command {
    /// Match a free-text query against the known command phrases.
    pub fn parse(query: &str) -> Result<Self, ParseError> {
        let lowered = query.to_lowercase();
        let parts: Vec<&str> = query.split_whitespace().collect();

        if lowered.contains("add asset") {
            if parts.len() != 5 {
                return Err(ParseError::BadShape(USAGE_ADD));
            }
            return match (parse_decimal(parts[3]), parse_decimal(parts[4])) {
                (Some(quantity), Some(price)) => Ok(Command::AddAsset {
                    asset: parts[2].to_string(),
                    quantity,
                    price,
                }),
                _ => Err(ParseError::BadValue("Invalid quantity or price", USAGE_ADD)),
            };
        }

        if lowered.contains("remove asset") {
            if parts.len() != 3 {
                return Err(ParseError::BadShape(USAGE_REMOVE));
            }
            return Ok(Command::RemoveAsset {
                asset: parts[2].to_string(),
            });
        }

        if lowered.contains("show portfolio") {
            return Ok(Command::ShowPortfolio);
        }

        if lowered.contains("update current price") {
            if parts.len() != 5 {
                return Err(ParseError::BadShape(USAGE_UPDATE_PRICE));
            }
            return match parse_decimal(parts[4]) {
                Some(price) => Ok(Command::UpdatePrice {
                    asset: parts[3].to_string(),
                    price,
                }),
                None => Err(ParseError::BadValue("Invalid price", USAGE_UPDATE_PRICE)),
            };
        }

        if lowered.contains("roi") {
            return Ok(Command::PortfolioRoi);
        }

        if lowered.contains("simulate investment") {
            if parts.len() != 5 {
                return Err(ParseError::BadShape(USAGE_SIMULATE));
            }
            return match (
                parse_decimal(parts[2]),
                parse_decimal(parts[3]),
                parts[4].parse::<u32>().ok(),
            ) {
                (Some(principal), Some(rate), Some(years)) => Ok(Command::SimulateInvestment {
                    principal,
                    rate,
                    years,
                }),
                _ => Err(ParseError::BadValue(
                    "Invalid principal, rate, or years",
                    USAGE_SIMULATE,
                )),
            };
        }

        if lowered.contains("export portfolio") {
            return Ok(Command::ExportPortfolio);
        }

        Err(ParseError::Unrecognized)
    }
}

fn parse_decimal(token: &str) -> Option<Decimal> {
    token.parse().ok()
}
