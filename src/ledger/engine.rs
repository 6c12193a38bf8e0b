//! Ledger engine: portfolio mutations over an injected record store

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{AssistantError, Result};
use crate::finance::round_money;
use crate::ledger::types::{Holding, Portfolio, PurchaseLot};
use crate::storage::RecordStore;

/// Owns portfolio mutation logic. Every mutating operation runs
/// load-modify-save against the full user record and returns the
/// updated portfolio.
pub struct LedgerEngine {
    store: Arc<dyn RecordStore>,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Record a purchase of `quantity` units of `asset` at
    /// `purchase_price` per unit.
    ///
    /// An existing holding gains a new lot and its running quantity is
    /// incremented by the rounded purchase quantity; the lot itself
    /// keeps the quantity as given. The running total is intentionally
    /// not recomputed from the lot list.
    pub async fn add_asset(
        &self,
        user_id: &str,
        asset_name: &str,
        quantity: Decimal,
        purchase_price: Decimal,
    ) -> Result<Portfolio> {
        require_user(user_id)?;
        require_asset(asset_name)?;
        if quantity <= Decimal::ZERO {
            return Err(AssistantError::validation("Quantity must be positive"));
        }
        if purchase_price < Decimal::ZERO {
            return Err(AssistantError::validation(
                "Purchase price cannot be negative",
            ));
        }

        let mut record = self.store.load(user_id).await?;

        let lot = PurchaseLot {
            quantity,
            price: round_money(purchase_price),
        };

        match record.portfolio.get_mut(asset_name) {
            Some(holding) => {
                holding.quantity += round_money(quantity);
                holding.lots.push(lot);
            }
            None => {
                record.portfolio.insert(
                    asset_name.to_string(),
                    Holding {
                        quantity: round_money(quantity),
                        lots: vec![lot],
                        current_price: None,
                    },
                );
            }
        }

        self.store.save(user_id, &record).await?;
        info!(user_id, asset_name, %quantity, %purchase_price, "Added asset purchase");

        Ok(record.portfolio)
    }

    /// Remove a holding and its entire lot history. Removing an asset
    /// that is not held is a no-op.
    pub async fn remove_asset(&self, user_id: &str, asset_name: &str) -> Result<Portfolio> {
        require_user(user_id)?;
        require_asset(asset_name)?;

        let mut record = self.store.load(user_id).await?;

        if record.portfolio.remove(asset_name).is_some() {
            self.store.save(user_id, &record).await?;
            info!(user_id, asset_name, "Removed asset");
        } else {
            debug!(user_id, asset_name, "Asset not held, nothing to remove");
        }

        Ok(record.portfolio)
    }

    /// Current portfolio for the user; empty if nothing persisted.
    pub async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio> {
        require_user(user_id)?;

        let record = self.store.load(user_id).await?;
        Ok(record.portfolio)
    }

    /// Set the market price used for valuation. Updating an asset that
    /// is not held is a no-op.
    pub async fn update_current_price(
        &self,
        user_id: &str,
        asset_name: &str,
        current_price: Decimal,
    ) -> Result<Portfolio> {
        require_user(user_id)?;
        require_asset(asset_name)?;
        if current_price < Decimal::ZERO {
            return Err(AssistantError::validation(
                "Current price cannot be negative",
            ));
        }

        let mut record = self.store.load(user_id).await?;

        if let Some(holding) = record.portfolio.get_mut(asset_name) {
            holding.current_price = Some(round_money(current_price));
            self.store.save(user_id, &record).await?;
            info!(user_id, asset_name, %current_price, "Updated current price");
        } else {
            debug!(user_id, asset_name, "Asset not held, price not updated");
        }

        Ok(record.portfolio)
    }
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(AssistantError::validation(
            "User ID must be a non-empty string",
        ));
    }
    Ok(())
}

fn require_asset(asset_name: &str) -> Result<()> {
    if asset_name.is_empty() {
        return Err(AssistantError::validation(
            "Asset name must be a non-empty string",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use rust_decimal_macros::dec;

    fn engine() -> LedgerEngine {
        LedgerEngine::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn add_asset_creates_holding() {
        let ledger = engine();
        let portfolio = ledger
            .add_asset("user1", "BTC", dec!(2), dec!(30000))
            .await
            .unwrap();

        let holding = &portfolio["BTC"];
        assert_eq!(holding.quantity, dec!(2.00));
        assert_eq!(holding.lots.len(), 1);
        assert_eq!(holding.lots[0].price, dec!(30000.00));
        assert_eq!(holding.current_price, None);
    }

    #[tokio::test]
    async fn add_asset_appends_lot_and_increments_quantity() {
        let ledger = engine();
        ledger
            .add_asset("user1", "BTC", dec!(2), dec!(30000))
            .await
            .unwrap();
        let portfolio = ledger
            .add_asset("user1", "BTC", dec!(3), dec!(31000))
            .await
            .unwrap();

        let holding = &portfolio["BTC"];
        assert_eq!(holding.quantity, dec!(5.00));
        assert_eq!(holding.lots.len(), 2);
        assert_eq!(holding.lots[1].price, dec!(31000.00));
    }

    #[tokio::test]
    async fn quantity_accumulates_rounded_increments_while_lots_keep_raw_values() {
        let ledger = engine();
        ledger
            .add_asset("user1", "BTC", dec!(0.004), dec!(30000))
            .await
            .unwrap();
        let portfolio = ledger
            .add_asset("user1", "BTC", dec!(0.004), dec!(30000))
            .await
            .unwrap();

        let holding = &portfolio["BTC"];
        // Each 0.004 increment rounds to 0.00, so the running total
        // stays at zero while the lot history keeps the raw amounts.
        assert_eq!(holding.quantity, dec!(0.00));
        assert_eq!(holding.lots[0].quantity, dec!(0.004));
        assert_eq!(holding.lots[1].quantity, dec!(0.004));
    }

    #[tokio::test]
    async fn remove_asset_deletes_holding() {
        let ledger = engine();
        ledger
            .add_asset("user1", "BTC", dec!(2), dec!(30000))
            .await
            .unwrap();

        let portfolio = ledger.remove_asset("user1", "BTC").await.unwrap();
        assert!(!portfolio.contains_key("BTC"));

        let portfolio = ledger.get_portfolio("user1").await.unwrap();
        assert!(portfolio.is_empty());
    }

    #[tokio::test]
    async fn remove_missing_asset_is_a_noop() {
        let ledger = engine();
        let portfolio = ledger.remove_asset("user1", "ETH").await.unwrap();
        assert!(portfolio.is_empty());
    }

    #[tokio::test]
    async fn get_portfolio_reflects_last_persisted_state() {
        let ledger = engine();
        ledger
            .add_asset("user1", "ETH", dec!(5), dec!(2000))
            .await
            .unwrap();

        let portfolio = ledger.get_portfolio("user1").await.unwrap();
        assert_eq!(portfolio["ETH"].quantity, dec!(5.00));
        assert_eq!(portfolio["ETH"].lots[0].price, dec!(2000.00));

        assert!(ledger.get_portfolio("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_current_price_sets_rounded_price() {
        let ledger = engine();
        ledger
            .add_asset("user1", "BTC", dec!(2), dec!(30000))
            .await
            .unwrap();

        let portfolio = ledger
            .update_current_price("user1", "BTC", dec!(32000.005))
            .await
            .unwrap();
        assert_eq!(portfolio["BTC"].current_price, Some(dec!(32000.01)));
    }

    #[tokio::test]
    async fn update_price_for_missing_asset_is_a_noop() {
        let ledger = engine();
        let portfolio = ledger
            .update_current_price("user1", "BTC", dec!(32000))
            .await
            .unwrap();
        assert!(portfolio.is_empty());
    }

    #[tokio::test]
    async fn invalid_inputs_are_rejected() {
        let ledger = engine();

        let err = ledger
            .add_asset("", "BTC", dec!(2), dec!(30000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User ID must be a non-empty string");

        let err = ledger
            .add_asset("user1", "", dec!(2), dec!(30000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Asset name must be a non-empty string");

        let err = ledger
            .add_asset("user1", "BTC", dec!(-2), dec!(30000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be positive");

        let err = ledger
            .add_asset("user1", "BTC", dec!(2), dec!(-30000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Purchase price cannot be negative");

        let err = ledger
            .update_current_price("user1", "BTC", dec!(-32000))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Current price cannot be negative");
    }
}
