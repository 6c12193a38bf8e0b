//! Optional chart rendering capability
//!
//! Chart generation is an external concern; the assistant only knows
//! the hook points. Implementations are injected at construction, and
//! the default renders nothing.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ledger::Portfolio;

/// Hooks invoked after portfolio-affecting commands. Implementations
/// return the path of a rendered chart, or `None` to skip.
pub trait ChartRenderer: Send + Sync {
    fn portfolio_chart(&self, _user_id: &str, _portfolio: &Portfolio) -> Option<PathBuf> {
        None
    }

    fn simulation_chart(
        &self,
        _user_id: &str,
        _series: &BTreeMap<u32, Decimal>,
    ) -> Option<PathBuf> {
        None
    }
}

/// Renders nothing; used when no visualizer is wired in.
pub struct NoopChart;

impl ChartRenderer for NoopChart {}
