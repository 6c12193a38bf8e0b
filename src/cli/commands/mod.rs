//! CLI command implementations

pub mod ask;
pub mod export;
pub mod portfolio;
pub mod serve;
pub mod version;

use std::sync::Arc;

use crate::agent::Agent;
use crate::data_paths::DataPaths;
use crate::ledger::LedgerEngine;
use crate::report::Exporter;
use crate::storage::JsonFileStore;

/// Build the assistant wired to the file-backed store.
pub fn build_agent(data_paths: &DataPaths) -> Agent {
    Agent::new(build_ledger(data_paths), Exporter::new(data_paths))
}

/// Build a ledger engine over the file-backed store.
pub fn build_ledger(data_paths: &DataPaths) -> LedgerEngine {
    LedgerEngine::new(Arc::new(JsonFileStore::new(data_paths)))
}
