//! Query orchestrator
//!
//! Routes parsed commands to the ledger, calculator, aggregator, and
//! exporter, and turns every outcome (including failures) into a
//! plain-text reply. Errors never propagate past this layer.

mod command;

pub use command::{Command, ParseError};

use std::path::PathBuf;
use tracing::error;

use crate::chart::{ChartRenderer, NoopChart};
use crate::finance;
use crate::ledger::LedgerEngine;
use crate::report::{self, Exporter};

/// Reply returned for every processed query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentResponse {
    pub text: String,
    pub chart_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

impl AgentResponse {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn with_chart(text: impl Into<String>, chart_path: Option<PathBuf>) -> Self {
        Self {
            text: text.into(),
            chart_path,
            ..Self::default()
        }
    }
}

/// The assistant: parses queries and executes them against the core.
pub struct Agent {
    ledger: LedgerEngine,
    exporter: Exporter,
    chart: Box<dyn ChartRenderer>,
}

impl Agent {
    pub fn new(ledger: LedgerEngine, exporter: Exporter) -> Self {
        Self {
            ledger,
            exporter,
            chart: Box::new(NoopChart),
        }
    }

    /// Replace the no-op chart renderer with a real implementation.
    pub fn with_chart_renderer(mut self, chart: Box<dyn ChartRenderer>) -> Self {
        self.chart = chart;
        self
    }

    /// Process one free-text query for a user. Always answers with
    /// text; never returns an error.
    pub async fn process_query(&self, user_id: &str, query: &str) -> AgentResponse {
        if user_id.is_empty() {
            return AgentResponse::text("Invalid user ID.");
        }

        let command = match Command::parse(query) {
            Ok(command) => command,
            Err(err) => return AgentResponse::text(err.to_string()),
        };

        self.execute(user_id, command).await
    }

    async fn execute(&self, user_id: &str, command: Command) -> AgentResponse {
        match command {
            Command::AddAsset {
                asset,
                quantity,
                price,
            } => match self.ledger.add_asset(user_id, &asset, quantity, price).await {
                Ok(portfolio) => AgentResponse::with_chart(
                    format!("Added {} {} at ${} each.", quantity, asset, price),
                    self.chart.portfolio_chart(user_id, &portfolio),
                ),
                Err(e) => {
                    error!("Add asset error: {}", e);
                    AgentResponse::text(
                        "Invalid quantity or price. Use: add asset [name] [quantity] [price]",
                    )
                }
            },

            Command::RemoveAsset { asset } => {
                match self.ledger.remove_asset(user_id, &asset).await {
                    Ok(portfolio) => AgentResponse::with_chart(
                        format!("Removed {} from your portfolio.", asset),
                        self.chart.portfolio_chart(user_id, &portfolio),
                    ),
                    Err(e) => {
                        error!("Remove asset error: {}", e);
                        AgentResponse::text(format!("An error occurred: {}", e))
                    }
                }
            }

            Command::ShowPortfolio => match self.ledger.get_portfolio(user_id).await {
                Ok(portfolio) if portfolio.is_empty() => {
                    AgentResponse::text("Your portfolio is empty.")
                }
                Ok(portfolio) => AgentResponse::with_chart(
                    format!("Your portfolio:\n{}", report::summary_text(&portfolio)),
                    self.chart.portfolio_chart(user_id, &portfolio),
                ),
                Err(e) => {
                    error!("Show portfolio error: {}", e);
                    AgentResponse::text(format!("An error occurred: {}", e))
                }
            },

            Command::UpdatePrice { asset, price } => {
                match self
                    .ledger
                    .update_current_price(user_id, &asset, price)
                    .await
                {
                    Ok(portfolio) => AgentResponse::with_chart(
                        format!("Updated {} current price to ${}.", asset, price),
                        self.chart.portfolio_chart(user_id, &portfolio),
                    ),
                    Err(e) => {
                        error!("Update price error: {}", e);
                        AgentResponse::text(
                            "Invalid price. Use: update current price [name] [price]",
                        )
                    }
                }
            }

            Command::PortfolioRoi => match self.ledger.get_portfolio(user_id).await {
                Ok(portfolio) if portfolio.is_empty() => {
                    AgentResponse::text("Your portfolio is empty. Add assets first.")
                }
                Ok(portfolio) => match report::portfolio_roi(&portfolio) {
                    Ok(roi) => AgentResponse::with_chart(
                        format!("Your portfolio ROI is {:.2}%.", roi),
                        self.chart.portfolio_chart(user_id, &portfolio),
                    ),
                    Err(e) => {
                        error!("ROI calculation failed: {}", e);
                        AgentResponse::text(format!(
                            "Cannot calculate ROI: {} (Update current prices first.)",
                            e
                        ))
                    }
                },
                Err(e) => {
                    error!("ROI portfolio load failed: {}", e);
                    AgentResponse::text(format!("An error occurred: {}", e))
                }
            },

            Command::SimulateInvestment {
                principal,
                rate,
                years,
            } => match finance::investment_simulation(
                principal,
                rate,
                years,
                finance::DEFAULT_FREQUENCY,
            ) {
                Ok(simulation) => {
                    let lines: Vec<String> = simulation
                        .iter()
                        .map(|(year, amount)| format!("Year {}: ${:.2}", year, amount))
                        .collect();
                    AgentResponse::with_chart(
                        format!("Investment Simulation:\n{}", lines.join("\n")),
                        self.chart.simulation_chart(user_id, &simulation),
                    )
                }
                Err(e) => {
                    error!("Simulation error: {}", e);
                    AgentResponse::text(
                        "Invalid principal, rate, or years. Use: simulate investment [principal] [rate] [years]",
                    )
                }
            },

            Command::ExportPortfolio => match self.ledger.get_portfolio(user_id).await {
                Ok(portfolio) if portfolio.is_empty() => {
                    AgentResponse::text("Your portfolio is empty. Nothing to export.")
                }
                Ok(portfolio) => {
                    let exported = self
                        .exporter
                        .export_csv(user_id, &portfolio)
                        .and_then(|csv| {
                            let pdf = self.exporter.export_pdf(user_id, &portfolio)?;
                            Ok((csv, pdf))
                        });
                    match exported {
                        Ok((csv_path, pdf_path)) => AgentResponse {
                            text: format!(
                                "Portfolio exported successfully. CSV: {}, PDF: {}",
                                display_path(&csv_path),
                                display_path(&pdf_path)
                            ),
                            chart_path: None,
                            csv_path,
                            pdf_path,
                        },
                        Err(e) => {
                            error!("Export error: {}", e);
                            AgentResponse::text(format!("Failed to export portfolio: {}", e))
                        }
                    }
                }
                Err(e) => {
                    error!("Export portfolio load failed: {}", e);
                    AgentResponse::text(format!("An error occurred: {}", e))
                }
            },
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
