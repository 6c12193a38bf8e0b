//! Portfolio command for displaying holdings as a table

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::cli::commands::build_ledger;
use crate::data_paths::DataPaths;
use crate::report;

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// User identifier owning the portfolio
    #[arg(short, long)]
    pub user: String,
}

pub struct PortfolioCommand {
    args: PortfolioArgs,
}

impl PortfolioCommand {
    pub fn new(args: PortfolioArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let ledger = build_ledger(&data_paths);
        let portfolio = ledger.get_portfolio(&self.args.user).await?;

        if portfolio.is_empty() {
            println!("Your portfolio is empty.");
            return Ok(());
        }

        println!("\n{}\n", "📊 Portfolio Overview".bright_white().bold());
        println!("👤 User: {}", self.args.user.bright_cyan());

        let rows = report::report_rows(&portfolio);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Asset", "Quantity", "Price ($)", "Value ($)"]);

        for row in &rows {
            table.add_row(vec![
                row.asset.clone(),
                format!("{:.2}", row.quantity),
                format!("{:.2}", row.price),
                format!("{:.2}", row.value),
            ]);
        }
        table.add_row(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", report::total_value(&rows)),
        ]);

        println!("{table}");

        match report::portfolio_roi(&portfolio) {
            Ok(roi) => println!("\n📈 ROI: {}", format!("{:.2}%", roi).bright_green()),
            Err(e) => println!("\n📈 ROI unavailable: {}", e),
        }

        Ok(())
    }
}
