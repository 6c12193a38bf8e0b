//! Export command: write CSV and PDF portfolio reports

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::commands::build_ledger;
use crate::data_paths::DataPaths;
use crate::report::Exporter;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// User identifier owning the portfolio
    #[arg(short, long)]
    pub user: String,
}

pub struct ExportCommand {
    args: ExportArgs,
}

impl ExportCommand {
    pub fn new(args: ExportArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let ledger = build_ledger(&data_paths);
        let portfolio = ledger.get_portfolio(&self.args.user).await?;

        let exporter = Exporter::new(&data_paths);
        let csv_path = exporter.export_csv(&self.args.user, &portfolio)?;
        let pdf_path = exporter.export_pdf(&self.args.user, &portfolio)?;

        match (csv_path, pdf_path) {
            (Some(csv), Some(pdf)) => {
                println!("{}", "Portfolio exported.".bright_green());
                println!("  CSV: {}", csv.display());
                println!("  PDF: {}", pdf.display());
            }
            _ => println!("Your portfolio is empty. Nothing to export."),
        }

        Ok(())
    }
}
