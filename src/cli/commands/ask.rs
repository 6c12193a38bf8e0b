//! Ask command: one-shot query dispatch

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::commands::build_agent;
use crate::data_paths::DataPaths;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// User identifier owning the portfolio
    #[arg(short, long)]
    pub user: String,

    /// Query text, e.g. "add asset BTC 2 30000"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

pub struct AskCommand {
    args: AskArgs,
}

impl AskCommand {
    pub fn new(args: AskArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let agent = build_agent(&data_paths);
        let query = self.args.query.join(" ");

        let response = agent.process_query(&self.args.user, &query).await;
        println!("{}", response.text);

        if let Some(path) = &response.chart_path {
            println!("{} {}", "Chart:".bright_yellow(), path.display());
        }
        if let Some(path) = &response.csv_path {
            println!("{} {}", "CSV:".bright_yellow(), path.display());
        }
        if let Some(path) = &response.pdf_path {
            println!("{} {}", "PDF:".bright_yellow(), path.display());
        }

        Ok(())
    }
}
