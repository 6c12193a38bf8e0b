//! CLI module for finbot
//!
//! Uses clap for argument parsing with a structured command pattern:
//! each subcommand owns an Args struct and an async execute method.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LoggingConfig};

use commands::ask::{AskArgs, AskCommand};
use commands::export::{ExportArgs, ExportCommand};
use commands::portfolio::{PortfolioArgs, PortfolioCommand};
use commands::serve::{ServeArgs, ServeCommand};
use commands::version::{VersionArgs, VersionCommand};

#[derive(Parser)]
#[command(name = "finbot")]
#[command(version)]
#[command(about = "Personal finance assistant for portfolio tracking and reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP assistant endpoint
    Serve(ServeArgs),

    /// Send a single query to the assistant
    Ask(AskArgs),

    /// Show the current portfolio as a table
    Portfolio(PortfolioArgs),

    /// Export portfolio reports (CSV and PDF)
    Export(ExportArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);

        // Ensure all directories exist
        data_paths.ensure_directories()?;
        init_logging(LoggingConfig::new(data_paths.clone(), self.verbose))?;

        match self.command {
            Commands::Serve(args) => ServeCommand::new(args).execute(data_paths).await,
            Commands::Ask(args) => AskCommand::new(args).execute(data_paths).await,
            Commands::Portfolio(args) => PortfolioCommand::new(args).execute(data_paths).await,
            Commands::Export(args) => ExportCommand::new(args).execute(data_paths).await,
            Commands::Version(args) => VersionCommand::new(args).execute(data_paths).await,
        }
    }
}
