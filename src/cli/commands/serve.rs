//! Serve command: run the HTTP assistant endpoint

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::cli::commands::build_agent;
use crate::data_paths::DataPaths;
use crate::server;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP endpoint to
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,
}

pub struct ServeCommand {
    args: ServeArgs,
}

impl ServeCommand {
    pub fn new(args: ServeArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let agent = Arc::new(build_agent(&data_paths));

        println!("🌐 Serving finbot on http://{}", self.args.bind);
        server::start(self.args.bind.clone(), agent).await
    }
}
