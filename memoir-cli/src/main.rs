//! memoir: chat with a memory-enabled assistant, keep a journal, manage long-term memory.

use anyhow::Result;
use clap::Parser;
use memoir_cli::{run, Cli};
use memoir_core::{init_tracing, AppConfig};
use memoir_runtime::initialize_assistant;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.data_dir.clone())?;
    init_tracing(&config.log_file)?;

    let assistant = initialize_assistant(&config).await?;
    run(cli.command, &assistant).await
}
