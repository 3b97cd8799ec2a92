use clap::Parser;
use lc_core::Result;
use tracing::debug;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Keys in .env must be visible before clap reads its env fallbacks.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    lc_pipeline::init_logging(&cli.log_level);
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }

    commands::handle_command(cli).await
}
