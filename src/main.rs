//! Spy Cat Agency entry point.

use anyhow::Result;
use clap::Parser;

use spycat::cli::{commands, Cli, Commands};
use spycat::infrastructure::logging::{LogConfig, LoggerImpl};
use spycat::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::try_from(&config.logging)?)?;

    match cli.command {
        Commands::Serve => commands::serve(config).await,
        Commands::Migrate => commands::migrate(config).await,
    }
}
