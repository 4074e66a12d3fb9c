//! CLI type definitions and command handlers.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spycat")]
#[command(about = "Spy Cat Agency - mission tracking API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load this YAML file instead of spycat.yaml / spycat.local.yaml
    #[arg(short, long, global = true, env = "SPYCAT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API until SIGINT or SIGTERM
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["spycat", "serve", "--config", "prod.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));
        assert_eq!(cli.config, Some(PathBuf::from("prod.yaml")));
    }

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::try_parse_from(["spycat", "migrate"]).unwrap();
        assert!(matches!(cli.command, Commands::Migrate));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["spycat", "launch"]).is_err());
    }
}
