use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tile-estimator", version, about = "Tiling job pricing service")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP service (default)
    Start {
        /// Keep the price table in memory instead of the data directory
        #[arg(long)]
        ephemeral: bool,
    },

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Print an itemized quote for a selection
    Quote {
        /// Selection JSON file
        #[arg(short, long)]
        selection: PathBuf,

        /// Price table JSON file (defaults to the stored table)
        #[arg(short, long)]
        prices: Option<PathBuf>,
    },

    /// Price table commands
    Prices {
        #[command(subcommand)]
        action: PricesCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PricesCommands {
    /// Print the effective price table from the data directory
    Show,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Start { ephemeral: false })
    }
}
