use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use tile_estimator::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // The server configures logging itself from the loaded config
    if !matches!(command, cli::Commands::Start { .. }) {
        init_tracing();
    }

    match command {
        cli::Commands::Start { ephemeral } => {
            commands::start::execute(&args.config, ephemeral).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Quote { selection, prices } => {
            commands::quote::execute(&args.config, &selection, prices.as_deref()).await?;
        }
        cli::Commands::Prices { action } => match action {
            cli::PricesCommands::Show => commands::prices::show(&args.config).await?,
        },
        cli::Commands::Version => {
            println!("Tile Estimator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
