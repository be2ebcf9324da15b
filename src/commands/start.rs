use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tile_estimator::{config, init_tracing_with, server};
use tracing::info;

/// Execute the start command
///
/// Loads configuration, sets up logging from it, then serves until a
/// shutdown signal arrives.
pub async fn execute(config_path: &Path, ephemeral: bool) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    init_tracing_with(&cfg.server.log_level, &cfg.server.log_format);

    println!("{}", "Starting tile estimator...".green());
    if ephemeral {
        println!(
            "{}",
            "Ephemeral mode: price edits are kept in memory only".yellow()
        );
    }

    info!(config = %config_path.display(), ephemeral, "Starting tile estimator");

    server::start_server(cfg, config_path.to_path_buf(), ephemeral).await?;

    Ok(())
}
