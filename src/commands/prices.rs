use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tile_estimator::{
    config,
    store::{FileStore, PriceTableStore},
};

/// Execute the prices show command
///
/// Prints the table the service would use: the stored document merged over
/// the defaults.
pub async fn show(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    let files = FileStore::new(&cfg.storage.data_dir);
    let source = files.path_for(PriceTableStore::KEY);
    let store = PriceTableStore::new(Box::new(files), true);
    let table = store.load_price_table().await;

    if source.exists() {
        println!("{} {}", "Source:".cyan(), source.display());
    } else {
        println!("{} {}", "Source:".cyan(), "built-in defaults".dimmed());
    }
    println!();

    for (path, value) in table.entries() {
        println!("  {:<28} {}", path, value);
    }

    Ok(())
}
