use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tile_estimator::{
    config,
    estimate::format_rub,
    lead::Lead,
    pricing::{compute_quote, merge_bytes_over_defaults, PriceTable, Quote, Selection},
    store::{FileStore, PriceTableStore},
};

/// Execute the quote command
///
/// Prices come from `prices_path` when given, otherwise from the stored table.
pub async fn execute(config_path: &Path, selection_path: &Path, prices_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    let raw = std::fs::read(selection_path)
        .with_context(|| format!("Failed to read selection from {}", selection_path.display()))?;
    let selection: Selection = serde_json::from_slice(&raw)
        .with_context(|| format!("Invalid selection in {}", selection_path.display()))?;

    let table = match prices_path {
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("Failed to read prices from {}", path.display()))?;
            merge_bytes_over_defaults(&raw)
                .with_context(|| format!("Invalid price table in {}", path.display()))?
        }
        None => {
            let store = PriceTableStore::new(
                Box::new(FileStore::new(&cfg.storage.data_dir)),
                true,
            );
            store.load_price_table().await
        }
    };

    let quote = compute_quote(&table, &selection);
    print_quote(&selection, &table, &quote);

    let lead = Lead::for_quote(&selection, &table, &quote, &cfg.contacts);
    println!();
    println!("{}", "WhatsApp:".cyan());
    println!("  {}", lead.url);

    Ok(())
}

fn print_quote(selection: &Selection, table: &PriceTable, quote: &Quote) {
    println!(
        "{} {}, {}, {}, {}",
        "Quote:".bold(),
        selection.area_type.label(),
        selection.material.label(),
        selection.tile_size.label(),
        selection.complexity.label()
    );
    println!();

    for line in &quote.lines {
        println!(
            "  {:<40} {:>8} {:<4} {:>14}",
            line.kind.label(),
            line.quantity,
            line.kind.unit().symbol(),
            format_rub(line.amount)
        );
    }
    println!();

    println!("  {:<40} {:>28}", "Subtotal", format_rub(quote.subtotal));
    if quote.discount > 0.0 {
        println!(
            "  {:<40} {:>28}",
            format!("Turnkey discount {}%", table.extras.package_discount_pct),
            format!("-{}", format_rub(quote.discount))
        );
    }
    println!(
        "  {:<40} {:>28}",
        "Total".bold(),
        format_rub(quote.final_total).green().bold()
    );
    if quote.min_applied {
        println!(
            "  {}",
            format!("Minimum job applied ({})", format_rub(table.extras.min_job)).yellow()
        );
    }
    println!(
        "  {:<40} {:>28}",
        "Work rate per m²".dimmed(),
        format_rub(quote.per_m2_work)
    );
}
