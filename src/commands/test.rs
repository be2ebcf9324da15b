use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tile_estimator::config;
use tracing::info;

/// Execute the test command
///
/// This validates the configuration file without starting the server
pub fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());
    info!("Loading and validating configuration");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Log Level".cyan(), cfg.server.log_level);
    println!("  {}: {}", "Log Format".cyan(), cfg.server.log_format);
    println!();

    println!("  {}: {}", "Data Directory".cyan(), cfg.storage.data_dir.display());
    println!(
        "  {}: {}",
        "Price Edits".cyan(),
        if cfg.storage.read_only {
            "disabled".red()
        } else {
            "enabled".green()
        }
    );
    println!("  {}: {}", "Admin Login".cyan(), cfg.admin.login);
    println!();

    println!("  {}: {}", "Site".cyan(), cfg.contacts.domain);
    println!("  {}: {}", "WhatsApp".cyan(), cfg.contacts.whatsapp_phone);
    println!();

    println!("  {}: {}", "Metrics".cyan(), if cfg.metrics.enabled {
        "enabled".green()
    } else {
        "disabled".red()
    });
    if cfg.metrics.enabled {
        println!("    Endpoint: {}", cfg.metrics.endpoint);
    }

    info!("Configuration validation completed successfully");
    Ok(())
}
