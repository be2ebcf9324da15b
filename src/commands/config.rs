use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tile_estimator::config::{self, Config};
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Data Directory: {}", cfg.storage.data_dir.display());
    println!("  Read Only: {}", cfg.storage.read_only);

    if cfg.admin.login.trim() == "admin" && cfg.admin.password.trim() == "admin123" {
        println!(
            "{}",
            "  Warning: default admin credentials are in use".yellow()
        );
    }

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.admin.password = mask_secret(&cfg.admin.password);
    sanitized
}

/// Never reveals more than the first and last character
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 8 {
        return "***".to_string();
    }

    format!("{}***{}", chars[0], chars[chars.len() - 1])
}
