use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub contacts: ContactsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// The single admin credential pair guarding price edits and estimates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_login")]
    pub login: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login: default_admin_login(),
            password: default_admin_password(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding prices.json and the estimates archive
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Refuse price writes (hosts without a persistent disk)
    #[serde(default)]
    pub read_only: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            read_only: false,
        }
    }
}

impl StorageConfig {
    pub fn estimates_dir(&self) -> PathBuf {
        self.data_dir.join("estimates")
    }
}

/// Public contact details used in lead messages and estimates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactsConfig {
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_phone_display")]
    pub phone_display: String,
    #[serde(default = "default_whatsapp_phone")]
    pub whatsapp_phone: String,
    /// Greeting used when no quote is attached
    #[serde(default = "default_whatsapp_text")]
    pub whatsapp_text: String,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            phone_display: default_phone_display(),
            whatsapp_phone: default_whatsapp_phone(),
            whatsapp_text: default_whatsapp_text(),
        }
    }
}

impl ContactsConfig {
    /// "domain, phone" line printed on estimates
    pub fn summary(&self) -> String {
        format!("{}, {}", self.domain, self.phone_display)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            endpoint: default_metrics_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_admin_login() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_domain() -> String {
    "masterplitkivl.ru".to_string()
}

fn default_phone_display() -> String {
    "+7\u{a0}951\u{a0}005-00-02".to_string()
}

fn default_whatsapp_phone() -> String {
    "79510050002".to_string()
}

fn default_whatsapp_text() -> String {
    "Привет! Хочу рассчитать стоимость укладки плитки.".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

/// Load configuration from an optional TOML file and the environment
///
/// `TILE_ESTIMATOR__ADMIN__PASSWORD=...` style variables override the file;
/// the plain `ADMIN_LOGIN` / `ADMIN_PASSWORD` variables override both.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("TILE_ESTIMATOR")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("admin.login", std::env::var("ADMIN_LOGIN").ok())?
        .set_override_option("admin.password", std::env::var("ADMIN_PASSWORD").ok())?
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.admin.login.trim().is_empty() {
        anyhow::bail!("Admin login cannot be empty");
    }

    if cfg.admin.password.trim().is_empty() {
        anyhow::bail!("Admin password cannot be empty");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}', expected 'text' or 'json'", other),
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!(
            "Metrics endpoint must start with '/', got '{}'",
            cfg.metrics.endpoint
        );
    }

    if cfg.contacts.whatsapp_phone.chars().all(|c| !c.is_ascii_digit()) {
        anyhow::bail!("WhatsApp phone must contain digits");
    }

    Ok(())
}
