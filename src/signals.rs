use anyhow::Result;
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::config::Config;

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections, clean up)
    Graceful,
}

/// Setup signal handlers for the server
///
/// Returns a broadcast sender for shutdown signals and a join handle for the signal task
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Configuration reload from `config_path`
#[cfg(unix)]
pub fn setup_signal_handlers(
    config: Arc<ArcSwap<Config>>,
    config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let streams = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        );
        let (mut sigterm, mut sigint, mut sighup) = match streams {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                error!("Failed to install unix signal handlers, falling back to Ctrl+C only");
                wait_for_ctrl_c(tx_clone).await;
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading configuration");
                    if let Err(e) = reload_config(&config, &config_path) {
                        error!("Failed to reload configuration: {}", e);
                    } else {
                        info!("Configuration reloaded successfully");
                    }
                }
            }
        }
    });

    (shutdown_tx, handle)
}

/// Non-unix platforms only get Ctrl+C
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _config: Arc<ArcSwap<Config>>,
    _config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let handle = tokio::spawn(wait_for_ctrl_c(shutdown_tx.clone()));

    (shutdown_tx, handle)
}

async fn wait_for_ctrl_c(tx: broadcast::Sender<ShutdownSignal>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Ctrl+C received, initiating shutdown");
            let _ = tx.send(ShutdownSignal::Graceful);
        }
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    }
}

/// Reload configuration atomically
///
/// Admin credentials and contacts take effect for the next request. Listener
/// address and storage settings need a restart. On error the old
/// configuration stays in place.
pub fn reload_config(config: &ArcSwap<Config>, config_path: &Path) -> Result<()> {
    let new_config = crate::config::load_config(config_path)?;

    let current = config.load();
    if new_config.server.host != current.server.host
        || new_config.server.port != current.server.port
        || new_config.storage.data_dir != current.storage.data_dir
        || new_config.storage.read_only != current.storage.read_only
    {
        tracing::warn!("Server address and storage changes take effect after a restart");
    }

    info!(
        admin = %new_config.admin.login,
        whatsapp = %new_config.contacts.whatsapp_phone,
        "New configuration loaded"
    );

    config.store(Arc::new(new_config));
    Ok(())
}
