use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{extract::DefaultBodyLimit, middleware, routing::{get, post}, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    auth,
    config::Config,
    estimate::{EstimateArchive, TextRenderer},
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
    store::{DocumentStore, FileStore, MemoryStore, PriceTableStore},
};

/// Request bodies above this size are rejected
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Start the pricing service
///
/// This function:
/// 1. Initializes metrics
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Opens the price store and the estimates archive
/// 4. Serves requests with graceful shutdown support
///
/// With `ephemeral` the price table lives in memory and is lost on exit.
pub async fn start_server(config: Config, config_path: PathBuf, ephemeral: bool) -> Result<()> {
    let metrics_endpoint = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        let handle = Arc::new(metrics::init_metrics()?);
        Some((config.metrics.endpoint.clone(), handle))
    } else {
        None
    };

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let backend: Box<dyn DocumentStore> = if ephemeral {
        info!("Using in-memory price storage");
        Box::new(MemoryStore::new())
    } else {
        info!(data_dir = %config.storage.data_dir.display(), "Using file price storage");
        Box::new(FileStore::new(&config.storage.data_dir))
    };

    let state = AppState {
        config: config_swap,
        prices: Arc::new(PriceTableStore::new(backend, config.storage.read_only)),
        archive: Arc::new(EstimateArchive::new(config.storage.estimates_dir())),
        renderer: Arc::new(TextRenderer::new()?),
    };

    let app = create_router(state, metrics_endpoint);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting tile estimator on {}", addr);
    if config.storage.read_only {
        info!("Price edits are disabled (storage.read_only = true)");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` is the exposition path and recorder handle, when enabled.
pub fn create_router(state: AppState, metrics: Option<(String, Arc<PrometheusHandle>)>) -> Router {
    // Estimates are admin-only
    let admin_routes = Router::new()
        .route(
            "/api/estimate",
            post(handlers::estimate::create_estimate).get(handlers::estimate::download_estimate),
        )
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth::admin_middleware,
        ));

    // Price writes check credentials inside the store
    let api_routes = Router::new()
        .route(
            "/api/prices",
            get(handlers::prices::get_prices).post(handlers::prices::save_prices),
        )
        .route("/api/quote", post(handlers::quote::create_quote))
        .route("/api/contacts", get(handlers::contacts::get_contacts))
        .route("/api/helper/linear", post(handlers::helper::linear_helper))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(admin_routes)
        .with_state(state);

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes);

    if let Some((endpoint, handle)) = metrics {
        app = app.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    app.layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
