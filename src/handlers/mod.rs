pub mod contacts;
pub mod estimate;
pub mod health;
pub mod helper;
pub mod metrics_handler;
pub mod prices;
pub mod quote;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::Config;
use crate::estimate::{EstimateArchive, EstimateRenderer};
use crate::store::PriceTableStore;

/// Shared state for the pricing API
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub prices: Arc<PriceTableStore>,
    pub archive: Arc<EstimateArchive>,
    pub renderer: Arc<dyn EstimateRenderer>,
}
