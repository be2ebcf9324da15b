use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    handlers::AppState,
    lead::Lead,
    metrics,
    pricing::{compute_quote, Quote, Selection},
};

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
    pub lead: Lead,
}

/// POST /api/quote
pub async fn create_quote(
    State(state): State<AppState>,
    Json(selection): Json<Selection>,
) -> Json<QuoteResponse> {
    let table = state.prices.load_price_table().await;
    let quote = compute_quote(&table, &selection);

    metrics::record_quote(selection.area_type, selection.material, quote.final_total);
    tracing::debug!(
        area_type = selection.area_type.as_str(),
        material = selection.material.as_str(),
        subtotal = quote.subtotal,
        final_total = quote.final_total,
        min_applied = quote.min_applied,
        "Quote computed"
    );

    let config = state.config.load();
    let lead = Lead::for_quote(&selection, &table, &quote, &config.contacts);

    Json(QuoteResponse { quote, lead })
}
