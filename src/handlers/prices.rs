use axum::{
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::{credentials_from_headers, Credentials},
    error::AppError,
    handlers::AppState,
    metrics,
    pricing::PriceTable,
    store::StoreError,
};

const PRICES_ENDPOINT: &str = "/api/prices";

#[derive(Debug, Default, Deserialize)]
pub struct PricesQuery {
    /// `auth` turns the read into a credential check
    pub mode: Option<String>,
}

/// GET /api/prices
///
/// Public read of the merged table. With `?mode=auth` the same document is
/// returned only for valid admin credentials.
pub async fn get_prices(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
    headers: HeaderMap,
) -> Result<Json<PriceTable>, AppError> {
    if query.mode.as_deref() != Some("auth") {
        return Ok(Json(state.prices.load_price_table().await));
    }

    let credentials = admin_credentials(&headers)?;
    let config = state.config.load();

    let table = state
        .prices
        .load_price_table_authenticated(&credentials, &config.admin)
        .await
        .inspect_err(|e| {
            if matches!(e, StoreError::Unauthorized) {
                metrics::record_auth_failure(PRICES_ENDPOINT);
            }
        })?;

    tracing::info!(login = %credentials.login.trim(), "Admin signed in");
    Ok(Json(table))
}

/// POST /api/prices
///
/// Replaces the stored table. Missing sections and keys take default values.
pub async fn save_prices(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let credentials = admin_credentials(&headers).inspect_err(|_| {
        metrics::record_price_table_write("unauthorized");
    })?;
    let config = state.config.load();

    match state
        .prices
        .save_price_table_json(&body, &credentials, &config.admin)
        .await
    {
        Ok(_) => {
            metrics::record_price_table_write("ok");
            Ok(Json(json!({ "ok": true })))
        }
        Err(e) => {
            let outcome = match &e {
                StoreError::Unauthorized => {
                    metrics::record_auth_failure(PRICES_ENDPOINT);
                    "unauthorized"
                }
                StoreError::WritesDisabled => "disabled",
                StoreError::Invalid(_) => "invalid",
                StoreError::Io(_) | StoreError::Serialization(_) => "error",
            };
            metrics::record_price_table_write(outcome);
            tracing::warn!(outcome, error = %e, "Price table write refused");
            Err(e.into())
        }
    }
}

fn admin_credentials(headers: &HeaderMap) -> Result<Credentials, AppError> {
    credentials_from_headers(headers).inspect_err(|_| {
        metrics::record_auth_failure(PRICES_ENDPOINT);
    })
}
