use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{
    auth::AdminSession,
    error::AppError,
    estimate::{content_type_for, EstimateDocument},
    handlers::AppState,
    metrics,
    pricing::{compute_quote, Selection},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateCreated {
    pub ok: bool,
    pub file: String,
    pub download_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub file: Option<String>,
}

/// POST /api/estimate
///
/// Quotes the selection against the current prices, renders the estimate
/// and archives it.
pub async fn create_estimate(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(selection): Json<Selection>,
) -> Result<Json<EstimateCreated>, AppError> {
    let table = state.prices.load_price_table().await;
    let quote = compute_quote(&table, &selection);

    let contacts = state.config.load().contacts.clone();
    let doc = EstimateDocument::from_quote(
        &selection,
        &quote,
        &table,
        &contacts,
        chrono::Local::now(),
    );

    let bytes = state.renderer.render(&doc)?;
    let file = state
        .archive
        .save(&bytes, state.renderer.extension())
        .await
        .map_err(|e| AppError::StorageError(format!("Failed to archive estimate: {}", e)))?;

    metrics::record_estimate();
    tracing::info!(
        login = %session.login,
        file = %file,
        final_total = quote.final_total,
        "Estimate archived"
    );

    let encoded: String = form_urlencoded::byte_serialize(file.as_bytes()).collect();
    Ok(Json(EstimateCreated {
        ok: true,
        download_url: format!("/api/estimate?file={}", encoded),
        file,
    }))
}

/// GET /api/estimate?file=
pub async fn download_estimate(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let requested = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'file' parameter".to_string()))?;

    let Some(path) = state.archive.resolve(&requested) else {
        return Err(AppError::NotFound(requested));
    };
    // resolve() already kept only the final component
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let bytes = state
        .archive
        .open(&name)
        .await
        .map_err(|e| AppError::StorageError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(name.clone()))?;

    let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&name).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        bytes,
    )
        .into_response())
}
