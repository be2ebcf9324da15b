use axum::Json;

use crate::pricing::{suggest_linear, LinearHelperInput, LinearSuggestion};

/// POST /api/helper/linear
pub async fn linear_helper(Json(input): Json<LinearHelperInput>) -> Json<LinearSuggestion> {
    Json(suggest_linear(&input))
}
