use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Missing or mismatched admin credentials
    Unauthorized(String),
    /// Malformed request
    BadRequest(String),
    /// Requested document does not exist
    NotFound(String),
    /// Persistent writes are switched off for this deployment
    WritesDisabled(String),
    /// Storage backend failure
    StorageError(String),
    /// Rendering or other unexpected failure
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::WritesDisabled(msg) => write!(f, "Writes disabled: {}", msg),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::WritesDisabled(msg) => (StatusCode::NOT_IMPLEMENTED, msg.clone()),
            Self::StorageError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Unauthorized(_) => "unauthorized",
        AppError::BadRequest(_) => "bad_request",
        AppError::NotFound(_) => "not_found",
        AppError::WritesDisabled(_) => "writes_disabled",
        AppError::StorageError(_) => "storage_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthorized => Self::Unauthorized(err.to_string()),
            StoreError::WritesDisabled => Self::WritesDisabled(err.to_string()),
            StoreError::Invalid(msg) => Self::BadRequest(msg),
            StoreError::Io(_) | StoreError::Serialization(_) => Self::StorageError(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::NotFound("smeta_1.txt".to_string());
        assert_eq!(error.to_string(), "Not found: smeta_1.txt");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(error_type_name(&AppError::Unauthorized("test".to_string())), "unauthorized");
        assert_eq!(error_type_name(&AppError::WritesDisabled("test".to_string())), "writes_disabled");
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(AppError::from(StoreError::Unauthorized), AppError::Unauthorized(_)));
        assert!(matches!(AppError::from(StoreError::WritesDisabled), AppError::WritesDisabled(_)));
        assert!(matches!(
            AppError::from(StoreError::Invalid("extras.minJob".to_string())),
            AppError::BadRequest(msg) if msg == "extras.minJob"
        ));
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(AppError::from(StoreError::Io(io)), AppError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_error_response() {
        let error = AppError::Unauthorized("Invalid credentials".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AppError::WritesDisabled("read-only".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_anyhow_becomes_internal_error() {
        let error = AppError::from(anyhow::anyhow!("template exploded"));
        assert!(matches!(&error, AppError::InternalError(msg) if msg == "template exploded"));
        assert_eq!(error_type_name(&error), "internal_error");
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
