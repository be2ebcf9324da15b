use crate::{
    config::{AdminConfig, Config},
    error::AppError,
    metrics,
};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Login/password pair presented by a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Encode as an `Authorization` header value
    pub fn to_basic_header(&self) -> String {
        let raw = format!("{}:{}", self.login, self.password);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Admin identity attached to requests that passed [`admin_middleware`]
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub login: String,
}

/// Compare presented credentials with the configured admin pair
///
/// Both sides are trimmed; comparison is constant-time.
pub fn verify_admin(expected: &AdminConfig, given: &Credentials) -> bool {
    let login_ok = expected
        .login
        .trim()
        .as_bytes()
        .ct_eq(given.login.trim().as_bytes());
    let password_ok = expected
        .password
        .trim()
        .as_bytes()
        .ct_eq(given.password.trim().as_bytes());

    bool::from(login_ok & password_ok)
}

/// Read Basic credentials from request headers
pub fn credentials_from_headers(headers: &HeaderMap) -> Result<Credentials, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    parse_basic_header(auth_header)
}

/// Decode `Basic base64(login:password)`
///
/// The pair is split at the first `:`, so passwords may contain colons.
fn parse_basic_header(auth_header: &str) -> Result<Credentials, AppError> {
    const BASIC_PREFIX: &str = "Basic ";

    let Some(encoded) = auth_header.strip_prefix(BASIC_PREFIX) else {
        return Err(AppError::Unauthorized(
            "Authorization header must use Basic scheme".to_string(),
        ));
    };

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Unauthorized("Malformed Basic credentials".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AppError::Unauthorized("Malformed Basic credentials".to_string()))?;

    let (login, password) = decoded.split_once(':').unwrap_or((decoded.as_str(), ""));

    Ok(Credentials::new(login, password))
}

/// Admin middleware
/// Rejects the request unless it carries the configured admin credentials
pub async fn admin_middleware(
    State(config): State<Arc<arc_swap::ArcSwap<Config>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let endpoint = req.uri().path().to_string();

    let credentials = credentials_from_headers(req.headers()).inspect_err(|_| {
        metrics::record_auth_failure(&endpoint);
    })?;

    let config = config.load();
    if !verify_admin(&config.admin, &credentials) {
        metrics::record_auth_failure(&endpoint);
        tracing::warn!(endpoint = %endpoint, login = %credentials.login, "Rejected admin credentials");
        return Err(AppError::Unauthorized("Invalid login or password".to_string()));
    }

    req.extensions_mut().insert(AdminSession {
        login: credentials.login,
    });

    Ok(next.run(req).await)
}
