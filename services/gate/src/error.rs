use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Gate service error variants.
///
/// A code mismatch is NOT represented here; it is a normal negative
/// outcome surfaced in the response body, not an error.
#[derive(Debug, thiserror::Error)]
pub enum GateServiceError {
    #[error("session required")]
    InvalidSession,
    #[error("code store unavailable")]
    StoreUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GateServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSession => "INVALID_SESSION",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GateServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
