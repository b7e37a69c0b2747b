//! Proxy error responses

use crate::ratio::UpstreamError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by `/api/longshort`
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream answered with a non-success status; it is forwarded as is
    #[error("Upstream error")]
    UpstreamStatus(StatusCode),
    /// Upstream answered successfully with no data points
    #[error("No data")]
    NoData,
    /// Anything else. Details are logged, never returned.
    #[error("Failed to fetch long/short")]
    Internal(#[source] UpstreamError),
}

impl ProxyError {
    /// Label used for the request outcome counter
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::UpstreamStatus(_) => "upstream_status",
            Self::NoData => "no_data",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Status(status) => Self::UpstreamStatus(status),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            Self::UpstreamStatus(status) => {
                let body = json!({ "error": message, "status": status.as_u16() });
                (status, Json(body)).into_response()
            }
            Self::NoData => (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response(),
            Self::Internal(cause) => {
                tracing::warn!(error = %cause, "Long/short fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
