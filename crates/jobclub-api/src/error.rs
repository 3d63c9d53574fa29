//! Error responses for the read and registration endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use jobclub_integrations::IntegrationError;

/// Errors returned by HTTP handlers, rendered as `{ "error": ... }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An external system failed; `context` is the public message and the
    /// upstream text goes into `details`.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: IntegrationError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(IntegrationError) -> Self {
        move |source| Self::Upstream { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),
            ApiError::Upstream { context, source } => {
                tracing::error!(service = %source.service(), error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": context, "details": source.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
