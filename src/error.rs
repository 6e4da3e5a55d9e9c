use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e.to_string())
    }
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            CatalogError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
            CatalogError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Json(_) => StatusCode::BAD_REQUEST,
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Axum IntoResponse implementation (feature-gated)
#[cfg(feature = "axum-support")]
use axum::response::{IntoResponse, Json, Response};
#[cfg(feature = "axum-support")]
use serde::Serialize;

#[cfg(feature = "axum-support")]
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[cfg(feature = "axum-support")]
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            CatalogError::RecipeNotFound(slug) => (
                StatusCode::NOT_FOUND,
                "recipe_not_found",
                format!("Recipe '{}' does not exist", slug),
            ),
            CatalogError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_query", msg.clone())
            }
            CatalogError::InvalidDocument(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_document", msg.clone())
            }
            // Store failures reach clients as one generic retryable signal.
            // The detail stays in the logs.
            CatalogError::Store(detail) => {
                tracing::error!(error = %detail, "store query failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "catalog_unavailable",
                    "Catalog temporarily unavailable, retry shortly".to_string(),
                )
            }
            CatalogError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                format!("IO error: {}", e),
            ),
            CatalogError::Json(e) => (
                StatusCode::BAD_REQUEST,
                "json_error",
                format!("JSON error: {}", e),
            ),
            CatalogError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "config_error",
                format!("Configuration error: {}", e),
            ),
        };

        let error_response = ErrorResponse {
            error: error_code.to_string(),
            message,
            request_id: format!("req_rc_{}", uuid::Uuid::new_v4()),
        };

        let mut response = (status, Json(error_response)).into_response();
        if matches!(&self, CatalogError::Store(_)) {
            response
                .headers_mut()
                .insert("Retry-After", "1".parse().unwrap());
        }
        response
    }
}
