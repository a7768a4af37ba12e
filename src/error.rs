//! Caller-visible error taxonomy for search and area lookups

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::{ErrorBody, NotFoundBody, ProblemBody};

pub const INVALID_QUERY_MESSAGE: &str = "Query parameter 'q' is required.";
pub const FETCH_FAILED_TITLE: &str = "Unable to fetch search results.";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query parameter 'q' is required.")]
    InvalidQuery,

    #[error("upstream returned status {status}")]
    Upstream { status: u16 },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search request was cancelled")]
    Cancelled,
}

impl SearchError {
    /// Status code sent back to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Upstream { status } => StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_server_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Transport(_) | Self::Cancelled => StatusCode::BAD_GATEWAY,
        }
    }

    /// Status reported by the upstream site, when it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::InvalidQuery => (
                status,
                Json(ErrorBody {
                    error: INVALID_QUERY_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ProblemBody {
                    title: FETCH_FAILED_TITLE.to_string(),
                    status: status.as_u16(),
                    upstream_status: other.upstream_status(),
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown area: {area}")]
    AreaNotFound { area: String },

    #[error("Product '{product_id}' not found in area '{area}'")]
    ProductNotFound { area: String, product_id: String },
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(NotFoundBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
