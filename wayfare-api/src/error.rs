use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use wayfare_core::SearchError;

/// HTTP boundary error. The status mapping for the whole search taxonomy
/// lives here and nowhere else; callers below the HTTP layer never see
/// status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Search(SearchError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Search(SearchError::UpstreamUnavailable(err)) => {
                tracing::error!(error = %err, "provider call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    SearchError::UpstreamUnavailable(err).to_string(),
                )
            }
            ApiError::Search(SearchError::NoResults(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Search(err @ SearchError::Internal(_)) => {
                tracing::error!(error = ?err, "internal error during search");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Unexpected(err) => {
                tracing::error!(error = %err, "unexpected error at the API boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while processing the search".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
