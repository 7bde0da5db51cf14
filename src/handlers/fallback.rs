use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::models::response::ErrorResponse;

/// JSON 404 for all unmatched routes
pub async fn fallback_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Unknown endpoint".to_string(),
        }),
    )
        .into_response()
}
