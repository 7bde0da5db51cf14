use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::core::state::AppState;

/// List the category tags products can carry
///
/// GET /api/categories
pub async fn list_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.categories.list())
}
