use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth;
use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::auth::{LoginRequest, TokenResponse};

/// Verify credentials and issue a signed identity token
///
/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let token = auth::login(&state.users, &state.tokens, &payload.email, &payload.password)
        .map_err(|err| {
            // One log line either way; the response never says which factor failed
            warn!(email = %payload.email, "Rejected login");
            err
        })?;

    info!(email = %payload.email, "User logged in");

    Ok(Json(TokenResponse { token }))
}
