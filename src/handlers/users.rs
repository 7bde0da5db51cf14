use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::auth::password::hash_password;
use crate::core::error::UserError;
use crate::core::state::AppState;
use crate::models::user::{CreateUserRequest, UserResponse};

fn validate_request(payload: &CreateUserRequest) -> Result<(), UserError> {
    if payload.name.trim().is_empty() {
        return Err(UserError::MissingName);
    }

    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(UserError::InvalidEmail);
    }

    if payload.password.trim().is_empty() {
        return Err(UserError::MissingPassword);
    }

    Ok(())
}

/// List all users
///
/// GET /api/users
pub async fn list_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .iter()
        .map(|user| UserResponse::from(user.as_ref()))
        .collect();

    Json(users)
}

/// Fetch a user by ID
///
/// GET /api/users/{id}
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Response, UserError> {
    let user = state.users.get(id).ok_or(UserError::NotFound)?;

    Ok(Json(UserResponse::from(user.as_ref())).into_response())
}

/// Fetch a user by email
///
/// GET /api/users/email/{email}
pub async fn get_by_email_handler(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Response, UserError> {
    let user = state.users.get_by_email(&email).ok_or(UserError::NotFound)?;

    Ok(Json(UserResponse::from(user.as_ref())).into_response())
}

/// Register a user
///
/// POST /api/users
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, UserError> {
    validate_request(&payload)?;

    // The store claims the email atomically, so two simultaneous
    // registrations of one email cannot both succeed
    let user = state.users.insert(
        payload.name,
        payload.email,
        hash_password(&payload.password),
    )?;

    info!(user_id = user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user.as_ref()))).into_response())
}

/// Update a user's profile
///
/// PUT /api/users/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, UserError> {
    if state.users.get(id).is_none() {
        return Err(UserError::NotFound);
    }

    validate_request(&payload)?;

    // Another account may not hold the new email; the account itself may.
    // The store enforces this atomically.
    let user = state
        .users
        .update(id, payload.name, payload.email, hash_password(&payload.password))?;

    info!(user_id = id, "User updated");

    Ok(Json(UserResponse::from(user.as_ref())).into_response())
}

/// Deactivate a user (soft delete)
///
/// DELETE /api/users/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Response, UserError> {
    if !state.users.deactivate(id) {
        return Err(UserError::NotFound);
    }

    info!(user_id = id, "User deactivated");

    Ok(StatusCode::NO_CONTENT.into_response())
}
