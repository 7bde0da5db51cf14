pub mod password;
pub mod token;

use axum::http::{header, HeaderMap};

use crate::core::error::AuthError;
use crate::stores::user_store::UserStore;
use token::{Claims, TokenIssuer};

/// Verify credentials and issue a signed token.
///
/// Unknown email and wrong password take the same error path so the caller
/// cannot tell which factor was wrong. No account state is mutated.
pub fn login(
    users: &UserStore,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<String, AuthError> {
    let user = users
        .get_by_email(email)
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    tokens.issue(&user)
}

/// Extract and verify the bearer token from the request headers
pub fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<Claims, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = value.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;

    tokens.decode(token)
}
