// Centralized error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveTime;
use thiserror::Error;

use crate::models::response::ErrorResponse;
use crate::stores::product_store::CatalogWriteError;
use crate::stores::user_store::AccountWriteError;

/// Errors from credential verification and token handling
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email and wrong password share one variant so the response
    /// never reveals which factor failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("JWT secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::SecretTooShort { .. } => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AuthError::TokenEncoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_message,
            }),
        )
            .into_response()
    }
}

/// Violation of the operating-hours rule for product mutations
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Products may only be changed outside operating hours ({opening} to {closing}, now {now})")]
    InsideOperatingHours {
        now: NaiveTime,
        opening: NaiveTime,
        closing: NaiveTime,
    },
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("A user with that email already exists")]
    EmailTaken,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Name is required")]
    MissingName,
}

impl From<AccountWriteError> for UserError {
    fn from(err: AccountWriteError) -> Self {
        match err {
            AccountWriteError::NotFound => UserError::NotFound,
            AccountWriteError::EmailTaken => UserError::EmailTaken,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            UserError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            UserError::EmailTaken => (StatusCode::BAD_REQUEST, self.to_string()),
            UserError::InvalidEmail => (StatusCode::BAD_REQUEST, self.to_string()),
            UserError::MissingPassword => (StatusCode::BAD_REQUEST, self.to_string()),
            UserError::MissingName => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_message,
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("A product with that name already exists")]
    NameTaken,

    #[error("Name is required")]
    MissingName,

    #[error("Price must not be negative")]
    NegativePrice,

    #[error("Description is required")]
    MissingDescription,

    #[error("Image is required")]
    MissingImage,

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Image not found")]
    ImageNotFound,

    #[error("Product must have at least one category")]
    NoCategories,

    #[error("Unknown category id: {0}")]
    UnknownCategory(u32),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<CatalogWriteError> for ProductError {
    fn from(err: CatalogWriteError) -> Self {
        match err {
            CatalogWriteError::NotFound => ProductError::NotFound,
            CatalogWriteError::NameTaken => ProductError::NameTaken,
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        // Auth failures keep their own status mapping
        if let ProductError::Auth(err) = self {
            return err.into_response();
        }

        let (status, error_message) = match &self {
            ProductError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ProductError::ImageNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            _ => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_message,
            }),
        )
            .into_response()
    }
}
