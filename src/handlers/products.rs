use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::auth;
use crate::core::error::ProductError;
use crate::core::state::AppState;
use crate::models::product::{
    CreateProductRequest, Product, ProductResponse, UpdateProductRequest,
};

fn to_response(state: &AppState, product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
        description: product.description.clone(),
        active: product.is_active,
        user_id: product.user_id,
        categories: state.categories.resolve(&product.category_ids),
    }
}

fn decode_image(encoded: &str) -> Result<Vec<u8>, ProductError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| ProductError::ImageDecode(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ProductError::MissingImage);
    }

    Ok(bytes)
}

fn validate_categories(state: &AppState, category_ids: &[u32]) -> Result<(), ProductError> {
    if category_ids.is_empty() {
        return Err(ProductError::NoCategories);
    }

    for id in category_ids {
        if !state.categories.exists(*id) {
            return Err(ProductError::UnknownCategory(*id));
        }
    }

    Ok(())
}

fn validate_create(state: &AppState, payload: &CreateProductRequest) -> Result<(), ProductError> {
    if payload.name.trim().is_empty() {
        return Err(ProductError::MissingName);
    }

    if payload.price < Decimal::ZERO {
        return Err(ProductError::NegativePrice);
    }

    if payload.description.trim().is_empty() {
        return Err(ProductError::MissingDescription);
    }

    if payload.image.is_empty() {
        return Err(ProductError::MissingImage);
    }

    validate_categories(state, &payload.category_ids)
}

/// List the product catalog
///
/// GET /api/products
pub async fn list_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let products: Vec<ProductResponse> = state
        .products
        .list()
        .iter()
        .map(|product| to_response(&state, product))
        .collect();

    Json(products)
}

/// Fetch a product by ID
///
/// GET /api/products/{id}
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Response, ProductError> {
    let product = state.products.get(id).ok_or(ProductError::NotFound)?;

    Ok(Json(to_response(&state, &product)).into_response())
}

/// Serve a product's image bytes
///
/// GET /api/products/{id}/image
pub async fn image_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Response, ProductError> {
    let image = state.products.get_image(id).ok_or(ProductError::ImageNotFound)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        image,
    )
        .into_response())
}

/// Add a product to the catalog, owned by the logged-in user
///
/// POST /api/products
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Response, ProductError> {
    let claims = auth::authenticate(&headers, &state.tokens)?;
    let user_id = claims.user_id()?;

    // Menu mutations are rejected while the restaurant is open
    state.edit_window.check_now()?;

    validate_create(&state, &payload)?;

    let image = decode_image(&payload.image)?;

    // The store claims the name atomically, so two simultaneous inserts
    // of one name cannot both succeed
    let product = state.products.insert(Product {
        id: 0, // assigned by the store
        name: payload.name,
        price: payload.price,
        description: payload.description,
        image,
        is_active: true,
        user_id,
        category_ids: payload.category_ids,
    })?;

    info!(product_id = product.id, user_id, "Product added");

    Ok((StatusCode::CREATED, Json(to_response(&state, &product))).into_response())
}

/// Update a product
///
/// PUT /api/products/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Response, ProductError> {
    auth::authenticate(&headers, &state.tokens)?;

    state.edit_window.check_now()?;

    let stored = state.products.get(id).ok_or(ProductError::NotFound)?;

    if payload.name.trim().is_empty() {
        return Err(ProductError::MissingName);
    }

    if payload.price < Decimal::ZERO {
        return Err(ProductError::NegativePrice);
    }

    if payload.description.trim().is_empty() {
        return Err(ProductError::MissingDescription);
    }

    validate_categories(&state, &payload.category_ids)?;

    // Image and visibility keep their stored values unless the request
    // provides replacements
    let image = match &payload.image {
        Some(encoded) if !encoded.is_empty() => decode_image(encoded)?,
        _ => stored.image.clone(),
    };

    let is_active = payload.active.unwrap_or(stored.is_active);

    // The store rejects a name held by another product atomically
    let product = state.products.update(Product {
        id,
        name: payload.name,
        price: payload.price,
        description: payload.description,
        image,
        is_active,
        user_id: stored.user_id,
        category_ids: payload.category_ids,
    })?;

    info!(product_id = id, "Product updated");

    Ok(Json(to_response(&state, &product)).into_response())
}

/// Remove a product from the catalog
///
/// DELETE /api/products/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
) -> Result<Response, ProductError> {
    auth::authenticate(&headers, &state.tokens)?;

    state.edit_window.check_now()?;

    if !state.products.remove(id) {
        return Err(ProductError::NotFound);
    }

    info!(product_id = id, "Product removed");

    Ok(StatusCode::NO_CONTENT.into_response())
}
