use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::category::Category;

#[derive(Clone, Debug)]
pub struct Product {
    /// Product ID
    pub id: u32,
    /// Product name, unique across the catalog
    pub name: String,
    pub price: Decimal,
    pub description: String,
    /// Raw image bytes, served as image/jpeg
    pub image: Vec<u8>,
    /// Whether the product is visible on the menu
    pub is_active: bool,
    /// ID of the user that registered the product
    pub user_id: u32,
    /// IDs of the categories the product is tagged with, at least one
    pub category_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    /// Base64-encoded image bytes
    pub image: String,
    pub category_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    /// Base64-encoded image bytes; the stored image is kept when absent
    #[serde(default)]
    pub image: Option<String>,
    /// Menu visibility; the stored flag is kept when absent
    #[serde(default)]
    pub active: Option<bool>,
    pub category_ids: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: u32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub active: bool,
    pub user_id: u32,
    pub categories: Vec<Category>,
}
