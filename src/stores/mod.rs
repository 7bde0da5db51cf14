pub mod category_store;
pub mod product_store;
pub mod user_store;
