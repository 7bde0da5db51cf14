pub mod core;
pub mod models;
pub mod stores;
pub mod auth;
pub mod rules;
pub mod handlers;
