// Application state (AppState)

use crate::auth::token::TokenIssuer;
use crate::core::config::Config;
use crate::rules::edit_window::EditWindow;
use crate::stores::{
    category_store::CategoryStore, product_store::ProductStore, user_store::UserStore,
};
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// User accounts
    pub users: Arc<UserStore>,

    /// Product catalog
    pub products: Arc<ProductStore>,

    /// Category tags, seeded from configuration
    pub categories: Arc<CategoryStore>,

    /// Signed-token issuance and verification
    pub tokens: Arc<TokenIssuer>,

    /// Operating-hours gate on product mutations
    pub edit_window: EditWindow,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let tokens = Arc::new(TokenIssuer::new(&config.jwt));
        let categories = Arc::new(CategoryStore::with_names(&config.catalog.categories));
        let edit_window = EditWindow::new(&config.hours);

        Self {
            users: Arc::new(UserStore::new()),
            products: Arc::new(ProductStore::new()),
            categories,
            tokens,
            edit_window,
            config,
        }
    }
}
