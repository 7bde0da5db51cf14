use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::models::product::Product;

/// Rejection reasons for catalog writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogWriteError {
    #[error("product not found")]
    NotFound,

    #[error("name already claimed")]
    NameTaken,
}

/// In-memory store for the product catalog.
///
/// The name index is the uniqueness authority: a write claims its name
/// through the index entry before the product becomes visible, so two
/// simultaneous inserts of one name cannot both succeed.
pub struct ProductStore {
    products: DashMap<u32, Arc<Product>>,
    names: DashMap<String, u32>,
    next_id: AtomicU32,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Add a product, claiming the name and assigning the next ID
    pub fn insert(&self, mut product: Product) -> Result<Arc<Product>, CatalogWriteError> {
        match self.names.entry(product.name.clone()) {
            Entry::Occupied(_) => Err(CatalogWriteError::NameTaken),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                product.id = id;
                slot.insert(id);

                let product = Arc::new(product);
                self.products.insert(id, Arc::clone(&product));
                Ok(product)
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<Arc<Product>> {
        self.products.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Image bytes for a product, if it exists and has one
    pub fn get_image(&self, id: u32) -> Option<Vec<u8>> {
        self.products
            .get(&id)
            .map(|entry| entry.value().image.clone())
            .filter(|image| !image.is_empty())
    }

    /// Replace a stored product, re-claiming the name when it changes.
    /// The freed name becomes available to other products. Concurrent
    /// renames of the same product resolve last-writer-wins.
    pub fn update(&self, product: Product) -> Result<Arc<Product>, CatalogWriteError> {
        let current = self.get(product.id).ok_or(CatalogWriteError::NotFound)?;

        if product.name != current.name {
            match self.names.entry(product.name.clone()) {
                Entry::Occupied(entry) => {
                    if *entry.get() != product.id {
                        return Err(CatalogWriteError::NameTaken);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(product.id);
                }
            }
            self.names.remove(&current.name);
        }

        match self.products.get_mut(&product.id) {
            Some(mut entry) => {
                let updated = Arc::new(product);
                *entry.value_mut() = Arc::clone(&updated);
                Ok(updated)
            }
            None => {
                // Removed while we were re-keying; release the claim
                self.names.remove(&product.name);
                Err(CatalogWriteError::NotFound)
            }
        }
    }

    /// Remove a product, releasing its name
    /// Returns true if it existed
    pub fn remove(&self, id: u32) -> bool {
        match self.products.remove(&id) {
            Some((_, product)) => {
                self.names.remove(&product.name);
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> Vec<Arc<Product>> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        products.sort_by_key(|product| product.id);
        products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
