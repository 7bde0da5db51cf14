use dashmap::DashMap;
use std::sync::Arc;

use crate::models::category::Category;

/// Read-mostly store of category tags, seeded from configuration at startup
pub struct CategoryStore {
    categories: DashMap<u32, Arc<Category>>,
}

impl CategoryStore {
    pub fn with_names(names: &[String]) -> Self {
        let categories = DashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let id = index as u32 + 1;
            categories.insert(
                id,
                Arc::new(Category {
                    id,
                    name: name.clone(),
                }),
            );
        }
        Self { categories }
    }

    pub fn get(&self, id: u32) -> Option<Arc<Category>> {
        self.categories.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn exists(&self, id: u32) -> bool {
        self.categories.contains_key(&id)
    }

    /// Resolve ids to categories, keeping the request's order and skipping
    /// ids that no longer exist
    pub fn resolve(&self, ids: &[u32]) -> Vec<Category> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|category| (*category).clone())
            .collect()
    }

    pub fn list(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .map(|entry| (**entry.value()).clone())
            .collect();
        categories.sort_by_key(|category| category.id);
        categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
