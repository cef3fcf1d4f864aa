//! Category Filter for InspireVault.
//!
//! Owns the category list and the active selection, and derives the visible
//! subset of the bookmark store from it.

use crate::types::bookmark::Bookmark;
use crate::types::category::{Category, ALL_CATEGORY_ID};
use crate::types::errors::CategoryError;

/// Trait defining category selection and filtering.
pub trait CategoryFilterTrait {
    fn set_active_category(&mut self, id: &str) -> Result<(), CategoryError>;
    fn active_category(&self) -> &str;
    fn categories(&self) -> &[Category];
    fn is_assignable(&self, id: &str) -> bool;
    fn filter<'b>(&self, bookmarks: &'b [Bookmark]) -> Vec<&'b Bookmark>;
}

/// In-memory category filter.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    categories: Vec<Category>,
    active_id: String,
}

impl CategoryFilter {
    /// Creates a filter over the given categories.
    ///
    /// The first category flagged active wins; if none is, "all" is selected.
    pub fn new(mut categories: Vec<Category>) -> Self {
        let active_id = categories
            .iter()
            .find(|c| c.active)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| ALL_CATEGORY_ID.to_string());
        for category in categories.iter_mut() {
            category.active = category.id == active_id;
        }
        Self {
            categories,
            active_id,
        }
    }

    /// Categories a bookmark may be filed under (everything but "all").
    pub fn assignable_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.is_all())
    }

    fn contains(&self, id: &str) -> bool {
        id == ALL_CATEGORY_ID || self.categories.iter().any(|c| c.id == id)
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new(Category::defaults())
    }
}

impl CategoryFilterTrait for CategoryFilter {
    /// Marks exactly one category active. Unknown ids leave the selection alone.
    fn set_active_category(&mut self, id: &str) -> Result<(), CategoryError> {
        if !self.contains(id) {
            return Err(CategoryError::NotFound(id.to_string()));
        }
        for category in self.categories.iter_mut() {
            category.active = category.id == id;
        }
        self.active_id = id.to_string();
        tracing::debug!(category = id, "active category changed");
        Ok(())
    }

    fn active_category(&self) -> &str {
        &self.active_id
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn is_assignable(&self, id: &str) -> bool {
        self.assignable_categories().any(|c| c.id == id)
    }

    /// Returns the visible bookmarks, preserving store order.
    fn filter<'b>(&self, bookmarks: &'b [Bookmark]) -> Vec<&'b Bookmark> {
        if self.active_id == ALL_CATEGORY_ID {
            return bookmarks.iter().collect();
        }
        bookmarks
            .iter()
            .filter(|b| b.category == self.active_id)
            .collect()
    }
}
