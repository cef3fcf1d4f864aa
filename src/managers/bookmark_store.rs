//! Bookmark Store for InspireVault.
//!
//! Implements `BookmarkStoreTrait`: an owned, in-memory ordered collection of
//! bookmark cards. New bookmarks go to the front; likes only ever increment.

use chrono::NaiveDate;

use crate::types::bookmark::{seed_bookmarks, Bookmark, BookmarkDraft};
use crate::types::errors::BookmarkError;

/// Trait defining bookmark store operations.
pub trait BookmarkStoreTrait {
    fn add_bookmark(&mut self, draft: BookmarkDraft, date_added: NaiveDate) -> Bookmark;
    fn like_bookmark(&mut self, id: u64) -> Result<u64, BookmarkError>;
    fn get_bookmark(&self, id: u64) -> Option<&Bookmark>;
    fn list_bookmarks(&self) -> &[Bookmark];
    fn bookmark_count(&self) -> usize;
}

/// In-memory bookmark store.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the featured seed bookmarks.
    pub fn seeded() -> Self {
        Self::from_bookmarks(seed_bookmarks())
    }

    pub fn from_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        Self { bookmarks }
    }

    fn find_index(&self, id: u64) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    /// Shapes the draft into a bookmark and prepends it. Returns the new record.
    ///
    /// The id is `count + 1`. That is only unique while nothing is ever
    /// removed from the store.
    fn add_bookmark(&mut self, draft: BookmarkDraft, date_added: NaiveDate) -> Bookmark {
        let bookmark = Bookmark {
            id: self.bookmarks.len() as u64 + 1,
            title: draft.title,
            url: draft.url,
            description: draft.description,
            category: draft.category,
            thumbnail_image: draft.thumbnail_image,
            date_added,
            likes: 0,
            source: None,
        };
        self.bookmarks.insert(0, bookmark.clone());
        tracing::debug!(id = bookmark.id, category = %bookmark.category, "bookmark added");
        bookmark
    }

    /// Increments the like counter by one. Returns the new count.
    fn like_bookmark(&mut self, id: u64) -> Result<u64, BookmarkError> {
        let idx = self.find_index(id).ok_or(BookmarkError::NotFound(id))?;
        let bookmark = &mut self.bookmarks[idx];
        bookmark.likes = bookmark.likes.saturating_add(1);
        Ok(bookmark.likes)
    }

    fn get_bookmark(&self, id: u64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn bookmark_count(&self) -> usize {
        self.bookmarks.len()
    }
}
