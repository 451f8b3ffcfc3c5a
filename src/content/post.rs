//! Post model

use chrono::{DateTime, Local};
use serde::Serialize;

/// A blog post record.
///
/// Constructed once per load pass from a file snapshot and immutable
/// thereafter; the rendering pipeline only ever borrows it.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Slug derived from the source file name, unique across the store
    pub slug: String,

    /// Post title (required front-matter key)
    pub title: String,

    /// Publication date (required front-matter key)
    pub date: DateTime<Local>,

    /// Summary shown on listing cards
    pub description: Option<String>,

    /// Cover image path with exactly one leading slash
    pub image: Option<String>,

    /// Categories the post belongs to
    pub categories: Vec<String>,

    /// Raw markdown body
    pub raw: String,
}

impl Post {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
