//! Read-only queries over an indexed post collection

use std::collections::BTreeSet;

use super::index::{index_documents, RawDocument};
use super::Post;
use crate::config::SiteConfig;

/// Category sentinel that matches every post
pub const ALL_CATEGORIES: &str = "All";

/// An immutable, date-sorted collection of published posts.
///
/// Built once from raw documents and never mutated; share it behind an
/// `Arc` and rebuild a fresh one when sources change.
#[derive(Debug, Clone, Default)]
pub struct Blog {
    posts: Vec<Post>,
}

impl Blog {
    /// Index documents into a new collection
    pub fn build<I>(documents: I, config: &SiteConfig) -> Self
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let posts = index_documents(documents, config);
        tracing::info!("Indexed {} posts", posts.len());
        Self { posts }
    }

    /// Wrap posts that are already filtered and ordered
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Every tag used by any post, sorted alphabetically
    pub fn all_tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `"All"` followed by the distinct categories in alphabetical order
    pub fn all_categories(&self) -> Vec<String> {
        let categories: BTreeSet<&str> = self.posts.iter().map(|p| p.category.as_str()).collect();

        std::iter::once(ALL_CATEGORIES)
            .chain(categories)
            .map(str::to_string)
            .collect()
    }

    pub fn featured(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.featured).collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Posts in `category`; the `"All"` sentinel returns every post
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| category == ALL_CATEGORIES || p.category == category)
            .collect()
    }

    /// Blog listing filter: free-text `query` (see [`Post::matches`])
    /// combined with an optional category.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&Post> {
        let category = category.unwrap_or(ALL_CATEGORIES);
        self.by_category(category)
            .into_iter()
            .filter(|p| p.matches(query))
            .collect()
    }

    /// The posts published right after and right before `slug`,
    /// as `(newer, older)`
    pub fn neighbors(&self, slug: &str) -> (Option<&Post>, Option<&Post>) {
        let Some(pos) = self.posts.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };
        let newer = pos.checked_sub(1).and_then(|i| self.posts.get(i));
        let older = self.posts.get(pos + 1);
        (newer, older)
    }
}
