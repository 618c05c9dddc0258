//! Post indexing: raw documents in, sorted published posts out

use indexmap::IndexMap;

use super::Post;
use crate::config::SiteConfig;

/// A document as handed over by a loader: source path plus raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub path: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn slug(&self) -> &str {
        slug_from_path(&self.path)
    }
}

/// File name without its extension: `posts/hello.md` -> `hello`
pub fn slug_from_path(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// Index documents into posts.
///
/// Documents are processed in iteration order; when two share a slug the
/// later one replaces the earlier. Drafts are dropped unless
/// `blog.render_drafts` is set. The result is sorted newest first, with
/// undated or unparseable dates after every dated post and ties kept in
/// input order.
pub fn index_documents<I>(documents: I, config: &SiteConfig) -> Vec<Post>
where
    I: IntoIterator<Item = RawDocument>,
{
    let mut by_slug: IndexMap<String, Post> = IndexMap::new();

    for doc in documents {
        let slug = doc.slug().to_string();
        let post = Post::from_source(slug.clone(), &doc.text, config);
        tracing::debug!("Indexed {} ({})", slug, doc.path);

        if let Some(previous) = by_slug.shift_remove(&slug) {
            tracing::warn!(
                "Duplicate slug {:?}: {:?} replaces an earlier post titled {:?}",
                slug,
                doc.path,
                previous.title
            );
        }
        by_slug.insert(slug, post);
    }

    let mut posts: Vec<Post> = by_slug
        .into_values()
        .filter(|p| config.blog.render_drafts || !p.draft)
        .collect();

    sort_newest_first(&mut posts);
    posts
}

/// Stable sort by date descending; `None` dates compare as the earliest.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(p.parsed_date()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str, front: &str) -> RawDocument {
        RawDocument::new(path, format!("---\n{}\n---\nBody of {}.", front, path))
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path("./posts/hello-world.md"), "hello-world");
        assert_eq!(slug_from_path("C:\\blog\\intro.markdown"), "intro");
        assert_eq!(slug_from_path("notes.v2.md"), "notes.v2");
        assert_eq!(slug_from_path("README"), "README");
        assert_eq!(slug_from_path("posts/.hidden"), ".hidden");
    }

    #[test]
    fn test_sorted_newest_first() {
        let posts = index_documents(
            vec![
                doc("a.md", "date: 2024-01-01"),
                doc("b.md", "date: 2024-02-01"),
            ],
            &SiteConfig::default(),
        );
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_undated_sort_last_in_input_order() {
        let posts = index_documents(
            vec![
                doc("none.md", "title: No date"),
                doc("bad.md", "date: whenever"),
                doc("old.md", "date: 1999-12-31"),
                doc("new.md", "date: 2025-06-01 08:00"),
            ],
            &SiteConfig::default(),
        );
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "none", "bad"]);

        for pair in posts.windows(2) {
            assert!(pair[0].parsed_date() >= pair[1].parsed_date());
        }
    }

    #[test]
    fn test_drafts_excluded() {
        let docs = vec![
            doc("live.md", "date: 2024-01-01"),
            doc("wip.md", "date: 2024-03-01\ndraft: true"),
        ];
        let posts = index_documents(docs.clone(), &SiteConfig::default());
        assert_eq!(posts.len(), 1);
        assert!(posts.iter().all(|p| !p.draft));

        let mut config = SiteConfig::default();
        config.blog.render_drafts = true;
        let posts = index_documents(docs, &config);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "wip");
    }

    #[test]
    fn test_duplicate_slug_last_wins() {
        let posts = index_documents(
            vec![
                doc("2023/post.md", "title: First"),
                doc("2024/post.md", "title: Second"),
            ],
            &SiteConfig::default(),
        );
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Second");
    }

    #[test]
    fn test_empty_input() {
        assert!(index_documents(Vec::new(), &SiteConfig::default()).is_empty());
    }
}
