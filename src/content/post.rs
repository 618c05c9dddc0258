//! Post model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::transform::{self, Heading};
use super::FrontMatter;
use crate::config::SiteConfig;
use crate::helpers::parse_date_string;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (file name without extension), unique within a collection
    pub slug: String,

    pub title: String,

    /// Publication date as written in front-matter, empty if absent
    pub date: String,

    pub author: String,

    /// Tags in declaration order
    pub tags: Vec<String>,

    pub category: String,

    pub cover_image: Option<String>,

    pub featured: bool,

    pub draft: bool,

    /// e.g. "4 min read"
    pub read_time: String,

    pub excerpt: String,

    /// Markdown body after front-matter removal
    pub content: String,
}

impl Post {
    /// Build a post from raw document text, applying the configured
    /// defaults for every missing field.
    pub fn from_source(slug: impl Into<String>, raw: &str, config: &SiteConfig) -> Self {
        let (fm, body) = FrontMatter::parse(raw);
        let blog = &config.blog;

        let excerpt = fm
            .get_str("excerpt")
            .unwrap_or_else(|| transform::derive_excerpt(body, blog.excerpt_length));

        Self {
            slug: slug.into(),
            title: fm
                .get_str("title")
                .unwrap_or_else(|| blog.default_title.clone()),
            date: fm.get_str("date").unwrap_or_default(),
            author: fm.get_str("author").unwrap_or_else(|| config.author.clone()),
            tags: fm.get_list("tags"),
            category: fm
                .get_str("category")
                .unwrap_or_else(|| blog.default_category.clone()),
            cover_image: fm.get_str("coverImage"),
            featured: fm.flag("featured"),
            draft: fm.flag("draft"),
            read_time: transform::estimate_read_time(body, blog.words_per_minute),
            excerpt,
            content: body.to_string(),
        }
    }

    /// Publication date, if it parses
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }

    /// Heading outline of the body
    pub fn headings(&self) -> Vec<Heading> {
        transform::extract_headings(&self.content)
    }

    /// Case-insensitive match against title, excerpt and tags.
    /// An empty query matches every post.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.excerpt.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }

    /// Listing view of the post (everything but the body)
    pub fn summary(&self) -> PostSummary<'_> {
        PostSummary {
            slug: &self.slug,
            title: &self.title,
            date: &self.date,
            author: &self.author,
            tags: &self.tags,
            category: &self.category,
            cover_image: self.cover_image.as_deref(),
            featured: self.featured,
            read_time: &self.read_time,
            excerpt: &self.excerpt,
        }
    }
}

/// Borrowed listing view of a [`Post`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub date: &'a str,
    pub author: &'a str,
    pub tags: &'a [String],
    pub category: &'a str,
    pub cover_image: Option<&'a str>,
    pub featured: bool,
    pub read_time: &'a str,
    pub excerpt: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_source() {
        let raw = "---\ntitle: Hello World\ndate: 2024-01-05\ntags: [ai, ml]\nfeatured: true\n---\n# Intro\nSome body text.";
        let post = Post::from_source("hello-world", raw, &SiteConfig::default());

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.date, "2024-01-05");
        assert_eq!(post.tags, vec!["ai", "ml"]);
        assert!(post.featured);
        assert!(!post.draft);
        assert!(post.content.starts_with("# Intro\nSome body text."));
        assert_eq!(post.read_time, "1 min read");
        assert_eq!(post.excerpt, "Intro Some body text.");
        assert_eq!(
            post.headings(),
            vec![Heading {
                id: "intro".into(),
                text: "Intro".into(),
                level: 1
            }]
        );
    }

    #[test]
    fn test_post_defaults() {
        let config = SiteConfig::default();
        let post = Post::from_source("bare", "Just a body.", &config);

        assert_eq!(post.title, "Untitled");
        assert_eq!(post.date, "");
        assert_eq!(post.author, config.author);
        assert!(post.tags.is_empty());
        assert_eq!(post.category, "General");
        assert_eq!(post.cover_image, None);
        assert!(!post.featured);
        assert!(!post.draft);
        assert_eq!(post.content, "Just a body.");
        assert!(post.parsed_date().is_none());
    }

    #[test]
    fn test_explicit_excerpt_and_cover() {
        let raw = "---\nexcerpt: \"Hand written.\"\ncoverImage: /img/cover.png\nauthor: Guest\ncategory: ML\n---\nBody text here.";
        let post = Post::from_source("x", raw, &SiteConfig::default());
        assert_eq!(post.excerpt, "Hand written.");
        assert_eq!(post.cover_image.as_deref(), Some("/img/cover.png"));
        assert_eq!(post.author, "Guest");
        assert_eq!(post.category, "ML");
    }

    #[test]
    fn test_non_boolean_flags_are_false() {
        let raw = "---\nfeatured: yes\ndraft: 1\ntags: solo\n---\n";
        let post = Post::from_source("x", raw, &SiteConfig::default());
        assert!(!post.featured);
        assert!(!post.draft);
        // a bare string is not a tag list
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_matches() {
        let raw = "---\ntitle: Scaling Transformers\ntags: [LLM, infra]\n---\nNotes on sharding.";
        let post = Post::from_source("x", raw, &SiteConfig::default());
        assert!(post.matches(""));
        assert!(post.matches("transformers"));
        assert!(post.matches("SHARDING"));
        assert!(post.matches("llm"));
        assert!(!post.matches("diffusion"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let post = Post::from_source("x", "---\ncoverImage: a.png\n---\nBody", &SiteConfig::default());
        let json = serde_json::to_value(post.summary()).unwrap();
        assert_eq!(json["coverImage"], "a.png");
        assert_eq!(json["readTime"], "1 min read");
        assert!(json.get("content").is_none());
    }
}
