//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,
    /// Author used for posts that do not declare one
    pub author: String,

    // Directory
    pub source_dir: String,
    /// Posts directory, relative to `source_dir`
    pub posts_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,

    // Date format (Moment.js tokens)
    pub date_format: String,

    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Sai Sridhar Tarra".to_string(),
            url: "https://saisridhartarra.com".to_string(),
            author: "Sai Sridhar Tarra".to_string(),

            source_dir: "source".to_string(),
            posts_dir: "_posts".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),

            date_format: "MMMM D, YYYY".to_string(),

            blog: BlogConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Canonical URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.url.trim_end_matches('/'), slug)
    }
}

/// Defaults and tuning for the post index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub default_title: String,
    pub default_category: String,
    pub words_per_minute: usize,
    pub excerpt_length: usize,
    /// Keep `draft: true` posts in the collection (preview builds)
    pub render_drafts: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            default_title: "Untitled".to_string(),
            default_category: "General".to_string(),
            words_per_minute: 238,
            excerpt_length: 160,
            render_drafts: false,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.blog.words_per_minute, 238);
        assert_eq!(config.blog.excerpt_length, 160);
        assert_eq!(config.blog.default_category, "General");
        assert!(!config.blog.render_drafts);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
blog:
  default_category: Notes
  words_per_minute: 200
highlight:
  theme: InspiredGitHub
comments: disqus
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.blog.default_category, "Notes");
        assert_eq!(config.blog.words_per_minute, 200);
        // unspecified nested fields keep their defaults
        assert_eq!(config.blog.excerpt_length, 160);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.extra.contains_key("comments"));
    }

    #[test]
    fn test_post_url() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.post_url("hello"), "https://example.com/blog/hello");
    }
}
