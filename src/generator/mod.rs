//! Generator module - writes the post index as static JSON files
//!
//! Layout under the public directory:
//!
//! ```text
//! posts.json          summaries, newest first
//! posts/<slug>.json   full post with rendered HTML and heading outline
//! tags.json
//! categories.json     "All" first
//! featured.json       summaries of featured posts
//! search.json         slug, title, excerpt, tags and category per post
//! ```

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{Blog, Heading, MarkdownRenderer, Post, PostSummary};
use crate::helpers::format_display_date;
use crate::Folio;

/// Detail view of a post, as written to `posts/<slug>.json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub display_date: String,
    pub url: String,
    pub html: String,
    pub headings: Vec<Heading>,
    pub newer: Option<&'a str>,
    pub older: Option<&'a str>,
}

impl<'a> PostPage<'a> {
    pub fn build(
        blog: &'a Blog,
        post: &'a Post,
        renderer: &MarkdownRenderer,
        config: &SiteConfig,
    ) -> Self {
        let (newer, older) = blog.neighbors(&post.slug);
        Self {
            post,
            display_date: format_display_date(&post.date, &config.date_format),
            url: config.post_url(&post.slug),
            html: renderer.render(&post.content),
            headings: post.headings(),
            newer: newer.map(|p| p.slug.as_str()),
            older: older.map(|p| p.slug.as_str()),
        }
    }
}

/// Search index entry
#[derive(Debug, Serialize)]
pub struct SearchEntry<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub tags: &'a [String],
    pub category: &'a str,
}

/// Static JSON generator
pub struct Generator {
    folio: Folio,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            renderer: MarkdownRenderer::with_options(&folio.config.highlight),
            folio: folio.clone(),
        }
    }

    /// Write the whole export. Per-post files from earlier runs are removed
    /// first so deleted or unpublished posts disappear.
    pub fn generate(&self, blog: &Blog) -> Result<()> {
        let public_dir = &self.folio.public_dir;
        let posts_dir = public_dir.join("posts");

        if posts_dir.exists() {
            fs::remove_dir_all(&posts_dir)?;
        }
        fs::create_dir_all(&posts_dir)?;

        let summaries: Vec<PostSummary> = blog.posts().iter().map(Post::summary).collect();
        write_json(&public_dir.join("posts.json"), &summaries)?;

        for post in blog.posts() {
            let page = PostPage::build(blog, post, &self.renderer, &self.folio.config);
            write_json(&posts_dir.join(format!("{}.json", post.slug)), &page)?;
            tracing::debug!("Generated: posts/{}.json", post.slug);
        }

        write_json(&public_dir.join("tags.json"), &blog.all_tags())?;
        write_json(&public_dir.join("categories.json"), &blog.all_categories())?;

        let featured: Vec<PostSummary> = blog.featured().into_iter().map(Post::summary).collect();
        write_json(&public_dir.join("featured.json"), &featured)?;

        let search: Vec<SearchEntry> = blog
            .posts()
            .iter()
            .map(|p| SearchEntry {
                slug: &p.slug,
                title: &p.title,
                excerpt: &p.excerpt,
                tags: &p.tags,
                category: &p.category,
            })
            .collect();
        write_json(&public_dir.join("search.json"), &search)?;

        tracing::info!("Generated {} posts into {:?}", blog.len(), public_dir);
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
