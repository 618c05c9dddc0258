//! Show a single post: metadata and heading outline

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::Blog;
use crate::helpers::format_display_date;
use crate::Folio;

pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let blog = folio.load_blog()?;
    for line in render(&blog, &folio.config, slug)? {
        println!("{}", line);
    }
    Ok(())
}

pub fn render(blog: &Blog, config: &SiteConfig, slug: &str) -> Result<Vec<String>> {
    let Some(post) = blog.get_by_slug(slug) else {
        anyhow::bail!("No published post with slug {:?}", slug);
    };

    let mut lines = vec![
        post.title.clone(),
        format!(
            "{} · {} · {}",
            format_display_date(&post.date, &config.date_format),
            post.author,
            post.read_time
        ),
        format!("Category: {}", post.category),
    ];
    if !post.tags.is_empty() {
        lines.push(format!("Tags: {}", post.tags.join(", ")));
    }
    if let Some(cover) = &post.cover_image {
        lines.push(format!("Cover: {}", cover));
    }
    lines.push(format!("URL: {}", config.post_url(&post.slug)));
    lines.push(String::new());
    lines.push(post.excerpt.clone());

    let headings = post.headings();
    if !headings.is_empty() {
        lines.push(String::new());
        lines.push("Contents:".to_string());
        for heading in headings {
            let indent = "  ".repeat(heading.level as usize);
            lines.push(format!("{}{} (#{})", indent, heading.text, heading.id));
        }
    }

    let (newer, older) = blog.neighbors(slug);
    if let Some(newer) = newer {
        lines.push(format!("Newer: {}", newer.slug));
    }
    if let Some(older) = older {
        lines.push(format!("Older: {}", older.slug));
    }

    Ok(lines)
}
