//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create a new post file from the front-matter scaffold.
/// Returns the path of the created file.
pub fn create_post(folio: &Folio, title: &str, draft: bool) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&folio.posts_dir)?;

    let filename = folio
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = folio.posts_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: "{}"
date: {}
author: {}
tags: []
category: {}
featured: false
draft: {}
---
"#,
        title.replace('"', "'"),
        now.format("%Y-%m-%d"),
        folio.config.author,
        folio.config.blog.default_category,
        draft
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
