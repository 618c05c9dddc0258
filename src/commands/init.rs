//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Sai Sridhar Tarra
url: https://saisridhartarra.com
author: Sai Sridhar Tarra

# Directory
source_dir: source
posts_dir: _posts
public_dir: public

# Writing
new_post_name: :title.md
date_format: MMMM D, YYYY

# Blog index
blog:
  default_title: Untitled
  default_category: General
  words_per_minute: 238
  excerpt_length: 160
  render_drafts: false

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

/// Initialize a new site in the given directory.
/// An existing `_config.yml` is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let posts_dir = target_dir.join("source").join("_posts");
    fs::create_dir_all(&posts_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags: [meta]
category: General
featured: true
---
# Hello World

Welcome to the blog. Posts live in `source/_posts` as markdown files with a
short front-matter block.

## Writing a post

Run `folio new "My New Post"` and edit the generated file.

## Publishing

Run `folio generate` to write the JSON export into `public/`, or
`folio server` to browse the API locally.
"#,
        today
    );

    let sample_path = posts_dir.join("hello-world.md");
    if !sample_path.exists() {
        fs::write(sample_path, sample_post)?;
    }

    Ok(())
}
