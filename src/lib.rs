//! folio-rs: the markdown blog pipeline behind a portfolio site
//!
//! Posts are markdown files with a small `---` front-matter block. They are
//! indexed once into an immutable [`content::Blog`] that can be queried,
//! exported as static JSON, or served over a read-only HTTP API.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{Blog, ContentLoader};

/// The site application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Directory holding post documents
    pub posts_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory, reading `_config.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let posts_dir = source_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            posts_dir,
            public_dir,
        }
    }

    /// Load and index every post from scratch
    pub fn load_blog(&self) -> Result<Blog> {
        Ok(ContentLoader::new(self).load_blog()?)
    }

    /// Generate the JSON export
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, draft: bool) -> Result<PathBuf> {
        commands::new::create_post(self, title, draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.posts_dir, dir.path().join("source").join("_posts"));
        assert_eq!(folio.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_new_with_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "source_dir: content\nposts_dir: blog\npublic_dir: dist\n",
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.posts_dir, dir.path().join("content").join("blog"));
        assert_eq!(folio.public_dir, dir.path().join("dist"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "blog: [unclosed").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
