//! Content loader - reads post documents from the posts directory

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{Blog, RawDocument};
use crate::Folio;

/// Errors raised while discovering post documents
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads raw post documents from `<source_dir>/<posts_dir>`
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Read every markdown file under the posts directory, in file-name
    /// order. Unreadable files and entries the walk cannot resolve (broken
    /// symlinks, unreadable subdirectories) are skipped with a warning; only
    /// a failure on the posts directory itself is an error.
    pub fn load_documents(&self) -> Result<Vec<RawDocument>, LoadError> {
        let posts_dir = &self.folio.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(LoadError::Walk {
                        path: posts_dir.clone(),
                        source,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            match read_document(posts_dir, path) {
                Ok(doc) => documents.push(doc),
                Err(e) => tracing::warn!("Skipping post: {}", e),
            }
        }

        tracing::debug!("Loaded {} documents from {:?}", documents.len(), posts_dir);
        Ok(documents)
    }

    /// Load and index the posts directory
    pub fn load_blog(&self) -> Result<Blog, LoadError> {
        let documents = self.load_documents()?;
        Ok(Blog::build(documents, &self.folio.config))
    }
}

fn read_document(root: &Path, path: &Path) -> Result<RawDocument, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");

    Ok(RawDocument::new(relative, text))
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.posts_dir).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let docs = ContentLoader::new(&folio).load_documents().unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_load_documents_sorted_markdown_only() {
        let (_dir, folio) = site();
        fs::write(folio.posts_dir.join("b.md"), "B").unwrap();
        fs::write(folio.posts_dir.join("a.markdown"), "A").unwrap();
        fs::write(folio.posts_dir.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(folio.posts_dir.join("2024")).unwrap();
        fs::write(folio.posts_dir.join("2024/c.md"), "C").unwrap();

        let docs = ContentLoader::new(&folio).load_documents().unwrap();
        let paths: Vec<_> = docs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["2024/c.md", "a.markdown", "b.md"]);
        assert_eq!(docs[2].text, "B");
        assert_eq!(docs[0].slug(), "c");
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_skipped() {
        let (_dir, folio) = site();
        fs::write(
            folio.posts_dir.join("good.md"),
            "---\ntitle: Good\n---\nStill here.",
        )
        .unwrap();
        std::os::unix::fs::symlink(
            folio.posts_dir.join("missing-target.md"),
            folio.posts_dir.join("broken.md"),
        )
        .unwrap();

        let docs = ContentLoader::new(&folio).load_documents().unwrap();
        let paths: Vec<_> = docs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["good.md"]);

        let blog = ContentLoader::new(&folio).load_blog().unwrap();
        assert!(blog.get_by_slug("good").is_some());
    }

    #[test]
    fn test_load_blog() {
        let (_dir, folio) = site();
        fs::write(
            folio.posts_dir.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\n---\nHello.",
        )
        .unwrap();
        fs::write(
            folio.posts_dir.join("second.md"),
            "---\ntitle: Second\ndate: 2024-02-01\n---\nHello again.",
        )
        .unwrap();
        fs::write(
            folio.posts_dir.join("draft.md"),
            "---\ntitle: Draft\ndraft: true\n---\nNot yet.",
        )
        .unwrap();

        let blog = ContentLoader::new(&folio).load_blog().unwrap();
        let slugs: Vec<_> = blog.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["second", "first"]);
    }
}
