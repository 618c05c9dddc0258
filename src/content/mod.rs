//! Content module - front-matter, derived fields, indexing and queries

mod blog;
mod frontmatter;
pub mod index;
pub mod loader;
mod markdown;
mod post;
pub mod transform;

pub use blog::{Blog, ALL_CATEGORIES};
pub use frontmatter::{FrontMatter, FrontMatterValue};
pub use index::{index_documents, slug_from_path, RawDocument};
pub use loader::{ContentLoader, LoadError};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};
pub use transform::{derive_excerpt, estimate_read_time, extract_headings, heading_id, Heading};
