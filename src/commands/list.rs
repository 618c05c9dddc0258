//! List site content

use anyhow::Result;

use crate::content::{Blog, Post};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let blog = folio.load_blog()?;
    for line in render(&blog, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed by `list`
pub fn render(blog: &Blog, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            lines.push(format!("Posts ({}):", blog.len()));
            lines.extend(blog.posts().iter().map(post_line));
        }
        "featured" => {
            let featured = blog.featured();
            lines.push(format!("Featured ({}):", featured.len()));
            lines.extend(featured.into_iter().map(post_line));
        }
        "tag" | "tags" => {
            let tags = blog.all_tags();
            lines.push(format!("Tags ({}):", tags.len()));
            for tag in tags {
                let count = blog.by_tag(&tag).len();
                lines.push(format!("  {} ({})", tag, count));
            }
        }
        "category" | "categories" => {
            let categories = blog.all_categories();
            // "All" is a filter sentinel, not a category
            lines.push(format!("Categories ({}):", categories.len() - 1));
            for category in categories.iter().skip(1) {
                let count = blog.by_category(category).len();
                lines.push(format!("  {} ({})", category, count));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, featured, tag, category",
                content_type
            );
        }
    }

    Ok(lines)
}

/// One post as a listing line
pub fn post_line(post: &Post) -> String {
    let date = if post.date.is_empty() {
        "----------"
    } else {
        post.date.as_str()
    };
    format!(
        "  {} - {} [{}] ({}, {})",
        date, post.title, post.slug, post.category, post.read_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::RawDocument;

    fn blog() -> Blog {
        Blog::build(
            vec![
                RawDocument::new("a.md", "---\ntitle: A\ndate: 2024-01-01\ncategory: ML\ntags: [x, y]\nfeatured: true\n---\nA."),
                RawDocument::new("b.md", "---\ntitle: B\ncategory: ML\ntags: [y]\n---\nB."),
                RawDocument::new("c.md", "---\ntitle: C\ndate: 2023-01-01\ncategory: AI\n---\nC."),
            ],
            &SiteConfig::default(),
        )
    }

    #[test]
    fn test_list_posts() {
        let lines = render(&blog(), "posts").unwrap();
        assert_eq!(lines[0], "Posts (3):");
        assert_eq!(lines[1], "  2024-01-01 - A [a] (ML, 1 min read)");
        assert!(lines[3].starts_with("  ---------- - B [b]"));
    }

    #[test]
    fn test_list_tags_and_categories() {
        let blog = blog();
        assert_eq!(render(&blog, "tag").unwrap(), vec!["Tags (2):", "  x (1)", "  y (2)"]);
        assert_eq!(
            render(&blog, "categories").unwrap(),
            vec!["Categories (2):", "  AI (1)", "  ML (2)"]
        );
        assert_eq!(render(&blog, "featured").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_type() {
        assert!(render(&blog(), "pages").is_err());
    }
}
