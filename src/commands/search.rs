//! Search posts the way the blog listing filters them

use anyhow::Result;

use super::list::post_line;
use crate::Folio;

pub fn run(folio: &Folio, query: &str, category: Option<&str>) -> Result<()> {
    let blog = folio.load_blog()?;
    let hits = blog.search(query, category);

    let suffix = if hits.len() == 1 { "" } else { "s" };
    match category {
        Some(category) => println!(
            "{} article{} matching {:?} in {}:",
            hits.len(),
            suffix,
            query,
            category
        ),
        None => println!("{} article{} matching {:?}:", hits.len(), suffix, query),
    }

    for post in hits {
        println!("{}", post_line(post));
    }

    Ok(())
}
