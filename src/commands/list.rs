//! List site content

use anyhow::{bail, Result};
use std::fmt::Write;

use crate::store::PostStore;
use crate::Blog;

/// Print posts, tags or categories
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let store = blog.load_store();
    print!("{}", render(&store, content_type)?);
    Ok(())
}

/// The listing as text
pub fn render(store: &PostStore, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", store.len())?;
            for post in store.posts() {
                writeln!(
                    out,
                    "  {} - {} [{}] ({})",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.category
                )?;
            }
        }
        "tag" | "tags" => {
            let mut tags = store.tag_counts();
            tags.sort_by(|a, b| b.count.cmp(&a.count));
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                writeln!(out, "  {} ({})", tag.name, tag.count)?;
            }
        }
        "category" | "categories" => {
            let mut categories = store.category_counts();
            categories.sort_by(|a, b| b.count.cmp(&a.count));
            writeln!(out, "Categories ({}):", categories.len())?;
            for category in categories {
                writeln!(out, "  {} ({})", category.name, category.count)?;
            }
        }
        _ => {
            bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback::fallback_posts;

    #[test]
    fn test_list_posts() {
        let store = PostStore::new(fallback_posts());
        let out = render(&store, "post").unwrap();
        assert!(out.starts_with("Posts (6):\n"));
        assert!(out.contains("  2024-01-10 - Python数据分析实战：从数据清洗到可视化 [python-data-analysis] (数据科学)"));
    }

    #[test]
    fn test_list_categories_by_count() {
        let store = PostStore::new(fallback_posts());
        let out = render(&store, "categories").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Categories (3):");
        assert_eq!(lines[1], "  前端开发 (4)");
    }

    #[test]
    fn test_list_unknown_type() {
        let store = PostStore::default();
        assert!(render(&store, "route").is_err());
    }
}
