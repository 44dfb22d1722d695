//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `<posts_dir>/<slug>.md` with a front matter skeleton
///
/// The slug defaults to the slugified title. An existing file is never
/// overwritten.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        bail!("A post needs a title");
    }

    let now = chrono::Local::now();
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    // titles made only of punctuation slugify to nothing
    let slug = if slug.is_empty() {
        format!("post-{}", now.format("%Y%m%d%H%M%S"))
    } else {
        slug
    };

    fs::create_dir_all(&blog.posts_dir)?;
    let file_path = blog.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: "{}"
date: {}
category: {}
tags: []
excerpt: ""
---

"#,
        title.replace('\\', "\\\\").replace('"', "\\\""),
        now.format("%Y-%m-%d"),
        blog.config.default_category,
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
