//! Post loader - reads markdown posts from the posts directory

use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::{plain_excerpt, rewrite_image_paths, split_excerpt};
use super::post::{dedup_tags, reading_time_label};
use super::{fallback, FrontMatter, MarkdownRenderer, Post};
use crate::Blog;

/// Length of the excerpt derived from the first paragraph
const EXCERPT_CHARS: usize = 120;

const EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Loads posts from `<base>/<posts_dir>`
pub struct PostLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> PostLoader<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Slugs of every markdown file directly inside the posts directory
    pub fn all_slugs(&self) -> Vec<String> {
        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.is_dir() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Vec::new();
        }

        let mut slugs: Vec<String> = WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(String::from)
            })
            .collect();

        slugs.sort();
        slugs.dedup();
        slugs
    }

    /// Load one post by slug
    ///
    /// Returns `None` when the file is missing, unreadable or a draft; the
    /// reason is logged.
    pub fn load_post(&self, slug: &str) -> Option<Post> {
        if !is_valid_slug(slug) {
            tracing::warn!("Rejected post slug {:?}", slug);
            return None;
        }

        let Some(path) = self.find_file(slug) else {
            tracing::error!(
                "Markdown file not found for {:?} in {:?}, available: {:?}",
                slug,
                self.blog.posts_dir,
                self.all_slugs()
            );
            return None;
        };

        tracing::debug!("Loading {:?}", path);
        match self.read_post(slug, &path) {
            Ok(Some(post)) => Some(post),
            Ok(None) => {
                tracing::debug!("Skipping unpublished post {:?}", slug);
                None
            }
            Err(e) => {
                tracing::error!("Failed to load post {:?}: {}", path, e);
                None
            }
        }
    }

    /// Every post that loads, newest first
    pub fn load_all(&self) -> Vec<Post> {
        let slugs = self.all_slugs();
        let mut posts: Vec<Post> = slugs
            .iter()
            .filter_map(|slug| {
                let post = self.load_post(slug);
                if post.is_none() {
                    tracing::warn!("Skipped post {:?}", slug);
                }
                post
            })
            .collect();

        // stable: equal dates keep slug order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::info!("Loaded {} of {} posts", posts.len(), slugs.len());
        posts
    }

    /// [`load_all`](Self::load_all), or the built-in posts when nothing loads
    pub fn load_or_fallback(&self) -> Vec<Post> {
        let posts = self.load_all();
        if !posts.is_empty() {
            return posts;
        }

        tracing::warn!(
            "No posts loaded from {:?}, using built-in posts",
            self.blog.posts_dir
        );
        fallback::fallback_posts()
    }

    fn find_file(&self, slug: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.blog.posts_dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    fn read_post(&self, slug: &str, path: &Path) -> crate::error::Result<Option<Post>> {
        let config = &self.blog.config;
        let raw = fs::read_to_string(path).map_err(|e| crate::BlogError::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        if !fm.published && !config.render_drafts {
            return Ok(None);
        }

        let content = rewrite_image_paths(body, &config.image_base);
        let html = self.renderer.render(&content);

        let date = fm.parse_date().unwrap_or_else(|| {
            if fm.date.is_some() {
                tracing::warn!("Unrecognised date in {:?}, using file time", path);
            }
            file_date(path)
        });

        let excerpt = fm
            .excerpt
            .filter(|e| !e.trim().is_empty())
            .or_else(|| split_excerpt(&content).map(|e| plain_excerpt(&e, usize::MAX)))
            .unwrap_or_else(|| plain_excerpt(&content, EXCERPT_CHARS));

        let reading_time = fm
            .reading_time
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| {
                reading_time_label(&content, config.reading_speed, &config.reading_time_format)
            });

        Ok(Some(Post {
            slug: slug.to_string(),
            title: fm
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| slug.to_string()),
            date,
            excerpt,
            content: content.replace(super::markdown::MORE_MARKER, ""),
            html,
            category: fm
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| config.default_category.clone()),
            tags: dedup_tags(fm.tags),
            author: fm
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| config.author.clone()),
            reading_time,
        }))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Slugs name files directly in the posts directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}

/// Modification date of a file, or today
fn file_date(path: &Path) -> NaiveDate {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Local>::from(t).date_naive())
        .unwrap_or_else(|_| Local::now().date_naive())
}
