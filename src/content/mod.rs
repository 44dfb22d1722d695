//! Content module - posts, front matter and markdown processing

pub mod fallback;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{count_units, dedup_tags, reading_time_label, Post};
