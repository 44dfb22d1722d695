use serde::Serialize;

use super::{PostCard, Rendered, Site};
use crate::error::Result;

/// Posts suggested on the not-found page
const SUGGESTIONS: usize = 2;

#[derive(Debug, Serialize)]
struct NotFoundPage {
    /// Set when a post slug was requested
    missing_post: Option<String>,
    heading: String,
    text: String,
    suggestions: Vec<PostCard>,
    home_url: String,
    search_url: String,
    archive_url: String,
}

/// Generic not-found page, status 404
pub fn not_found(site: &Site, path: &str) -> Result<Rendered> {
    render(site, path, None)
}

/// Not-found page for an unknown post slug, status 404
pub fn post_not_found(site: &Site, slug: &str) -> Result<Rendered> {
    render(site, &format!("/post/{}", slug), Some(slug))
}

fn render(site: &Site, path: &str, missing_post: Option<&str>) -> Result<Rendered> {
    let (heading, text) = match missing_post {
        Some(_) => (site.t("post_not_found"), site.t("post_not_found_text")),
        None => (site.t("not_found_title"), site.t("not_found_text")),
    };

    let page = NotFoundPage {
        missing_post: missing_post.map(str::to_string),
        suggestions: site.cards(site.store.latest(SUGGESTIONS)),
        home_url: site.url("/"),
        search_url: site.url("/search"),
        archive_url: site.url("/archive"),
        text,
        heading: heading.clone(),
    };

    site.render("404.html", &heading, path, &page, 404)
}
