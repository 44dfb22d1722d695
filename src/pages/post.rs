use serde::Serialize;

use super::{Link, PostCard, Rendered, Site};
use crate::error::Result;
use crate::helpers::{category_url, full_url_for, post_url, tag_url, tweet_url};
use crate::store::PostView;

#[derive(Debug, Serialize)]
struct PostPage {
    slug: String,
    title: String,
    date: String,
    category: String,
    category_url: String,
    author: String,
    reading_time: String,
    html: String,
    tags: Vec<Link>,
    related: Vec<PostCard>,
    prev: Option<Link>,
    next: Option<Link>,
    permalink: String,
    share_url: String,
    back_url: String,
}

/// A single post, or the post-not-found page for an unknown slug
pub fn post(site: &Site, slug: &str) -> Result<Rendered> {
    let Some(view) = site.store.post_view(slug, site.config.related_posts) else {
        tracing::debug!("No post with slug {:?}", slug);
        return super::post_not_found(site, slug);
    };

    let page = post_page(site, &view);
    let title = page.title.clone();
    let path = format!("/post/{}", slug);
    site.render("post.html", &title, &path, &page, 200)
}

fn post_page(site: &Site, view: &PostView) -> PostPage {
    let config = site.config;
    let post = view.post;
    let permalink = full_url_for(config, &format!("/post/{}", post.slug));

    let neighbour = |p: &crate::content::Post| Link {
        name: p.title.clone(),
        url: post_url(config, &p.slug),
    };

    PostPage {
        slug: post.slug.clone(),
        title: post.title.clone(),
        date: post.date.format("%Y-%m-%d").to_string(),
        category: post.category.clone(),
        category_url: category_url(config, &post.category),
        author: post.author.clone(),
        reading_time: post.reading_time.clone(),
        html: post.html.clone(),
        tags: post
            .tags
            .iter()
            .map(|tag| Link {
                name: tag.clone(),
                url: tag_url(config, tag),
            })
            .collect(),
        related: site.cards(view.related.iter().copied()),
        prev: view.prev.map(neighbour),
        next: view.next.map(neighbour),
        share_url: tweet_url(&post.title, &permalink),
        permalink,
        back_url: site.url("/archive"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_post_page_renders_neighbours_and_related() {
        let fixture = Fixture::new();
        let page = post(&fixture.live(), "react-performance-optimization").unwrap();
        assert_eq!(page.status, 200);
        assert!(page.html.contains("/post/web-security-best-practices"));
        assert!(page.html.contains("/post/javascript-async-guide"));
        assert!(page.html.contains("/search?tag=React"));
        assert!(page.html.contains("https://twitter.com/intent/tweet?text="));
        assert!(!page.html.contains("/post/python-data-analysis"));
    }

    #[test]
    fn test_post_share_url_uses_permalink() {
        let fixture = Fixture::new();
        let site = fixture.live();
        let view = fixture.store.post_view("python-data-analysis", 3).unwrap();
        let page = post_page(&site, &view);
        assert_eq!(
            page.permalink,
            "http://localhost:4000/post/python-data-analysis"
        );
        assert!(page
            .share_url
            .ends_with("&url=http%3A%2F%2Flocalhost%3A4000%2Fpost%2Fpython-data-analysis"));
        assert!(page.related.is_empty());
        assert!(page.prev.is_none());
        assert_eq!(page.next.unwrap().url, "/post/nodejs-backend-development");
    }

    #[test]
    fn test_unknown_post_is_404() {
        let fixture = Fixture::new();
        let page = post(&fixture.live(), "missing").unwrap();
        assert_eq!(page.status, 404);
        assert!(page.html.contains("文章未找到"));
    }
}
