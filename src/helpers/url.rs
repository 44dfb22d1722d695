//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a query component (everything but RFC 3986 unreserved)
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/archive") // -> "/blog/archive"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a value for use in a query string or path segment
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Search page link filtered to one tag
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(config, &format!("/search?tag={}", encode_component(tag)))
}

/// Archive link filtered to one category
pub fn category_url(config: &SiteConfig, category: &str) -> String {
    url_for(
        config,
        &format!("/archive?category={}", encode_component(category)),
    )
}

/// Link to a single post
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("/post/{}", encode_component(slug)))
}

/// Twitter share intent for a page
pub fn tweet_url(text: &str, url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        encode_component(text),
        encode_component(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/archive"), "/blog/archive");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&config, "https://x.io/a"), "https://x.io/a");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/post/hello"),
            "https://example.com/blog/post/hello"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Node.js & 性能"), "Node.js%20%26%20%E6%80%A7%E8%83%BD");
        assert_eq!(encode_component("a-b_c~d"), "a-b_c~d");
    }

    #[test]
    fn test_tag_and_category_urls() {
        let config = SiteConfig::default();
        assert_eq!(tag_url(&config, "C++"), "/search?tag=C%2B%2B");
        assert_eq!(
            category_url(&config, "前端开发"),
            "/archive?category=%E5%89%8D%E7%AB%AF%E5%BC%80%E5%8F%91"
        );
        assert_eq!(post_url(&config, "hello-world"), "/post/hello-world");
    }

    #[test]
    fn test_tweet_url() {
        assert_eq!(
            tweet_url("Hi there", "https://b.io/post/x"),
            "https://twitter.com/intent/tweet?text=Hi%20there&url=https%3A%2F%2Fb.io%2Fpost%2Fx"
        );
    }
}
