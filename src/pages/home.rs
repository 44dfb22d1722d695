use serde::Serialize;

use super::{PostCard, Rendered, Site};
use crate::config::Skill;
use crate::error::Result;
use crate::store::SiteStats;
use crate::templates::{tag_cloud, TagCloudEntry};

/// Skills shown as chips in the about preview
const PREVIEW_SKILLS: usize = 4;

#[derive(Debug, Serialize)]
struct HomePage {
    latest: Vec<PostCard>,
    stats: SiteStats,
    tag_cloud: Vec<TagCloudEntry>,
    about: AboutPreview,
    archive_url: String,
    about_url: String,
}

#[derive(Debug, Serialize)]
struct AboutPreview {
    initial: String,
    author: String,
    role: String,
    story: Vec<String>,
    skills: Vec<Skill>,
}

/// Landing page: hero, stats, latest posts, tag cloud and about preview
pub fn home(site: &Site) -> Result<Rendered> {
    let config = site.config;
    let tags = site.store.tags();

    let page = HomePage {
        latest: site.cards(site.store.latest(config.latest_posts)),
        stats: site.store.stats(site.today, config.since),
        tag_cloud: tag_cloud(config, &tags),
        about: AboutPreview {
            initial: config
                .author
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            author: config.author.clone(),
            role: config.about.role.clone(),
            story: config.about.story.iter().take(2).cloned().collect(),
            skills: config
                .clamped_skills()
                .into_iter()
                .take(PREVIEW_SKILLS)
                .collect(),
        },
        archive_url: site.url("/archive"),
        about_url: site.url("/about"),
    };

    site.render("home.html", &config.title, "/", &page, 200)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_home_lists_latest_and_stats() {
        let fixture = Fixture::new();
        let page = home(&fixture.live()).unwrap();
        assert_eq!(page.status, 200);
        assert!(page.html.contains("/post/responsive-design-guide"));
        assert!(page.html.contains("/post/python-data-analysis"));
        assert!(page.html.contains("文章总数"));
        // 2024-01-10 to 2024-02-09
        assert!(page.html.contains(r#"data-stat="days">30<"#));
    }

    #[test]
    fn test_home_tag_cloud_links_to_search() {
        let fixture = Fixture::new();
        let page = home(&fixture.live()).unwrap();
        assert!(page.html.contains("/search?tag=pandas"));
        assert!(page.html.contains("tag-size-0"));
    }

    #[test]
    fn test_home_respects_latest_limit() {
        let mut fixture = Fixture::new();
        fixture.config.latest_posts = 1;
        let page = home(&fixture.live()).unwrap();
        assert!(page.html.contains("/post/responsive-design-guide"));
        assert!(!page.html.contains("/post/javascript-async-guide"));
    }
}
