use serde::Serialize;

use super::{ActiveFilter, PostCard, Rendered, SelectOption, Site};
use crate::error::Result;
use crate::store::{self, ListingQuery};

#[derive(Debug, Serialize)]
struct ArchivePage {
    query: ListingQuery,
    posts: Vec<PostCard>,
    years: Vec<YearView>,
    result_count: usize,
    category_count: usize,
    tag_count: usize,
    found_label: String,
    has_filters: bool,
    active_filters: Vec<ActiveFilter>,
    category_options: Vec<SelectOption>,
    tag_options: Vec<SelectOption>,
    action_url: String,
    clear_url: String,
}

#[derive(Debug, Serialize)]
struct YearView {
    year: i32,
    label: String,
    posts: Vec<PostCard>,
}

/// Every post, filtered by the listing query, as grid or timeline
///
/// The static export renders the unfiltered list and lets the search script
/// hide what the URL filters out.
pub fn archive(site: &Site, query: &ListingQuery) -> Result<Rendered> {
    let query = if site.is_static() {
        ListingQuery::default()
    } else {
        query.clone()
    };

    let posts = site.store.filter(&query.to_filter());
    let years = store::archive(&posts)
        .into_iter()
        .map(|group| YearView {
            year: group.year,
            label: site.i18n.format(
                "archive_year",
                &[
                    ("year", &group.year.to_string()),
                    ("count", &group.count.to_string()),
                ],
            ),
            posts: site.cards(group.posts),
        })
        .collect();

    let base = site.url("/archive");
    let page = ArchivePage {
        result_count: posts.len(),
        category_count: site.store.categories().len(),
        tag_count: site.store.tags().len(),
        found_label: site
            .i18n
            .format("filter_found", &[("count", &posts.len().to_string())]),
        has_filters: query.has_filters(),
        active_filters: site.active_filters(&query, "/archive"),
        category_options: site.category_options(&query.category),
        tag_options: site.tag_options(&query.tags),
        clear_url: query.cleared().url(&base),
        action_url: base,
        posts: site.cards(posts),
        years,
        query,
    };

    site.render("archive.html", &site.t("archive_title"), "/archive", &page, 200)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::store::ViewMode;

    #[test]
    fn test_archive_filters_by_category() {
        let fixture = Fixture::new();
        let query = ListingQuery::parse("category=%E5%90%8E%E7%AB%AF%E5%BC%80%E5%8F%91");
        let page = archive(&fixture.live(), &query).unwrap();
        assert!(page.html.contains("/post/nodejs-backend-development"));
        assert!(!page.html.contains("/post/python-data-analysis"));
        assert!(page.html.contains("找到 1 篇文章"));
    }

    #[test]
    fn test_archive_empty_state_offers_clear_link() {
        let fixture = Fixture::new();
        let query = ListingQuery::parse("q=nothing-matches-this");
        let page = archive(&fixture.live(), &query).unwrap();
        assert!(page.html.contains("没有找到相关文章"));
        assert!(page.html.contains("清除所有筛选"));
    }

    #[test]
    fn test_archive_list_view_shows_timeline() {
        let fixture = Fixture::new();
        let page = archive(&fixture.with_view(ViewMode::List), &ListingQuery::default()).unwrap();
        assert!(page.html.contains("2024年发布了 6 篇文章"));
        assert!(page.html.contains(r#"data-view="list""#));
    }

    #[test]
    fn test_static_archive_ignores_query() {
        let fixture = Fixture::new();
        let query = ListingQuery::parse("category=none");
        let page = archive(&fixture.static_site(), &query).unwrap();
        assert!(page.html.contains("/post/python-data-analysis"));
        assert!(page.html.contains("/post/responsive-design-guide"));
    }
}
