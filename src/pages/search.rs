use serde::Serialize;

use super::{ActiveFilter, PostCard, Rendered, SelectOption, Site};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::helpers::post_url;
use crate::store::{self, ListingQuery, PostStore, SortKey, SortOrder};

#[derive(Debug, Serialize)]
struct SearchPage {
    query: ListingQuery,
    query_string: String,
    posts: Vec<PostCard>,
    result_count: usize,
    found_label: String,
    has_filters: bool,
    active_filters: Vec<ActiveFilter>,
    popular_tags: Vec<TagToggle>,
    category_options: Vec<SelectOption>,
    sort_options: Vec<SelectOption>,
    order_options: Vec<SelectOption>,
    debounce_ms: u64,
    action_url: String,
    clear_url: String,
}

/// A popular tag that adds or removes itself from the query
#[derive(Debug, Serialize)]
struct TagToggle {
    name: String,
    count: usize,
    active: bool,
    url: String,
}

/// Searchable post record of `search.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Markdown body, matched by the client-side search
    pub content: String,
}

/// Search page: query applied, then sorted
pub fn search(site: &Site, query: &ListingQuery) -> Result<Rendered> {
    let query = if site.is_static() {
        ListingQuery::default()
    } else {
        query.clone()
    };

    let posts = store::sorted(
        site.store.filter(&query.to_filter()),
        query.sort,
        query.order,
    );

    let base = site.url("/search");
    let popular_tags = site
        .store
        .popular_tags(site.config.popular_tags)
        .into_iter()
        .map(|term| TagToggle {
            active: query.tags.contains(&term.name),
            url: query.toggled_tag(&term.name).url(&base),
            name: term.name,
            count: term.count,
        })
        .collect();

    let sort_options = [
        (SortKey::Date, "search_sort_date"),
        (SortKey::Title, "search_sort_title"),
        (SortKey::Category, "search_sort_category"),
    ]
    .into_iter()
    .map(|(key, label)| SelectOption {
        value: key.to_string(),
        label: site.t(label),
        selected: key == query.sort,
    })
    .collect();

    let order_options = [
        (SortOrder::Desc, "search_order_desc"),
        (SortOrder::Asc, "search_order_asc"),
    ]
    .into_iter()
    .map(|(order, label)| SelectOption {
        value: order.to_string(),
        label: site.t(label),
        selected: order == query.order,
    })
    .collect();

    let page = SearchPage {
        query_string: query.to_query_string(),
        result_count: posts.len(),
        found_label: site
            .i18n
            .format("filter_found", &[("count", &posts.len().to_string())]),
        has_filters: query.has_filters(),
        active_filters: site.active_filters(&query, "/search"),
        popular_tags,
        category_options: site.category_options(&query.category),
        sort_options,
        order_options,
        debounce_ms: site.config.search_debounce_ms,
        clear_url: query.cleared().url(&base),
        action_url: base,
        posts: site.cards(posts),
        query,
    };

    site.render("search.html", &site.t("search_title"), "/search", &page, 200)
}

/// Records of `search.json`, newest first
pub fn search_index(config: &SiteConfig, store: &PostStore) -> Vec<SearchEntry> {
    store
        .posts()
        .iter()
        .map(|post| SearchEntry {
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: post_url(config, &post.slug),
            date: post.date.format("%Y-%m-%d").to_string(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            content: post.content.clone(),
        })
        .collect()
}
