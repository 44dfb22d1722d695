//! In-memory post store
//!
//! The store owns an immutable, newest-first list of posts and answers every
//! listing question (filter, search, sort, related posts, tag clouds,
//! archive groups) from it. Nothing here mutates the list after
//! construction; a reload builds a fresh store.

pub mod query;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::content::Post;
use crate::helpers::days_between;

pub use query::{ListingQuery, SortKey, SortOrder, ViewMode};

/// Sentinel meaning "no filter" for categories and tags
pub const ALL: &str = "all";

/// Filter criteria; every active criterion must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Case-insensitive substring over title, excerpt, content and tags
    pub query: String,
    /// Exact category, ignored when empty or `all`
    pub category: String,
    /// Any-of tag match, `all` entries ignored
    pub tags: Vec<String>,
}

impl PostFilter {
    fn active_query(&self) -> Option<String> {
        let q = self.query.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }

    fn active_category(&self) -> Option<&str> {
        let c = self.category.as_str();
        (!c.is_empty() && c != ALL).then_some(c)
    }

    fn active_tags(&self) -> Vec<&str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty() && *t != ALL)
            .collect()
    }

    /// Whether any criterion is active
    pub fn is_active(&self) -> bool {
        self.active_query().is_some()
            || self.active_category().is_some()
            || !self.active_tags().is_empty()
    }
}

/// A name with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub name: String,
    pub count: usize,
}

/// Posts of one calendar year
#[derive(Debug, Clone, Serialize)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub count: usize,
    pub posts: Vec<&'a Post>,
}

/// A post with its neighbours and related posts
#[derive(Debug, Clone, Serialize)]
pub struct PostView<'a> {
    pub post: &'a Post,
    pub related: Vec<&'a Post>,
    /// The post published just before this one
    pub prev: Option<&'a Post>,
    /// The post published just after this one
    pub next: Option<&'a Post>,
}

/// Site-wide numbers for the home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub posts: usize,
    pub tags: usize,
    pub categories: usize,
    pub words: usize,
    pub days: i64,
}

/// Immutable collection of posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Posts in the same category, excluding the post itself, in store order
    pub fn related(&self, post: &Post, limit: usize) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.category == post.category && p.slug != post.slug)
            .take(limit)
            .collect()
    }

    /// Everything the post page needs about one slug
    pub fn post_view(&self, slug: &str, related_limit: usize) -> Option<PostView<'_>> {
        let index = self.posts.iter().position(|p| p.slug == slug)?;
        let post = &self.posts[index];

        Some(PostView {
            post,
            related: self.related(post, related_limit),
            prev: self.posts.get(index + 1),
            next: index.checked_sub(1).and_then(|i| self.posts.get(i)),
        })
    }

    /// Posts matching a filter, in store order
    pub fn filter(&self, filter: &PostFilter) -> Vec<&Post> {
        let query = filter.active_query();
        let category = filter.active_category();
        let tags = filter.active_tags();

        self.posts
            .iter()
            .filter(|post| query.as_deref().map_or(true, |q| matches_query(post, q)))
            .filter(|post| category.map_or(true, |c| post.category == c))
            .filter(|post| tags.is_empty() || tags.iter().any(|t| post.has_tag(t)))
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for post in &self.posts {
            if !out.contains(&post.category.as_str()) {
                out.push(&post.category);
            }
        }
        out
    }

    /// Distinct tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for tag in self.posts.iter().flat_map(|p| p.tags.iter()) {
            if !out.contains(&tag.as_str()) {
                out.push(tag);
            }
        }
        out
    }

    /// The newest posts
    pub fn latest(&self, limit: usize) -> Vec<&Post> {
        self.posts.iter().take(limit).collect()
    }

    /// Post count per tag, first-seen order
    pub fn tag_counts(&self) -> Vec<TermCount> {
        count_terms(self.posts.iter().flat_map(|p| p.tags.iter()))
    }

    /// Post count per category, first-seen order
    pub fn category_counts(&self) -> Vec<TermCount> {
        count_terms(self.posts.iter().map(|p| &p.category))
    }

    /// Most used tags, ties in first-seen order
    pub fn popular_tags(&self, limit: usize) -> Vec<TermCount> {
        let mut counts = self.tag_counts();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit);
        counts
    }

    /// Numbers for the home page; `since` overrides the earliest post date
    pub fn stats(&self, today: NaiveDate, since: Option<NaiveDate>) -> SiteStats {
        let start = since.or_else(|| self.posts.iter().map(|p| p.date).min());

        SiteStats {
            posts: self.posts.len(),
            tags: self.tags().len(),
            categories: self.categories().len(),
            words: self.posts.iter().map(Post::word_units).sum(),
            days: start.map_or(0, |s| days_between(&s, &today)),
        }
    }
}

fn matches_query(post: &Post, query: &str) -> bool {
    post.title.to_lowercase().contains(query)
        || post.excerpt.to_lowercase().contains(query)
        || post.content.to_lowercase().contains(query)
        || post.tags.iter().any(|t| t.to_lowercase().contains(query))
}

fn count_terms<'a>(terms: impl Iterator<Item = &'a String>) -> Vec<TermCount> {
    let mut counts: Vec<TermCount> = Vec::new();
    for term in terms {
        match counts.iter_mut().find(|c| &c.name == term) {
            Some(c) => c.count += 1,
            None => counts.push(TermCount {
                name: term.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Sort a listing; ties keep their input order
pub fn sorted<'a>(mut posts: Vec<&'a Post>, key: SortKey, order: SortOrder) -> Vec<&'a Post> {
    posts.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    posts
}

/// Group a listing by year, newest year first; posts keep their order
pub fn archive<'a>(posts: &[&'a Post]) -> Vec<YearGroup<'a>> {
    let mut groups: Vec<YearGroup<'a>> = Vec::new();
    for &post in posts {
        let year = post.date.year();
        match groups.iter_mut().find(|g| g.year == year) {
            Some(group) => group.posts.push(post),
            None => groups.push(YearGroup {
                year,
                count: 0,
                posts: vec![post],
            }),
        }
    }
    for group in &mut groups {
        group.count = group.posts.len();
    }
    groups.sort_by(|a, b| b.year.cmp(&a.year));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback::fallback_posts;

    fn post(slug: &str, date: (i32, u32, u32), category: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            excerpt: String::new(),
            content: String::new(),
            html: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author: "Me".to_string(),
            reading_time: "1分钟".to_string(),
        }
    }

    fn store() -> PostStore {
        PostStore::new(fallback_posts())
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_new_sorts_newest_first_stable() {
        let store = PostStore::new(vec![
            post("a", (2023, 1, 1), "x", &[]),
            post("b", (2024, 1, 1), "x", &[]),
            post("c", (2023, 1, 1), "x", &[]),
        ]);
        let all: Vec<&Post> = store.posts().iter().collect();
        assert_eq!(slugs(&all), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_get_by_slug() {
        let store = store();
        assert_eq!(
            store.get_by_slug("python-data-analysis").map(|p| p.category.as_str()),
            Some("数据科学")
        );
        assert!(store.get_by_slug("missing").is_none());
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let store = store();
        assert_eq!(store.filter(&PostFilter::default()).len(), 6);
    }

    #[test]
    fn test_filter_query_case_insensitive() {
        let store = store();
        let filter = PostFilter {
            query: "  react ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            slugs(&store.filter(&filter)),
            vec!["react-performance-optimization"]
        );
    }

    #[test]
    fn test_filter_query_matches_tags_and_content() {
        let store = store();
        let by_tag = PostFilter {
            query: "pandas".to_string(),
            ..Default::default()
        };
        assert_eq!(slugs(&store.filter(&by_tag)), vec!["python-data-analysis"]);

        let by_content = PostFilter {
            query: "单线程".to_string(),
            ..Default::default()
        };
        assert_eq!(slugs(&store.filter(&by_content)), vec!["javascript-async-guide"]);
    }

    #[test]
    fn test_filter_category_and_all_sentinel() {
        let store = store();
        let backend = PostFilter {
            category: "后端开发".to_string(),
            ..Default::default()
        };
        assert_eq!(slugs(&store.filter(&backend)), vec!["nodejs-backend-development"]);

        let all = PostFilter {
            category: ALL.to_string(),
            tags: vec![ALL.to_string()],
            ..Default::default()
        };
        assert_eq!(store.filter(&all).len(), 6);
        assert!(!all.is_active());
    }

    #[test]
    fn test_filter_tags_any_of() {
        let store = store();
        let filter = PostFilter {
            tags: vec!["CSS".to_string(), "Python".to_string()],
            ..Default::default()
        };
        assert_eq!(
            slugs(&store.filter(&filter)),
            vec!["responsive-design-guide", "python-data-analysis"]
        );
    }

    #[test]
    fn test_filter_criteria_combine() {
        let store = store();
        let filter = PostFilter {
            query: "指南".to_string(),
            category: "前端开发".to_string(),
            tags: vec!["XSS".to_string()],
        };
        assert_eq!(
            slugs(&store.filter(&filter)),
            vec!["web-security-best-practices"]
        );

        let none = PostFilter {
            category: "数据科学".to_string(),
            tags: vec!["React".to_string()],
            ..Default::default()
        };
        assert!(store.filter(&none).is_empty());
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let store = store();
        let post = store.get_by_slug("responsive-design-guide").unwrap();
        let related = store.related(post, 3);
        assert_eq!(
            slugs(&related),
            vec![
                "javascript-async-guide",
                "react-performance-optimization",
                "web-security-best-practices"
            ]
        );

        let lonely = store.get_by_slug("python-data-analysis").unwrap();
        assert!(store.related(lonely, 3).is_empty());
    }

    #[test]
    fn test_post_view_neighbours() {
        let store = store();
        let view = store.post_view("react-performance-optimization", 3).unwrap();
        assert_eq!(view.prev.unwrap().slug, "web-security-best-practices");
        assert_eq!(view.next.unwrap().slug, "javascript-async-guide");

        let newest = store.post_view("responsive-design-guide", 3).unwrap();
        assert!(newest.next.is_none());
        let oldest = store.post_view("python-data-analysis", 3).unwrap();
        assert!(oldest.prev.is_none());
        assert!(store.post_view("missing", 3).is_none());
    }

    #[test]
    fn test_sorted_by_title_and_category() {
        let posts = vec![
            post("b", (2024, 1, 2), "Zeta", &[]),
            post("A", (2024, 1, 1), "alpha", &[]),
            post("c", (2024, 1, 3), "Alpha", &[]),
        ];
        let refs: Vec<&Post> = posts.iter().collect();

        let by_title = sorted(refs.clone(), SortKey::Title, SortOrder::Asc);
        assert_eq!(slugs(&by_title), vec!["A", "b", "c"]);

        // equal categories keep input order in both directions
        let by_cat = sorted(refs.clone(), SortKey::Category, SortOrder::Asc);
        assert_eq!(slugs(&by_cat), vec!["A", "c", "b"]);
        let by_cat_desc = sorted(refs.clone(), SortKey::Category, SortOrder::Desc);
        assert_eq!(slugs(&by_cat_desc), vec!["b", "A", "c"]);

        let by_date = sorted(refs, SortKey::Date, SortOrder::Asc);
        assert_eq!(slugs(&by_date), vec!["A", "b", "c"]);
    }

    #[test]
    fn test_categories_and_tags_first_seen() {
        let store = store();
        assert_eq!(store.categories(), vec!["前端开发", "后端开发", "数据科学"]);
        let tags = store.tags();
        assert_eq!(tags.len(), 30);
        assert_eq!(&tags[..3], &["响应式设计", "CSS", "移动优先"]);
    }

    #[test]
    fn test_latest_does_not_reorder_store() {
        let store = store();
        let latest = store.latest(2);
        assert_eq!(
            slugs(&latest),
            vec!["responsive-design-guide", "javascript-async-guide"]
        );
        assert_eq!(store.latest(100).len(), 6);
        assert_eq!(store.posts()[0].slug, "responsive-design-guide");
    }

    #[test]
    fn test_popular_tags() {
        let store = PostStore::new(vec![
            post("a", (2024, 1, 3), "x", &["rust", "web"]),
            post("b", (2024, 1, 2), "x", &["go", "web"]),
            post("c", (2024, 1, 1), "y", &["go", "cli"]),
        ]);
        let popular: Vec<String> = store.popular_tags(3).into_iter().map(|t| t.name).collect();
        assert_eq!(popular, vec!["web", "go", "rust"]);
        assert_eq!(store.category_counts()[0], TermCount { name: "x".to_string(), count: 2 });
    }

    #[test]
    fn test_archive_groups_by_year() {
        let posts = vec![
            post("a", (2023, 6, 1), "x", &[]),
            post("b", (2024, 2, 1), "x", &[]),
            post("c", (2023, 1, 1), "x", &[]),
        ];
        let refs: Vec<&Post> = posts.iter().collect();
        let groups = archive(&refs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].year, 2024);
        assert_eq!(groups[1].count, 2);
        assert_eq!(slugs(&groups[1].posts), vec!["a", "c"]);
    }

    #[test]
    fn test_stats() {
        let store = store();
        let today = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        let stats = store.stats(today, None);
        assert_eq!(stats.posts, 6);
        assert_eq!(stats.categories, 3);
        assert_eq!(stats.tags, 30);
        assert_eq!(stats.days, 30);
        assert!(stats.words > 0);

        let since = NaiveDate::from_ymd_opt(2024, 2, 1);
        assert_eq!(store.stats(today, since).days, 8);
        assert_eq!(PostStore::default().stats(today, None).days, 0);
    }
}
