//! Page view models shared by the live server and the static export
//!
//! Each page function reads the store, builds a serializable view model and
//! renders it through the layout. Nothing here knows about HTTP beyond the
//! status code a page wants.

mod about;
mod archive;
mod home;
mod not_found;
mod post;
mod search;

pub use about::about;
pub use archive::archive;
pub use home::home;
pub use not_found::{not_found, post_not_found};
pub use post::post;
pub use search::{search, search_index, SearchEntry};

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::helpers::{category_url, post_url, tag_url, url_for};
use crate::i18n::I18n;
use crate::store::{ListingQuery, PostStore, ViewMode, ALL};
use crate::templates::{TemplateRenderer, SEARCH_SCRIPT, STYLESHEET};
use crate::theme::{self, Theme};

/// How pages are being published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Rendered per request with the visitor's saved preferences
    Live {
        theme: Theme,
        view: ViewMode,
        live_reload: bool,
    },
    /// Rendered once; preferences are applied client side
    Static,
}

/// A rendered page and the status it should be served with
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub status: u16,
    pub html: String,
}

/// Everything a page needs to render
pub struct Site<'a> {
    pub config: &'a SiteConfig,
    pub i18n: &'a I18n,
    pub store: &'a PostStore,
    pub renderer: &'a TemplateRenderer,
    pub mode: RenderMode,
    pub today: NaiveDate,
}

impl<'a> Site<'a> {
    pub fn new(
        config: &'a SiteConfig,
        i18n: &'a I18n,
        store: &'a PostStore,
        renderer: &'a TemplateRenderer,
        mode: RenderMode,
    ) -> Self {
        Self {
            config,
            i18n,
            store,
            renderer,
            mode,
            today: Local::now().date_naive(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.mode == RenderMode::Static
    }

    /// The listing view to render; the static export always starts as grid
    pub fn view(&self) -> ViewMode {
        match self.mode {
            RenderMode::Live { view, .. } => view,
            RenderMode::Static => ViewMode::Grid,
        }
    }

    pub(crate) fn t(&self, key: &str) -> String {
        self.i18n.get(key)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        url_for(self.config, path)
    }

    pub(crate) fn card(&self, post: &Post) -> PostCard {
        PostCard::new(self.config, post)
    }

    pub(crate) fn cards<'p>(&self, posts: impl IntoIterator<Item = &'p Post>) -> Vec<PostCard> {
        posts.into_iter().map(|p| self.card(p)).collect()
    }

    /// Render a page template inside the layout
    pub(crate) fn render<T: Serialize>(
        &self,
        template: &str,
        title: &str,
        path: &str,
        page: &T,
        status: u16,
    ) -> Result<Rendered> {
        let (theme, live_reload) = match self.mode {
            RenderMode::Live {
                theme, live_reload, ..
            } => (theme, live_reload),
            RenderMode::Static => (Theme::Light, false),
        };

        let page_title = if title.is_empty() || title == self.config.title {
            self.config.title.clone()
        } else {
            format!("{} | {}", title, self.config.title)
        };

        let mut context = Context::new();
        context.insert("site", self.config);
        context.insert("nav", &self.nav(path));
        context.insert("t", &self.i18n.get_all_translations());
        context.insert("lang", self.i18n.language());
        context.insert("theme", &theme);
        context.insert("view", &self.view());
        context.insert("static_export", &self.is_static());
        context.insert("live_reload", &live_reload);
        context.insert("theme_script", theme::INIT_SCRIPT);
        context.insert("stylesheet", STYLESHEET);
        context.insert("search_script", SEARCH_SCRIPT);
        context.insert("page_title", &page_title);
        context.insert("current_path", path);
        context.insert("year", &self.today.year());
        context.insert("home_url", &self.url("/"));
        context.insert("feed_url", &self.url("/atom.xml"));
        context.insert("search_index_url", &self.url("/search.json"));
        context.insert("theme_toggle_url", &self.url("/theme/toggle"));
        context.insert("view_toggle_url", &self.url("/view/toggle"));
        context.insert("page", page);

        let html = self.renderer.render(template, &context)?;
        Ok(Rendered { status, html })
    }

    /// Menu entries with translated labels
    fn nav(&self, current_path: &str) -> Vec<NavItem> {
        self.config
            .menu
            .iter()
            .map(|(key, path)| NavItem {
                label: self.t(&format!("menu_{}", key)),
                key: key.clone(),
                href: self.url(path),
                active: is_active_path(current_path, path),
            })
            .collect()
    }

    /// `<select>` options for categories, first entry meaning "all"
    pub(crate) fn category_options(&self, selected: &str) -> Vec<SelectOption> {
        let mut options = vec![SelectOption::new(
            ALL,
            &self.t("filter_all_categories"),
            selected.is_empty(),
        )];
        options.extend(
            self.store
                .categories()
                .into_iter()
                .map(|c| SelectOption::new(c, c, c == selected)),
        );
        options
    }

    /// `<select>` options for tags, first entry meaning "all"
    pub(crate) fn tag_options(&self, selected: &[String]) -> Vec<SelectOption> {
        let mut options = vec![SelectOption::new(
            ALL,
            &self.t("filter_all_tags"),
            selected.is_empty(),
        )];
        options.extend(
            self.store
                .tags()
                .into_iter()
                .map(|t| SelectOption::new(t, t, selected.iter().any(|s| s == t))),
        );
        options
    }

    /// Removable chips for the filters a query has active
    pub(crate) fn active_filters(&self, query: &ListingQuery, path: &str) -> Vec<ActiveFilter> {
        let base = self.url(path);
        let mut filters = Vec::new();

        if !query.q.is_empty() {
            filters.push(ActiveFilter {
                label: self.t("filter_query"),
                value: query.q.clone(),
                remove_url: query.without_q().url(&base),
            });
        }
        if !query.category.is_empty() {
            filters.push(ActiveFilter {
                label: self.t("filter_category"),
                value: query.category.clone(),
                remove_url: query.without_category().url(&base),
            });
        }
        for tag in &query.tags {
            filters.push(ActiveFilter {
                label: self.t("filter_tag"),
                value: tag.clone(),
                remove_url: query.without_tag(tag).url(&base),
            });
        }

        filters
    }
}

fn is_active_path(current: &str, menu_path: &str) -> bool {
    let current = current.trim_end_matches('/');
    let menu_path = menu_path.trim_end_matches('/');
    if menu_path.is_empty() {
        current.is_empty()
    } else {
        current == menu_path || current.starts_with(&format!("{}/", menu_path))
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub key: String,
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// A plain link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// An option of a filter `<select>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        }
    }
}

/// One active filter with a link that removes it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFilter {
    pub label: String,
    pub value: String,
    pub remove_url: String,
}

/// A post as shown on cards and listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub url: String,
    /// ISO date, formatted by the templates
    pub date: String,
    pub excerpt: String,
    pub category: String,
    pub category_url: String,
    /// The first few tags, linked to the search page
    pub tags: Vec<Link>,
    pub author: String,
    pub reading_time: String,
}

impl PostCard {
    pub fn new(config: &SiteConfig, post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: post_url(config, &post.slug),
            date: post.date.format("%Y-%m-%d").to_string(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            category_url: category_url(config, &post.category),
            tags: post
                .tags
                .iter()
                .take(config.card_tags)
                .map(|tag| Link {
                    name: tag.clone(),
                    url: tag_url(config, tag),
                })
                .collect(),
            author: post.author.clone(),
            reading_time: post.reading_time.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::content::fallback::fallback_posts;

    /// Shared fixtures for page tests
    pub struct Fixture {
        pub config: SiteConfig,
        pub i18n: I18n,
        pub store: PostStore,
        pub renderer: TemplateRenderer,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                config: SiteConfig::default(),
                i18n: I18n::new("zh-CN"),
                store: PostStore::new(fallback_posts()),
                renderer: TemplateRenderer::new().unwrap(),
            }
        }

        pub fn live(&self) -> Site<'_> {
            let mut site = Site::new(
                &self.config,
                &self.i18n,
                &self.store,
                &self.renderer,
                RenderMode::Live {
                    theme: Theme::Dark,
                    view: ViewMode::Grid,
                    live_reload: false,
                },
            );
            site.today = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
            site
        }

        pub fn with_view(&self, view: ViewMode) -> Site<'_> {
            let mut site = self.live();
            site.mode = RenderMode::Live {
                theme: Theme::Light,
                view,
                live_reload: true,
            };
            site
        }

        pub fn static_site(&self) -> Site<'_> {
            let mut site = self.live();
            site.mode = RenderMode::Static;
            site
        }
    }
}
