//! Listing query: filter, sort and view state carried in the URL

use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::{PostFilter, ALL};
use crate::helpers::encode_component;

/// Sort field of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Category,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "category" => Ok(SortKey::Category),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Category => "category",
        })
    }
}

/// Sort direction of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Card grid or compact list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        })
    }
}

/// Filter, sort and view state of a post listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingQuery {
    /// Free-text search
    pub q: String,
    /// Selected category, empty for all
    pub category: String,
    /// Selected tags, any of which must match
    pub tags: Vec<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    /// Explicit view mode from the URL, otherwise the saved preference applies
    pub view: Option<ViewMode>,
}

impl ListingQuery {
    /// Parse a raw query string (without the leading `?`)
    ///
    /// Unknown keys and invalid values are ignored; `all` clears a filter.
    pub fn parse(raw: &str) -> Self {
        let mut query = ListingQuery::default();

        for (key, value) in parse_pairs(raw) {
            match key.as_str() {
                "q" => query.q = value.trim().to_string(),
                "category" => {
                    query.category = if value == ALL { String::new() } else { value };
                }
                "tag" | "tags" => {
                    let values: Vec<&str> = if key == "tags" {
                        value.split(',').map(str::trim).collect()
                    } else {
                        vec![value.trim()]
                    };
                    for tag in values {
                        if !tag.is_empty() && tag != ALL && !query.tags.iter().any(|t| t == tag) {
                            query.tags.push(tag.to_string());
                        }
                    }
                }
                "sort" => query.sort = value.parse().unwrap_or_default(),
                "order" => query.order = value.parse().unwrap_or_default(),
                "view" => query.view = value.parse().ok(),
                _ => {}
            }
        }

        query
    }

    /// The store filter this query describes
    pub fn to_filter(&self) -> PostFilter {
        PostFilter {
            query: self.q.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Whether a search term, category or tag is selected
    pub fn has_filters(&self) -> bool {
        self.to_filter().is_active()
    }

    /// Canonical query string; defaults and empty values are omitted
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.q.is_empty() {
            parts.push(format!("q={}", encode_component(&self.q)));
        }
        if !self.category.is_empty() {
            parts.push(format!("category={}", encode_component(&self.category)));
        }
        for tag in &self.tags {
            parts.push(format!("tag={}", encode_component(tag)));
        }
        if self.sort != SortKey::default() {
            parts.push(format!("sort={}", self.sort));
        }
        if self.order != SortOrder::default() {
            parts.push(format!("order={}", self.order));
        }
        if let Some(view) = self.view {
            parts.push(format!("view={}", view));
        }
        parts.join("&")
    }

    /// `path` with this query appended, if any
    pub fn url(&self, path: &str) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, qs)
        }
    }

    /// Reset search, category and tags; sort and view survive
    pub fn clear(&mut self) {
        self.q.clear();
        self.category.clear();
        self.tags.clear();
    }

    /// A copy without the filters
    pub fn cleared(&self) -> Self {
        let mut query = self.clone();
        query.clear();
        query
    }

    pub fn without_q(&self) -> Self {
        Self {
            q: String::new(),
            ..self.clone()
        }
    }

    pub fn without_category(&self) -> Self {
        Self {
            category: String::new(),
            ..self.clone()
        }
    }

    pub fn without_tag(&self, tag: &str) -> Self {
        Self {
            tags: self.tags.iter().filter(|t| *t != tag).cloned().collect(),
            ..self.clone()
        }
    }

    /// Add the tag when absent, remove it when present
    pub fn toggled_tag(&self, tag: &str) -> Self {
        if self.tags.iter().any(|t| t == tag) {
            self.without_tag(tag)
        } else {
            let mut query = self.clone();
            query.tags.push(tag.to_string());
            query
        }
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    pub fn with_order(&self, order: SortOrder) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }
}

/// Decoded `key=value` pairs, `+` read as a space
fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}
