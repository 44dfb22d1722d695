//! Built-in skyline templates using the Tera template engine
//!
//! Every template is embedded in the binary, so a site needs nothing but
//! its posts and `_config.yml`.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::markdown::truncate_chars;
use crate::error::Result;
use crate::helpers::{encode_component, format_date, strip_html, tag_url};

/// Client-side search over `search.json`
pub const SEARCH_SCRIPT: &str = include_str!("skyline/search.js");

/// Site stylesheet
pub const STYLESHEET: &str = include_str!("skyline/style.css");

const TAG_SIZES: usize = 5;
const TAG_COLORS: usize = 6;

/// Template renderer with the embedded skyline templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Templates escape text fields themselves; rendered post HTML goes in raw
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("skyline/layout.html")),
            ("home.html", include_str!("skyline/home.html")),
            ("archive.html", include_str!("skyline/archive.html")),
            ("search.html", include_str!("skyline/search.html")),
            ("post.html", include_str!("skyline/post.html")),
            ("about.html", include_str!("skyline/about.html")),
            ("404.html", include_str!("skyline/404.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("skyline/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("skyline/partials/footer.html"),
            ),
            ("partials/card.html", include_str!("skyline/partials/card.html")),
            (
                "partials/list_item.html",
                include_str!("skyline/partials/list_item.html"),
            ),
            (
                "partials/tag_cloud.html",
                include_str!("skyline/partials/tag_cloud.html"),
            ),
            (
                "partials/active_filters.html",
                include_str!("skyline/partials/active_filters.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("urlencode_component", urlencode_component_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// One entry of the tag cloud
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCloudEntry {
    pub name: String,
    pub url: String,
    pub size_class: String,
    pub color_class: String,
}

/// Tag cloud entries; sizes and colours cycle by position
pub fn tag_cloud(config: &SiteConfig, tags: &[&str]) -> Vec<TagCloudEntry> {
    tags.iter()
        .enumerate()
        .map(|(index, name)| TagCloudEntry {
            name: name.to_string(),
            url: tag_url(config, name),
            size_class: format!("tag-size-{}", index % TAG_SIZES),
            color_class: format!("tag-color-{}", index % TAG_COLORS),
        })
        .collect()
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 120,
    };
    Ok(tera::Value::String(truncate_chars(&s, length)))
}

/// Tera filter: reformat an ISO `YYYY-MM-DD` date
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%Y-%m-%d".to_string(),
    };

    match chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        Ok(date) => Ok(tera::Value::String(format_date(&date, &format))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: percent-encode a query component
fn urlencode_component_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("urlencode_component", "value", String, value);
    Ok(tera::Value::String(encode_component(&s)))
}
