//! Site configuration (_config.yml)

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BlogError, Result};

/// Name of the configuration file in the site root
pub const CONFIG_FILE: &str = "_config.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub assets_dir: String,
    pub public_dir: String,
    /// Prefix that relative `../../assets/images/` links are rewritten to
    pub image_base: String,

    // Writing
    pub default_category: String,
    pub render_drafts: bool,
    pub date_format: String,
    /// Reading speed in words (or CJK characters) per minute
    pub reading_speed: usize,
    /// Reading time label, `{}` is replaced by the minutes
    pub reading_time_format: String,

    // Listings
    pub latest_posts: usize,
    pub related_posts: usize,
    pub card_tags: usize,
    pub popular_tags: usize,
    pub search_debounce_ms: u64,
    pub feed_limit: usize,
    /// Start date of the blog, for the "days running" stat
    pub since: Option<NaiveDate>,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Navigation and profile
    pub menu: IndexMap<String, String>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub about: AboutConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut menu = IndexMap::new();
        menu.insert("home".to_string(), "/".to_string());
        menu.insert("archive".to_string(), "/archive".to_string());
        menu.insert("about".to_string(), "/about".to_string());
        menu.insert("search".to_string(), "/search".to_string());

        Self {
            title: "Blog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "Sky Patrol".to_string(),
            language: "zh-CN".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            assets_dir: "assets".to_string(),
            public_dir: "public".to_string(),
            image_base: "/page".to_string(),

            default_category: "未分类".to_string(),
            render_drafts: false,
            date_format: "%Y/%-m/%-d".to_string(),
            reading_speed: 300,
            reading_time_format: "{}分钟".to_string(),

            latest_posts: 6,
            related_posts: 3,
            card_tags: 3,
            popular_tags: 8,
            search_debounce_ms: 300,
            feed_limit: 20,
            since: None,

            server: ServerConfig::default(),

            menu,
            social: Vec::new(),
            about: AboutConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BlogError::io(path, e))?;
        Self::parse(&content).map_err(|source| BlogError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: SiteConfig = serde_yaml::from_str(content)?;
        if config.reading_speed == 0 {
            tracing::warn!("reading_speed must be positive, using 300");
            config.reading_speed = 300;
        }
        Ok(config)
    }

    /// Skills with levels clamped to 0..=100
    pub fn clamped_skills(&self) -> Vec<Skill> {
        self.about
            .skills
            .iter()
            .map(|s| Skill {
                level: s.level.min(100),
                ..s.clone()
            })
            .collect()
    }
}

/// Live server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    pub live_reload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
            live_reload: true,
        }
    }
}

/// A link shown in the footer and on the About page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Profile shown on the About page and the home page preview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub role: String,
    pub tagline: String,
    pub story: Vec<String>,
    pub location: String,
    pub status: String,
    pub hobby: String,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
