//! skyblog: a personal blog engine
//!
//! Markdown posts with front matter are loaded into an immutable in-memory
//! store, filtered and searched there, and rendered through embedded Tera
//! templates. The same pages are either served live by an axum server or
//! exported as a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod pages;
pub mod server;
pub mod store;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BlogError;

/// The blog application: configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory (where `_config.yml` lives)
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
    /// Directory holding images and other static assets
    pub assets_dir: PathBuf,
    /// Output directory of the static export
    pub public_dir: PathBuf,
    /// Directory with optional UI string overrides
    pub languages_dir: PathBuf,
}

impl Blog {
    /// Create a blog instance rooted at a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", config::CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let assets_dir = base_dir.join(&config.assets_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let languages_dir = base_dir.join("languages");

        Self {
            config,
            base_dir,
            posts_dir,
            assets_dir,
            public_dir,
            languages_dir,
        }
    }

    /// Path of the site configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(config::CONFIG_FILE)
    }

    /// Load every post (or the built-in list) into a fresh store
    pub fn load_store(&self) -> store::PostStore {
        let loader = content::PostLoader::new(self);
        store::PostStore::new(loader.load_or_fallback())
    }

    /// Load UI strings for the configured language
    pub fn load_i18n(&self) -> i18n::I18n {
        let mut i18n = i18n::I18n::new(&self.config.language);
        if let Err(e) = i18n.load_languages(&self.languages_dir) {
            tracing::warn!("Failed to load language overrides: {}", e);
        }
        i18n
    }

    /// Export the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Remove the static export
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
