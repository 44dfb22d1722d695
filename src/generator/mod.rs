//! Static export of every page, the search index and the Atom feed

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::helpers::{
    absolutize_urls, date_xml, escape_xml, full_url_for, strip_invalid_xml_chars,
};
use crate::pages::{self, RenderMode, Rendered, Site};
use crate::store::{ListingQuery, PostStore};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Static site generator over a loaded post store
pub struct Generator<'a> {
    blog: &'a Blog,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(blog: &'a Blog) -> Result<Self> {
        Ok(Self {
            blog,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Write the whole site into the public directory
    pub fn generate(&self, store: &PostStore) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)?;

        self.copy_assets()?;

        let i18n = self.blog.load_i18n();
        let site = Site::new(
            &self.blog.config,
            &i18n,
            store,
            &self.renderer,
            RenderMode::Static,
        );
        let unfiltered = ListingQuery::default();

        self.write_page("index.html", pages::home(&site)?)?;
        self.write_page("archive/index.html", pages::archive(&site, &unfiltered)?)?;
        self.write_page("search/index.html", pages::search(&site, &unfiltered)?)?;
        self.write_page("about/index.html", pages::about(&site)?)?;
        self.write_page("404.html", pages::not_found(&site, "/404.html")?)?;

        for post in store.posts() {
            let path = format!("post/{}/index.html", post.slug);
            self.write_page(&path, pages::post(&site, &post.slug)?)?;
        }
        tracing::info!("Generated {} post pages", store.len());

        self.generate_search_index(store)?;
        self.generate_atom_feed(store)?;

        Ok(())
    }

    fn write_page(&self, relative: &str, page: Rendered) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, page.html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, store: &PostStore) -> Result<()> {
        let index = pages::search_index(&self.blog.config, store);
        let output_path = self.blog.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&index)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Generate the Atom feed of the latest posts
    fn generate_atom_feed(&self, store: &PostStore) -> Result<()> {
        let config = &self.blog.config;
        let base_url = config.url.trim_end_matches('/');
        let posts = store.latest(config.feed_limit);
        let updated = posts
            .first()
            .map(|p| date_xml(&p.date))
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        if !config.subtitle.is_empty() {
            feed.push_str(&format!(
                "  <subtitle>{}</subtitle>\n",
                escape_xml(&config.subtitle)
            ));
        }
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "/atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", full_url_for(config, "/")));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}</id>\n", full_url_for(config, "/")));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts {
            let link = full_url_for(config, &format!("/post/{}", post.slug));
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!("    <published>{}</published>\n", date_xml(&post.date)));
            feed.push_str(&format!("    <updated>{}</updated>\n", date_xml(&post.date)));
            feed.push_str(&format!(
                "    <category term=\"{}\"/>\n",
                escape_xml(&post.category)
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&strip_invalid_xml_chars(&post.excerpt))
            ));
            let content = strip_invalid_xml_chars(&absolutize_urls(&post.html, base_url));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.blog.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Copy the assets directory to `public/assets`
    fn copy_assets(&self) -> Result<()> {
        let source_dir = &self.blog.assets_dir;
        if !source_dir.exists() {
            return Ok(());
        }
        let target_dir = self.blog.public_dir.join("assets");

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_hidden(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = target_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::info!("Copied {} asset files", copied);
        Ok(())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
