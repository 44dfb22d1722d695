//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::escape_html;

/// Marker separating the excerpt from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

lazy_static! {
    static ref RELATIVE_IMAGE: Regex =
        Regex::new(r#"!\[([^\]]*)\]\(\.\./\.\./assets/images/([^)\s]+)(\s+"[^"]*")?\)"#).unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Use a specific syntect theme for code blocks
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render GFM markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted = self.highlight_code(&code, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => code.push_str(&text),
                _ if in_code_block => {}
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let body = theme
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            })
            .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)));

        format!(
            r#"<figure class="highlight" data-lang="{}">{}</figure>"#,
            escape_html(lang),
            body
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Point relative `../../assets/images/` links at the published image folder
///
/// Only the file name of the image is kept; images elsewhere are untouched.
pub fn rewrite_image_paths(content: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    RELATIVE_IMAGE
        .replace_all(content, |caps: &regex::Captures| {
            let path = &caps[2];
            let file_name = path.rsplit('/').next().unwrap_or(path);
            let title = caps.get(3).map_or("", |m| m.as_str());
            format!("![{}]({}/assets/images/{}{})", &caps[1], base, file_name, title)
        })
        .into_owned()
}

/// Markdown before the `<!-- more -->` marker, if present
pub fn split_excerpt(body: &str) -> Option<String> {
    body.find(MORE_MARKER)
        .map(|pos| body[..pos].trim().to_string())
        .filter(|excerpt| !excerpt.is_empty())
}

/// First paragraph of a body as plain text, cut at `limit` characters
pub fn plain_excerpt(body: &str, limit: usize) -> String {
    let paragraph = body
        .split("\n\n")
        .map(str::trim)
        .find(|block| {
            !block.is_empty()
                && !block.starts_with('#')
                && !block.starts_with("```")
                && !block.starts_with("![")
                && !block.starts_with('>')
                && !block.starts_with("---")
        })
        .unwrap_or("");

    let text = strip_inline_markdown(paragraph);
    truncate_chars(&text, limit)
}

/// Cut a string at `limit` characters, appending `…` when shortened
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out = out.trim_end().to_string();
    out.push('…');
    out
}

fn strip_inline_markdown(text: &str) -> String {
    lazy_static! {
        static ref LINK: Regex = Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap();
        static ref MARKS: Regex = Regex::new(r"[*_`~]+").unwrap();
        static ref SPACE: Regex = Regex::new(r"\s+").unwrap();
    }
    let text = LINK.replace_all(text, "$1");
    let text = MARKS.replace_all(&text, "");
    SPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_table_and_tasks() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```\n\nafter");
        assert!(html.contains(r#"class="highlight""#));
        assert!(html.contains(r#"data-lang="rust""#));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_code_block_unknown_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\n<b>x</b>\n```");
        assert!(html.contains("highlight"));
        assert!(!html.contains("<b>x</b>"));
    }

    #[test]
    fn test_rewrite_image_paths() {
        let md = "![图](../../assets/images/2024/shot.png) and ![x](https://cdn.example.com/a.png)";
        let out = rewrite_image_paths(md, "/page/");
        assert!(out.contains("![图](/page/assets/images/shot.png)"));
        assert!(out.contains("![x](https://cdn.example.com/a.png)"));
    }

    #[test]
    fn test_rewrite_keeps_image_title() {
        let md = r#"![a](../../assets/images/x.png "Cover")"#;
        assert_eq!(
            rewrite_image_paths(md, "/page"),
            r#"![a](/page/assets/images/x.png "Cover")"#
        );
    }

    #[test]
    fn test_rewrite_leaves_other_relative_paths() {
        let md = "![a](./local.png) ![b](../assets/images/c.png)";
        assert_eq!(rewrite_image_paths(md, "/page"), md);
    }

    #[test]
    fn test_split_excerpt() {
        let body = "This is excerpt.\n<!-- more -->\nThis is more content.";
        assert_eq!(split_excerpt(body), Some("This is excerpt.".to_string()));
        assert_eq!(split_excerpt("No marker here"), None);
    }

    #[test]
    fn test_plain_excerpt_skips_headings() {
        let body = "# Title\n\nFirst **bold** [link](http://x) text.\n\nSecond.";
        assert_eq!(plain_excerpt(body, 120), "First bold link text.");
    }

    #[test]
    fn test_plain_excerpt_truncates() {
        let body = "字".repeat(200);
        let excerpt = plain_excerpt(&body, 120);
        assert_eq!(excerpt.chars().count(), 121);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_truncate_chars_short() {
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
