//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identity key and route segment, the file stem on disk
    pub slug: String,

    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Short plain-text summary for cards and listings
    pub excerpt: String,

    /// Markdown body with image paths rewritten
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Rendered HTML body
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html: String,

    pub category: String,

    /// Distinct tags in authoring order
    pub tags: Vec<String>,

    pub author: String,

    /// Display label such as `8分钟`
    #[serde(rename = "readingTime")]
    pub reading_time: String,
}

impl Post {
    /// The listing metadata: the same post without its body
    pub fn meta(&self) -> Post {
        Post {
            content: String::new(),
            html: String::new(),
            ..self.clone()
        }
    }

    /// Whether the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Word units in the body, see [`count_units`]
    pub fn word_units(&self) -> usize {
        count_units(&self.content)
    }
}

/// Remove duplicate tags, keeping the first occurrence
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Count reading units: each CJK character, and each run of ASCII letters
/// or digits
pub fn count_units(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
            if is_cjk(c) {
                count += 1;
            }
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // kana
        | '\u{3400}'..='\u{4DBF}' // extension A
        | '\u{4E00}'..='\u{9FFF}' // unified ideographs
        | '\u{AC00}'..='\u{D7AF}' // hangul
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}

/// Reading time label: minutes rounded up, at least one
pub fn reading_time_label(text: &str, speed: usize, format: &str) -> String {
    let speed = speed.max(1);
    let minutes = count_units(text).div_ceil(speed).max(1);
    format.replace("{}", &minutes.to_string())
}
