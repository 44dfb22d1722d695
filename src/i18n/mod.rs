//! Internationalization (i18n) support
//!
//! UI strings live in flat tables keyed by name. `zh-CN` and `en` are built
//! in; `<base>/languages/<lang>.yml` files override or add entries. Nested
//! YAML maps are flattened with `_` (`menu: {home: ..}` becomes `menu_home`).

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

mod tables;

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
    /// lang -> key -> translation
    translations: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create a handler with the built-in tables
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        translations.insert("zh-CN".to_string(), table(tables::ZH_CN));
        translations.insert("en".to_string(), table(tables::EN));

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Load `*.yml`/`*.yaml` override files from a directory
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || !matches!(ext, Some("yml") | Some("yaml")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            let data: serde_yaml::Mapping = match serde_yaml::from_str(&content) {
                Ok(serde_yaml::Value::Mapping(map)) => map,
                Ok(serde_yaml::Value::Null) => continue,
                Ok(_) => {
                    tracing::warn!("Language file {:?} is not a mapping, skipped", path);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                    continue;
                }
            };

            let entries = self.translations.entry(lang.to_string()).or_default();
            flatten_translations(&data, "", entries);
            tracing::debug!("Loaded language file: {:?}", path);
        }

        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translation of a key: current language, then English, then the key
    pub fn get(&self, key: &str) -> String {
        self.lookup(&self.language, key)
            .or_else(|| self.lookup("en", key))
            .unwrap_or(key)
            .to_string()
    }

    /// Translation with `{name}` placeholders filled in
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Whether the current language defines a key
    pub fn has(&self, key: &str) -> bool {
        self.lookup(&self.language, key).is_some()
    }

    /// Every key with its resolved translation, for template contexts
    pub fn get_all_translations(&self) -> HashMap<String, String> {
        let mut result = self
            .translations
            .get("en")
            .cloned()
            .unwrap_or_default();

        if let Some(current) = self.translations.get(&self.language) {
            for (k, v) in current {
                result.insert(k.clone(), v.clone());
            }
        }

        result
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.translations
            .get(lang)
            .and_then(|data| data.get(key))
            .map(String::as_str)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("zh-CN")
    }
}

fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Flatten a YAML mapping into `_`-joined keys
fn flatten_translations(
    data: &serde_yaml::Mapping,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    for (key, value) in data {
        let Some(key) = key.as_str() else {
            continue;
        };
        let full_key = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}_{}", prefix, key)
        };

        match value {
            serde_yaml::Value::String(s) => {
                result.insert(full_key, s.clone());
            }
            serde_yaml::Value::Number(n) => {
                result.insert(full_key, n.to_string());
            }
            serde_yaml::Value::Bool(b) => {
                result.insert(full_key, b.to_string());
            }
            serde_yaml::Value::Mapping(map) => flatten_translations(map, &full_key, result),
            _ => {}
        }
    }
}
