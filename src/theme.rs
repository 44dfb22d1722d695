//! Colour theme and listing view preferences
//!
//! The live server keeps both preferences in cookies. The static export has
//! no server round trip, so [`INIT_SCRIPT`] applies the same rules against
//! `localStorage` before first paint.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::store::ViewMode;

pub const THEME_COOKIE: &str = "theme";
pub const VIEW_COOKIE: &str = "view";

/// Cookie lifetime in seconds
const ONE_YEAR: u64 = 365 * 24 * 60 * 60;

/// Light or dark colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// A saved preference wins, then the client's colour scheme, then light
    pub fn resolve(saved: Option<Theme>, prefers_dark: bool) -> Theme {
        match saved {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Preferences a visitor has saved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Option<Theme>,
    pub view: Option<ViewMode>,
}

impl Preferences {
    /// Read the `theme` and `view` cookies from a `Cookie` header
    ///
    /// Unknown values are treated as unset.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::default();
        };

        Self {
            theme: cookie_value(header, THEME_COOKIE).and_then(|v| v.parse().ok()),
            view: cookie_value(header, VIEW_COOKIE).and_then(|v| v.parse().ok()),
        }
    }

    /// The theme to render with
    pub fn resolved_theme(&self, prefers_dark: bool) -> Theme {
        Theme::resolve(self.theme, prefers_dark)
    }

    /// The view to render listings with
    pub fn resolved_view(&self) -> ViewMode {
        self.view.unwrap_or_default()
    }
}

/// Value of a cookie in a `Cookie` header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// `Sec-CH-Prefers-Color-Scheme` client hint asks for dark
pub fn prefers_dark(hint: Option<&str>) -> bool {
    hint.map(|v| v.trim().trim_matches('"').eq_ignore_ascii_case("dark"))
        .unwrap_or(false)
}

/// A one-year, site-wide `Set-Cookie` value
pub fn set_cookie(name: &str, value: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name, value, ONE_YEAR
    )
}

/// Applies the saved theme (or the system preference) before first paint,
/// and wires the toggle buttons of the static export to `localStorage`
pub const INIT_SCRIPT: &str = r#"(function () {
  var root = document.documentElement;
  var saved = localStorage.getItem('theme');
  var prefersDark = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches;
  var theme = saved || (prefersDark ? 'dark' : 'light');
  if (!saved) localStorage.setItem('theme', theme);
  root.classList.toggle('dark', theme === 'dark');
  root.dataset.view = localStorage.getItem('view') || 'grid';
  document.addEventListener('click', function (e) {
    var link = e.target.closest('[data-toggle]');
    if (!link) return;
    e.preventDefault();
    if (link.dataset.toggle === 'theme') {
      var next = root.classList.contains('dark') ? 'light' : 'dark';
      localStorage.setItem('theme', next);
      root.classList.toggle('dark', next === 'dark');
    } else if (link.dataset.toggle === 'view') {
      var view = root.dataset.view === 'list' ? 'grid' : 'list';
      localStorage.setItem('view', view);
      root.dataset.view = view;
    }
  });
})();"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn test_from_cookie_header() {
        let prefs = Preferences::from_cookie_header(Some("session=abc; theme=dark; view=list"));
        assert_eq!(prefs.theme, Some(Theme::Dark));
        assert_eq!(prefs.view, Some(ViewMode::List));

        let bad = Preferences::from_cookie_header(Some("theme=purple"));
        assert_eq!(bad.theme, None);
        assert_eq!(bad.resolved_view(), ViewMode::Grid);

        assert_eq!(Preferences::from_cookie_header(None), Preferences::default());
    }

    #[test]
    fn test_cookie_value_exact_name() {
        assert_eq!(cookie_value("mytheme=x; theme=light", "theme"), Some("light"));
        assert_eq!(cookie_value("a=1", "theme"), None);
    }

    #[test]
    fn test_prefers_dark_hint() {
        assert!(prefers_dark(Some("\"dark\"")));
        assert!(!prefers_dark(Some("light")));
        assert!(!prefers_dark(None));
    }

    #[test]
    fn test_set_cookie() {
        assert_eq!(
            set_cookie(THEME_COOKIE, "dark"),
            "theme=dark; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }
}
