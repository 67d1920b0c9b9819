//! Config manifest (`config.page.yaml`).
//!
//! ```yaml
//! useServer: true
//! port: 3000
//! html:
//!   lang: "pt-BR"
//!   head:
//!     title: "My Site"
//!     meta:
//!       - charset: "UTF-8"
//!       - name: "viewport"
//!         content: "width=device-width, initial-scale=1.0"
//!   links:
//!     - rel: "stylesheet"
//!       href: "styles/global.css"
//!   scripts:
//!     - src: "scripts/global.js"
//! pages:
//!   home: "pages/home.yaml"
//! ```
//!
//! The `pages` keys are the authoritative route set. A manifest that cannot be
//! read or parsed is replaced by the defaults rather than stopping startup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file name, looked up in the site root
pub const CONFIG_FILE: &str = "config.page.yaml";

pub const DEFAULT_LANG: &str = "pt-BR";
pub const DEFAULT_TITLE: &str = "My Site";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/IO: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CONFIG/PARSE: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_use_server")]
    pub use_server: bool,
    #[serde(default)]
    pub html: HtmlConfig,
    /// Route name (no leading slash) -> page source path
    #[serde(default)]
    pub pages: IndexMap<String, String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlConfig {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub head: HeadConfig,
    #[serde(default)]
    pub links: Vec<LinkRef>,
    #[serde(default)]
    pub scripts: Vec<ScriptRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Each entry becomes one `<meta>` with its attributes in order
    #[serde(default)]
    pub meta: Vec<IndexMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub rel: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    pub src: String,
}

fn default_use_server() -> bool {
    true
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            use_server: default_use_server(),
            html: HtmlConfig::default(),
            pages: IndexMap::new(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            head: HeadConfig::default(),
            links: Vec::new(),
            scripts: Vec::new(),
        }
    }
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            meta: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load the manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the manifest, falling back to the defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config manifest unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Route names declared in `pages`, in manifest order
    pub fn route_names(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_manifest() {
        let config = SiteConfig::from_yaml(
            r#"
useServer: false
port: 8080
html:
  lang: "en"
  head:
    title: "Docs"
    meta:
      - charset: "UTF-8"
      - name: "viewport"
        content: "width=device-width"
  links:
    - rel: "stylesheet"
      href: "styles/global.css"
  scripts:
    - src: "scripts/global.js"
pages:
  home: "pages/home.yaml"
  about: "pages/about.yaml"
"#,
        )
        .unwrap();

        assert!(!config.use_server);
        assert_eq!(config.port, 8080);
        assert_eq!(config.html.lang, "en");
        assert_eq!(config.html.head.title, "Docs");
        let viewport: Vec<(&str, &str)> = config.html.head.meta[1]
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(viewport, vec![("name", "viewport"), ("content", "width=device-width")]);
        assert_eq!(config.html.links[0].href, "styles/global.css");
        assert_eq!(config.html.scripts[0].src, "scripts/global.js");
        assert_eq!(config.route_names(), vec!["home", "about"]);
    }

    #[test]
    fn test_partial_manifest_fills_defaults() {
        let config = SiteConfig::from_yaml("pages:\n  home: pages/home.yaml\n").unwrap();
        assert!(config.use_server);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.html.lang, DEFAULT_LANG);
        assert_eq!(config.html.head.title, DEFAULT_TITLE);
        assert!(config.html.links.is_empty());
    }

    #[test]
    fn test_missing_manifest_falls_back() {
        let config = SiteConfig::load_or_default(Path::new("/nonexistent/config.page.yaml"));
        assert!(config.use_server);
        assert!(config.pages.is_empty());
        assert_eq!(config.html.head.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_unparsable_manifest_is_an_error() {
        assert!(matches!(
            SiteConfig::from_yaml("html: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
