//! Declarative definition files.
//!
//! Components, templates and pages can be authored as YAML or JSON documents
//! instead of Rust code:
//!
//! ```yaml
//! component: site-footer
//! body:
//!   footer:
//!     class: footer
//!     content: "© {{year}} {{owner}}"
//! ```
//!
//! ```yaml
//! template: main-layout
//! body:
//!   div:
//!     class: container
//!     content:
//!       - header-component: { title: "My Site" }
//!       - main: { content: { slot: {} } }
//! ```
//!
//! ```yaml
//! route: /about
//! css: styles/about.css
//! template: main-layout
//! body:
//!   h1: { content: About }
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use vitrine_core::{Component, Node, PageInstance, Props, Registry, RenderError, Template};

use crate::interpolate::{fill_slots, Interpolator};
use crate::ModuleError;

/// Extensions recognised as definition files
pub const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentFile {
    pub component: String,
    #[serde(default)]
    pub description: Option<String>,
    pub body: Node,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateFile {
    pub template: String,
    #[serde(default)]
    pub description: Option<String>,
    pub body: Node,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageFile {
    pub route: String,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    /// Layout wrapping the body
    #[serde(default)]
    pub template: Option<String>,
    pub body: Node,
}

/// Whether a path looks like a definition file
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DEFINITION_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read and parse a definition file; `.json` is parsed as JSON, the rest as YAML
pub fn read_definition<T: DeserializeOwned>(path: &Path) -> Result<T, ModuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ModuleError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

impl ComponentFile {
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        read_definition(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse component YAML: {}", e))
    }

    pub fn into_component(self, interpolator: Arc<Interpolator>) -> DeclarativeComponent {
        DeclarativeComponent {
            name: self.component,
            body: self.body,
            interpolator,
        }
    }
}

impl TemplateFile {
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        read_definition(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse template YAML: {}", e))
    }

    pub fn into_template(self) -> DeclarativeTemplate {
        DeclarativeTemplate { body: self.body }
    }
}

impl PageFile {
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        read_definition(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse page YAML: {}", e))
    }

    pub fn into_instance(self) -> PageInstance {
        let page = DeclarativePage {
            body: self.body,
            template: self.template,
        };
        let mut instance = PageInstance::new(self.route, page);
        if let Some(css) = self.css {
            instance = instance.with_css(css);
        }
        if let Some(script) = self.script {
            instance = instance.with_script(script);
        }
        instance
    }
}

/// Component whose strings are interpolated with its props; a `slot`
/// receives the element's `content`
pub struct DeclarativeComponent {
    name: String,
    body: Node,
    interpolator: Arc<Interpolator>,
}

impl DeclarativeComponent {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Component for DeclarativeComponent {
    fn render(&self, props: &Props, _registry: &Registry) -> Result<Node, RenderError> {
        let body = self
            .interpolator
            .interpolate(&self.body, &props.to_value())
            .map_err(|e| RenderError::Component {
                name: self.name.clone(),
                message: e.to_string(),
            })?;
        let content = props.content().cloned().unwrap_or_else(Node::empty);
        Ok(fill_slots(&body, &content))
    }
}

/// Layout whose `slot` elements receive the page content
pub struct DeclarativeTemplate {
    body: Node,
}

impl Template for DeclarativeTemplate {
    fn render(&self, content: Option<Node>, _registry: &Registry) -> Result<Node, RenderError> {
        Ok(fill_slots(&self.body, &content.unwrap_or_else(Node::empty)))
    }
}

pub struct DeclarativePage {
    body: Node,
    template: Option<String>,
}

impl vitrine_core::Page for DeclarativePage {
    fn render(&self, registry: &Registry) -> Result<Node, RenderError> {
        match &self.template {
            Some(layout) => registry.render_template(layout, Some(self.body.clone())),
            None => Ok(self.body.clone()),
        }
    }
}
