//! Contracts for everything the registry can hold.
//!
//! Definitions are shared read-only between request workers once startup is
//! over, hence the `Send + Sync` bounds. Closures with the matching signature
//! implement the traits directly.
use std::fmt;

use crate::error::RenderError;
use crate::node::{Node, Props};
use crate::registry::Registry;

/// Reusable layout wrapping caller-supplied content
pub trait Template: Send + Sync {
    fn render(&self, content: Option<Node>, registry: &Registry) -> Result<Node, RenderError>;
}

/// Custom tag substituted by its rendering wherever it appears
pub trait Component: Send + Sync {
    fn render(&self, props: &Props, registry: &Registry) -> Result<Node, RenderError>;
}

/// Body of a routed page
pub trait Page: Send + Sync {
    fn render(&self, registry: &Registry) -> Result<Node, RenderError>;
}

impl<F> Template for F
where
    F: Fn(Option<Node>, &Registry) -> Result<Node, RenderError> + Send + Sync,
{
    fn render(&self, content: Option<Node>, registry: &Registry) -> Result<Node, RenderError> {
        self(content, registry)
    }
}

impl<F> Component for F
where
    F: Fn(&Props, &Registry) -> Result<Node, RenderError> + Send + Sync,
{
    fn render(&self, props: &Props, registry: &Registry) -> Result<Node, RenderError> {
        self(props, registry)
    }
}

impl<F> Page for F
where
    F: Fn(&Registry) -> Result<Node, RenderError> + Send + Sync,
{
    fn render(&self, registry: &Registry) -> Result<Node, RenderError> {
        self(registry)
    }
}

/// A page bound to its route, with optional per-page assets
pub struct PageInstance {
    route: String,
    css: Option<String>,
    script: Option<String>,
    page: Box<dyn Page>,
}

impl PageInstance {
    pub fn new(route: impl Into<String>, page: impl Page + 'static) -> Self {
        Self {
            route: route.into(),
            css: None,
            script: None,
            page: Box::new(page),
        }
    }

    pub fn with_css(mut self, href: impl Into<String>) -> Self {
        self.css = Some(href.into());
        self
    }

    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.script = Some(src.into());
        self
    }

    /// Route as declared, or normalized once registered
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub(crate) fn bind(&mut self, route: String) {
        self.route = route;
    }

    pub fn render(&self, registry: &Registry) -> Result<Node, RenderError> {
        self.page.render(registry)
    }
}

impl fmt::Debug for PageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageInstance")
            .field("route", &self.route)
            .field("css", &self.css)
            .field("script", &self.script)
            .finish_non_exhaustive()
    }
}
