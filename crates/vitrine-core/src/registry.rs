//! Registry: catalog of templates, components and pages, plus the route sets
//! whose agreement is enforced by [`RouteValidation`].
//!
//! One registry is built per process (or per test). It is written during
//! startup and only read afterwards.
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::definition::{Component, PageInstance, Template};
use crate::error::{RenderError, RouteError};
use crate::node::{Node, Props};
use crate::validation::{normalize_route, RouteValidation, ValidationState};

#[derive(Default)]
pub struct Registry {
    templates: IndexMap<String, Arc<dyn Template>>,
    components: IndexMap<String, Arc<dyn Component>>,
    pages: IndexMap<String, Arc<PageInstance>>,
    routes: RouteValidation,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Insert or replace a template
    pub fn register_template(&mut self, name: impl Into<String>, template: Arc<dyn Template>) {
        let name = name.into();
        if self.templates.insert(name.clone(), template).is_some() {
            tracing::debug!(template = %name, "replaced template");
        }
    }

    /// Insert or replace a component
    pub fn register_component(&mut self, name: impl Into<String>, component: Arc<dyn Component>) {
        let name = name.into();
        if self.components.insert(name.clone(), component).is_some() {
            tracing::debug!(component = %name, "replaced component");
        }
    }

    /// Store a page under its normalized route and validate the route.
    ///
    /// A validation failure is returned to the caller but the page stays
    /// stored. Registration after a successful end-of-load check is refused.
    pub fn register_page_route(
        &mut self,
        route: &str,
        mut page: PageInstance,
    ) -> Result<(), RouteError> {
        let normalized = normalize_route(route);
        self.routes.ensure_open(&normalized)?;

        page.bind(normalized.clone());
        self.pages.insert(normalized.clone(), Arc::new(page));
        self.routes.record_registration(&normalized)
    }

    /// Register a page under the route it was declared with
    pub fn register_page(&mut self, page: PageInstance) -> Result<(), RouteError> {
        let route = page.route().to_string();
        self.register_page_route(&route, page)
    }

    /// Replace the config-declared route set
    pub fn set_yaml_routes<I, S>(&mut self, routes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes.set_yaml_routes(routes);
    }

    /// Fail when a config route never got a page
    pub fn validate_all_yaml_routes(&mut self) -> Result<(), RouteError> {
        self.routes.finish()
    }

    pub fn validation_state(&self) -> ValidationState {
        self.routes.state()
    }

    pub fn routes(&self) -> &RouteValidation {
        &self.routes
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn template(&self, name: &str) -> Option<Arc<dyn Template>> {
        self.templates.get(name).cloned()
    }

    pub fn component(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.components.get(name).cloned()
    }

    /// Look up a page; the route is normalized first
    pub fn page(&self, route: &str) -> Option<Arc<PageInstance>> {
        self.pages.get(&normalize_route(route)).cloned()
    }

    pub fn has_page(&self, route: &str) -> bool {
        self.pages.contains_key(&normalize_route(route))
    }

    pub fn template_names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn page_routes(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    // ------------------------------------------------------------------
    // Convenience for definitions that compose other definitions
    // ------------------------------------------------------------------

    /// Obtain a template, logging when it is absent
    pub fn create_template(&self, name: &str) -> Option<Arc<dyn Template>> {
        let template = self.template(name);
        if template.is_none() {
            tracing::error!(template = %name, "template not found in registry");
        }
        template
    }

    /// Render a registered template around `content`
    pub fn render_template(&self, name: &str, content: Option<Node>) -> Result<Node, RenderError> {
        let template = self
            .create_template(name)
            .ok_or_else(|| RenderError::MissingTemplate(name.to_string()))?;
        template.render(content, self)
    }

    /// Render a component's node tree directly; `None` when it is not registered
    pub fn render_component(&self, name: &str, props: &Props) -> Result<Option<Node>, RenderError> {
        match self.component(name) {
            Some(component) => component.render(props, self).map(Some),
            None => {
                tracing::error!(component = %name, "component not found in registry");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("templates", &self.template_names())
            .field("components", &self.component_names())
            .field("pages", &self.page_routes())
            .field("routes", &self.routes)
            .finish()
    }
}
