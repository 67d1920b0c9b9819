//! Page orchestrator: global chrome from the config plus one rendered page.

use std::sync::Arc;

use vitrine_core::{normalize_route, DomElement, Registry, RenderError, Renderer};

use crate::config::SiteConfig;

/// Route tried when `/` has no page of its own
pub const HOME_ROUTE: &str = "/home";

/// A serialized document and the page route it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    /// `None` when the not-found body was rendered
    pub route: Option<String>,
}

impl RenderedDocument {
    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }
}

/// A validated registry frozen together with its config
#[derive(Debug, Clone)]
pub struct Site {
    config: Arc<SiteConfig>,
    registry: Arc<Registry>,
}

impl Site {
    pub fn new(config: SiteConfig, registry: Registry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Page route serving `route_path`: `/` prefers its own page, then `/home`
    pub fn resolve_route(&self, route_path: &str) -> Option<String> {
        let normalized = normalize_route(route_path);
        if normalized == "/" {
            return ["/", HOME_ROUTE]
                .into_iter()
                .find(|r| self.registry.has_page(r))
                .map(str::to_string);
        }
        self.registry.has_page(&normalized).then_some(normalized)
    }

    /// Build the full document for a request path.
    ///
    /// Errors raised while rendering the page body are returned as-is.
    pub fn render_document(&self, route_path: &str) -> Result<RenderedDocument, RenderError> {
        let html_config = &self.config.html;
        let mut head = DomElement::new("head");

        for meta in &html_config.head.meta {
            let mut tag = DomElement::new("meta");
            for (name, value) in meta {
                tag.set_attribute(name, value.as_str());
            }
            head.append(tag.into());
        }
        head.append(DomElement::new("title").with_text(&html_config.head.title).into());
        for link in &html_config.links {
            head.append(
                DomElement::new("link")
                    .with_attribute("rel", link.rel.as_str())
                    .with_attribute("href", link.href.as_str())
                    .into(),
            );
        }

        let mut body = DomElement::new("body");
        let route = self.resolve_route(route_path);
        let page = route.as_deref().and_then(|r| self.registry.page(r));

        match &page {
            Some(page) => {
                if let Some(css) = page.css() {
                    head.append(
                        DomElement::new("link")
                            .with_attribute("rel", "stylesheet")
                            .with_attribute("href", css)
                            .into(),
                    );
                }
                let content = page.render(&self.registry)?;
                body.append(Renderer::new(&self.registry).render(&content)?);
                if let Some(script) = page.script() {
                    body.append(DomElement::new("script").with_attribute("src", script).into());
                }
            }
            None => {
                tracing::debug!(route = route_path, "no page registered, rendering not-found body");
                body.append(not_found_body().into());
            }
        }

        for script in &html_config.scripts {
            body.append(
                DomElement::new("script")
                    .with_attribute("src", script.src.as_str())
                    .into(),
            );
        }

        let document = DomElement::new("html")
            .with_attribute("lang", html_config.lang.as_str())
            .with_child(head)
            .with_child(body);

        Ok(RenderedDocument {
            html: format!("<!DOCTYPE html>\n{}", document.to_html()),
            route: page.map(|p| p.route().to_string()),
        })
    }
}

fn not_found_body() -> DomElement {
    DomElement::new("div")
        .with_attribute("class", "not-found")
        .with_child(DomElement::new("h1").with_text("Page Not Found"))
        .with_child(DomElement::new("p").with_text("The page you are looking for does not exist."))
        .with_child(
            DomElement::new("a")
                .with_attribute("href", "/")
                .with_text("Back to Home"),
        )
}
