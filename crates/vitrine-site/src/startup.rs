//! Startup sequence: the only phase that writes to the registry.
//!
//! ```text
//! config -> yaml routes -> components/templates -> pages -> final check -> Site
//!              |                  |                  |           |
//!         authoritative     failures logged     fail-fast   missing routes
//!          route set          and skipped        on routes    are fatal
//! ```

use std::path::Path;
use thiserror::Error;

use vitrine_core::{Registry, RouteError};
use vitrine_modules::{ModuleCatalog, ModuleError};

use crate::config::{SiteConfig, CONFIG_FILE};
use crate::document::Site;

/// Errors that abort startup before anything is served
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("STARTUP/ROUTE: {0}")]
    Route(#[from] RouteError),

    #[error("STARTUP/PAGE: failed to load page \"{route}\" from {source_path}: {source}")]
    PageModule {
        route: String,
        source_path: String,
        #[source]
        source: ModuleError,
    },
}

/// Load `config.page.yaml` from `root` (or the defaults) and boot the site
pub fn boot_from_root(root: &Path, catalog: &ModuleCatalog) -> Result<Site, StartupError> {
    let config = SiteConfig::load_or_default(&root.join(CONFIG_FILE));
    boot(root, config, catalog)
}

/// Populate a fresh registry and validate the route table
pub fn boot(root: &Path, config: SiteConfig, catalog: &ModuleCatalog) -> Result<Site, StartupError> {
    let mut registry = Registry::new();

    registry.set_yaml_routes(config.pages.keys().cloned());
    tracing::info!(routes = ?config.route_names(), "config routes loaded");

    let report = catalog.register_all(root, &mut registry);
    tracing::info!(
        components = report.components,
        templates = report.templates,
        failed = report.failures.len(),
        "components and templates loaded"
    );

    for (route, source) in &config.pages {
        let page = catalog
            .load_page(source, root)
            .map_err(|source_err| StartupError::PageModule {
                route: route.clone(),
                source_path: source.clone(),
                source: source_err,
            })?;
        let declared = page.route().to_string();
        registry.register_page(page).inspect_err(|e| {
            tracing::error!(route = %declared, error = %e, "page route rejected");
        })?;
        tracing::info!(route = %declared, source = %source, "page loaded");
    }

    registry.validate_all_yaml_routes().inspect_err(|e| {
        tracing::error!(error = %e, "route validation failed");
    })?;
    tracing::info!("all config routes registered");

    Ok(Site::new(config, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use vitrine_core::{Node, PageInstance, RenderError, ValidationState};

    fn page_at(route: &'static str) -> impl Fn() -> PageInstance + Send + Sync {
        move || {
            PageInstance::new(route, |_: &Registry| -> Result<Node, RenderError> {
                Ok(Node::text("body"))
            })
        }
    }

    fn config_with(pages: &[(&str, &str)]) -> SiteConfig {
        SiteConfig {
            pages: pages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_boot_validates_routes() {
        let catalog = ModuleCatalog::new()
            .page("src/pages/home.rs", page_at("/home"))
            .page("src/pages/about.rs", page_at("about"));
        let config = config_with(&[("home", "src/pages/home.rs"), ("about", "src/pages/about.rs")]);

        let site = boot(Path::new("/nonexistent"), config, &catalog).unwrap();
        assert_eq!(site.registry().validation_state(), ValidationState::Validated);
        assert_eq!(site.registry().page_routes(), vec!["/home", "/about"]);
    }

    #[test]
    fn test_undeclared_code_route_aborts() {
        let catalog = ModuleCatalog::new().page("src/pages/home.rs", page_at("/contact"));
        let config = config_with(&[("home", "src/pages/home.rs")]);

        let err = boot(Path::new("/nonexistent"), config, &catalog).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Route(RouteError::Undeclared { ref route, .. }) if route == "contact"
        ));
    }

    #[test]
    fn test_unregistered_config_route_aborts() {
        // Both sources resolve to a page declaring /home, so "about" is never registered
        let catalog = ModuleCatalog::new()
            .page("src/pages/home.rs", page_at("/home"))
            .page("src/pages/about.rs", page_at("/home"));
        let config = config_with(&[("home", "src/pages/home.rs"), ("about", "src/pages/about.rs")]);

        let err = boot(Path::new("/nonexistent"), config, &catalog).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Route(RouteError::Missing { ref routes }) if routes == &vec!["about".to_string()]
        ));
    }

    #[test]
    fn test_missing_page_module_is_fatal() {
        let config = config_with(&[("home", "src/pages/home-page.ts")]);
        let err = boot(Path::new("/nonexistent"), config, &ModuleCatalog::new()).unwrap_err();
        assert!(matches!(err, StartupError::PageModule { ref route, .. } if route == "home"));
        assert!(err.to_string().contains("src/pages/home-page.ts"));
    }

    #[test]
    fn test_no_pages_boots_empty_site() {
        let site = boot(Path::new("/nonexistent"), SiteConfig::default(), &ModuleCatalog::new()).unwrap();
        assert!(site.registry().page_routes().is_empty());
        assert!(!site.render_document("/").unwrap().is_found());
    }
}
