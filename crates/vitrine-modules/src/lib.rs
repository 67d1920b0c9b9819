//! Vitrine Modules: explicit registration of components, templates and pages
//!
//! Every definition reaches the registry through a call made during startup:
//!
//! - code-level components and templates are collected in a [`ModuleCatalog`]
//!   by the embedding binary;
//! - declarative component and template files are found by [`discovery`];
//! - pages are resolved one at a time from the config `pages` table, either
//!   to a code-level [`PageModule`] registered under the same source path or
//!   to a declarative page file on disk.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_modules::ModuleCatalog;
//!
//! let catalog = ModuleCatalog::new()
//!     .component("header-component", header)
//!     .template("main-layout", main_layout)
//!     .page("src/pages/home.rs", home_page);
//! ```

pub mod discovery;
pub mod files;
pub mod interpolate;

use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use vitrine_core::{Component, PageInstance, Registry, Template};

pub use discovery::{discover, FileModule, COMPONENTS_DIR, TEMPLATES_DIR};
pub use files::{ComponentFile, PageFile, TemplateFile};
pub use interpolate::Interpolator;

/// Errors raised while loading a module
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("MODULE/IO: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("MODULE/PARSE: {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("MODULE/UNKNOWN: no page module or definition file at {}", .path.display())]
    UnknownPage { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Component,
    Template,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => write!(f, "component"),
            Self::Template => write!(f, "template"),
        }
    }
}

/// A unit that registers one component or template
pub trait Module: Send + Sync {
    /// Label used in logs
    fn name(&self) -> &str;

    fn kind(&self) -> ModuleKind;

    fn register(&self, registry: &mut Registry) -> Result<(), ModuleError>;
}

/// A page source that produces its page bound to the route it declares
pub trait PageModule: Send + Sync {
    fn load(&self) -> Result<PageInstance, ModuleError>;
}

impl<F> PageModule for F
where
    F: Fn() -> PageInstance + Send + Sync,
{
    fn load(&self) -> Result<PageInstance, ModuleError> {
        Ok(self())
    }
}

/// Code-level component registration
pub struct ComponentModule {
    name: String,
    component: Arc<dyn Component>,
}

impl Module for ComponentModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Component
    }

    fn register(&self, registry: &mut Registry) -> Result<(), ModuleError> {
        registry.register_component(self.name.clone(), self.component.clone());
        Ok(())
    }
}

/// Code-level template registration
pub struct TemplateModule {
    name: String,
    template: Arc<dyn Template>,
}

impl Module for TemplateModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Template
    }

    fn register(&self, registry: &mut Registry) -> Result<(), ModuleError> {
        registry.register_template(self.name.clone(), self.template.clone());
        Ok(())
    }
}

/// Outcome of registering a batch of component/template modules
#[derive(Debug, Default)]
pub struct LoadReport {
    pub components: usize,
    pub templates: usize,
    pub failures: Vec<ModuleFailure>,
}

#[derive(Debug)]
pub struct ModuleFailure {
    pub module: String,
    pub kind: ModuleKind,
    pub error: ModuleError,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.components + self.templates
    }
}

/// Register every module; a failing module is logged and skipped
pub fn register_modules(modules: &[Box<dyn Module>], registry: &mut Registry) -> LoadReport {
    let mut report = LoadReport::default();
    for module in modules {
        match module.register(registry) {
            Ok(()) => {
                tracing::info!(kind = %module.kind(), module = module.name(), "module loaded");
                match module.kind() {
                    ModuleKind::Component => report.components += 1,
                    ModuleKind::Template => report.templates += 1,
                }
            }
            Err(error) => {
                tracing::error!(kind = %module.kind(), module = module.name(), error = %error, "module failed to load");
                report.failures.push(ModuleFailure {
                    module: module.name().to_string(),
                    kind: module.kind(),
                    error,
                });
            }
        }
    }
    report
}

/// Modules supplied by the embedding binary
#[derive(Default)]
pub struct ModuleCatalog {
    modules: Vec<Box<dyn Module>>,
    pages: IndexMap<String, Box<dyn PageModule>>,
    interpolator: Arc<Interpolator>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, name: impl Into<String>, component: impl Component + 'static) -> Self {
        self.modules.push(Box::new(ComponentModule {
            name: name.into(),
            component: Arc::new(component),
        }));
        self
    }

    pub fn template(mut self, name: impl Into<String>, template: impl Template + 'static) -> Self {
        self.modules.push(Box::new(TemplateModule {
            name: name.into(),
            template: Arc::new(template),
        }));
        self
    }

    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Register a page module under the source path the config `pages` table uses
    pub fn page(mut self, source: impl Into<String>, page: impl PageModule + 'static) -> Self {
        self.pages.insert(source.into(), Box::new(page));
        self
    }

    pub fn page_sources(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    /// Code-level modules plus everything discovered under `root`
    pub fn register_all(&self, root: &Path, registry: &mut Registry) -> LoadReport {
        let mut report = register_modules(&self.modules, registry);
        let discovered = discover(root, self.interpolator.clone());
        let found = register_modules(&discovered, registry);
        report.components += found.components;
        report.templates += found.templates;
        report.failures.extend(found.failures);
        report
    }

    /// Resolve a config page source to its page
    pub fn load_page(&self, source: &str, root: &Path) -> Result<PageInstance, ModuleError> {
        if let Some(module) = self.pages.get(source) {
            return module.load();
        }
        let path = root.join(source);
        if files::is_definition_file(&path) && path.is_file() {
            return PageFile::load(&path).map(PageFile::into_instance);
        }
        Err(ModuleError::UnknownPage { path })
    }
}
