//! Auto-discovery of declarative component and template files.
//!
//! Both trees are walked recursively and independently of the config
//! manifest. Every definition file found becomes a [`FileModule`]; reading
//! and parsing happen when the module is registered, so one broken file only
//! fails its own registration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use vitrine_core::Registry;

use crate::files::{is_definition_file, ComponentFile, TemplateFile};
use crate::interpolate::Interpolator;
use crate::{Module, ModuleError, ModuleKind};

/// Directory scanned for components, relative to the site root
pub const COMPONENTS_DIR: &str = "components";
/// Directory scanned for templates, relative to the site root
pub const TEMPLATES_DIR: &str = "templates";

/// Definition files below `dir`, sorted for a stable load order.
/// A missing directory yields nothing.
pub fn find_definition_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "discovery directory absent");
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry during discovery");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_definition_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Component modules followed by template modules found under `root`
pub fn discover(root: &Path, interpolator: Arc<Interpolator>) -> Vec<Box<dyn Module>> {
    let components = find_definition_files(&root.join(COMPONENTS_DIR))
        .into_iter()
        .map(|path| FileModule::component(path, interpolator.clone()));
    let templates = find_definition_files(&root.join(TEMPLATES_DIR))
        .into_iter()
        .map(FileModule::template);
    components
        .chain(templates)
        .map(|m| Box::new(m) as Box<dyn Module>)
        .collect()
}

/// A component or template definition file awaiting registration
pub struct FileModule {
    path: PathBuf,
    label: String,
    kind: ModuleKind,
    interpolator: Option<Arc<Interpolator>>,
}

impl FileModule {
    pub fn component(path: PathBuf, interpolator: Arc<Interpolator>) -> Self {
        Self {
            label: path.display().to_string(),
            path,
            kind: ModuleKind::Component,
            interpolator: Some(interpolator),
        }
    }

    pub fn template(path: PathBuf) -> Self {
        Self {
            label: path.display().to_string(),
            path,
            kind: ModuleKind::Template,
            interpolator: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Module for FileModule {
    fn name(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> ModuleKind {
        self.kind
    }

    fn register(&self, registry: &mut Registry) -> Result<(), ModuleError> {
        match self.kind {
            ModuleKind::Component => {
                let file = ComponentFile::load(&self.path)?;
                let interpolator = self.interpolator.clone().unwrap_or_default();
                let name = file.component.clone();
                registry.register_component(name, Arc::new(file.into_component(interpolator)));
            }
            ModuleKind::Template => {
                let file = TemplateFile::load(&self.path)?;
                let name = file.template.clone();
                registry.register_template(name, Arc::new(file.into_template()));
            }
        }
        Ok(())
    }
}
