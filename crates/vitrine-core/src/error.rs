//! Error model shared by the registry and the rendering engine
use thiserror::Error;

/// Route table inconsistencies. Every variant is fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A page declared a route the config `pages` table does not list
    #[error("ROUTE/UNDECLARED: route \"{route}\" has no matching key in the config pages table (declared: {})", .declared.join(", "))]
    Undeclared { route: String, declared: Vec<String> },

    /// Config routes with no page registered for them
    #[error("ROUTE/MISSING: config routes were never registered by a page: {}", .routes.join(", "))]
    Missing { routes: Vec<String> },

    #[error("ROUTE/FROZEN: route table already validated, cannot register \"{route}\"")]
    Frozen { route: String },

    #[error("ROUTE/FAILED: route validation already failed")]
    AlreadyFailed,
}

/// Failures raised while producing or rendering a node tree
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("RENDER/COMPONENT: component \"{name}\": {message}")]
    Component { name: String, message: String },

    #[error("RENDER/TEMPLATE: template \"{0}\" is not registered")]
    MissingTemplate(String),

    #[error("RENDER/PAGE: page \"{route}\": {message}")]
    Page { route: String, message: String },

    /// Tag or attribute names that cannot appear in markup
    #[error("RENDER/NAME: invalid {kind} name \"{name}\"")]
    InvalidName { kind: &'static str, name: String },

    #[error("RENDER/INTERPOLATE: {0}")]
    Interpolation(String),
}
