//! Vitrine Core: node model, registry, route validation and rendering engine
//!
//! Pages, templates and components describe markup as declarative [`Node`]
//! trees. They are registered by name into a [`Registry`], which also keeps
//! the config-declared and code-declared route sets in agreement, and are
//! turned into a [`DomNode`] tree by the [`Renderer`].

pub mod definition;
pub mod dom;
pub mod error;
pub mod node;
pub mod registry;
pub mod render;
pub mod validation;

pub use definition::{Component, Page, PageInstance, Template};
pub use dom::{escape_html, DomElement, DomNode};
pub use error::{RenderError, RouteError};
pub use node::{Element, Node, Prop, Props};
pub use registry::Registry;
pub use render::{render, render_to_html, Renderer, TagKind};
pub use validation::{normalize_route, route_name, RouteValidation, ValidationState};

/// Vitrine version
pub const VITRINE_VERSION: &str = env!("CARGO_PKG_VERSION");
