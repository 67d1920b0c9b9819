//! Rendering engine: declarative [`Node`] -> concrete [`DomNode`].
//!
//! Custom tags are resolved through the registry. A tag is a component
//! reference only when it contains a hyphen and a component is registered
//! under that exact name; the component's output replaces the tag entirely.
//! Anything else, including unknown custom tags, becomes a literal element.
use std::sync::Arc;

use crate::definition::Component;
use crate::dom::{is_valid_name, DomElement, DomNode};
use crate::error::RenderError;
use crate::node::{value_to_string, Element, Node, Prop};
use crate::registry::Registry;

/// Prefix of the attributes that mark event handlers for a client-side binder
pub const EVENT_MARKER_PREFIX: &str = "data-event-";

/// How a tag is materialized
pub enum TagKind {
    Standard,
    Component(Arc<dyn Component>),
}

/// Renders nodes against a registry. Never mutates the registry.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    registry: &'r Registry,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Decide once per element whether it is a component reference
    pub fn classify(&self, tag: &str) -> TagKind {
        if tag.contains('-') {
            if let Some(component) = self.registry.component(tag) {
                return TagKind::Component(component);
            }
            tracing::trace!(tag, "no component registered, emitting as element");
        }
        TagKind::Standard
    }

    pub fn render(&self, node: &Node) -> Result<DomNode, RenderError> {
        match node {
            Node::Text(text) => Ok(DomNode::Text(text.clone())),
            Node::Sequence(items) => items
                .iter()
                .map(|item| self.render(item))
                .collect::<Result<Vec<_>, _>>()
                .map(DomNode::Fragment),
            Node::Element(element) => match self.classify(&element.tag) {
                TagKind::Component(component) => {
                    let substitute = component.render(&element.props, self.registry)?;
                    self.render(&substitute)
                }
                TagKind::Standard => self.render_standard(element).map(DomNode::Element),
            },
        }
    }

    fn render_standard(&self, element: &Element) -> Result<DomElement, RenderError> {
        if !is_valid_name(&element.tag) {
            return Err(RenderError::InvalidName {
                kind: "tag",
                name: element.tag.clone(),
            });
        }
        let mut dom = DomElement::new(&element.tag);

        for (key, prop) in element.props.iter() {
            match prop {
                Prop::Content(content) => {
                    for item in content.items() {
                        dom.append(self.render(item)?);
                    }
                }
                Prop::Events(events) => {
                    for (event, handler) in events {
                        let name = format!("{}{}", EVENT_MARKER_PREFIX, event);
                        set_checked(&mut dom, &name, handler)?;
                    }
                }
                Prop::Value(value) => set_checked(&mut dom, key, &value_to_string(value))?,
            }
        }

        Ok(dom)
    }
}

fn set_checked(dom: &mut DomElement, name: &str, value: &str) -> Result<(), RenderError> {
    if !is_valid_name(name) {
        return Err(RenderError::InvalidName {
            kind: "attribute",
            name: name.to_string(),
        });
    }
    dom.set_attribute(name, value);
    Ok(())
}

/// Render a node tree against `registry`
pub fn render(node: &Node, registry: &Registry) -> Result<DomNode, RenderError> {
    Renderer::new(registry).render(node)
}

/// Render a node tree straight to markup
pub fn render_to_html(node: &Node, registry: &Registry) -> Result<String, RenderError> {
    render(node, registry).map(|dom| dom.to_html())
}
