//! Handlebars interpolation and slot filling for declarative definitions.
//!
//! Declarative components treat every string in their body as a Handlebars
//! template rendered against the element's props. HTML escaping is left to
//! the DOM serializer, so Handlebars runs with escaping disabled.
//!
//! Templates (and components) mark where caller content goes with a `slot`
//! element.

use handlebars::{no_escape, Handlebars};
use serde_json::Value;
use vitrine_core::{Element, Node, Prop, Props, RenderError};

/// Tag replaced by caller-supplied content
pub const SLOT_TAG: &str = "slot";

/// Compiled interpolator shared by all declarative components
pub struct Interpolator {
    handlebars: Handlebars<'static>,
}

impl Interpolator {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);
        Interpolator { handlebars }
    }

    /// Render a single string; strings without an expression pass through
    pub fn interpolate_str(&self, template: &str, data: &Value) -> Result<String, RenderError> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        self.handlebars
            .render_template(template, data)
            .map_err(|e| RenderError::Interpolation(e.to_string()))
    }

    /// Interpolate every text node and string prop of a tree
    pub fn interpolate(&self, node: &Node, data: &Value) -> Result<Node, RenderError> {
        match node {
            Node::Text(text) => Ok(Node::Text(self.interpolate_str(text, data)?)),
            Node::Sequence(items) => items
                .iter()
                .map(|item| self.interpolate(item, data))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            Node::Element(element) => {
                let mut props = Props::new();
                for (key, prop) in element.props.iter() {
                    let prop = match prop {
                        Prop::Content(content) => Prop::Content(self.interpolate(content, data)?),
                        Prop::Events(events) => Prop::Events(
                            events
                                .iter()
                                .map(|(event, handler)| {
                                    Ok((event.clone(), self.interpolate_str(handler, data)?))
                                })
                                .collect::<Result<Vec<_>, RenderError>>()?,
                        ),
                        Prop::Value(Value::String(s)) => {
                            Prop::Value(Value::String(self.interpolate_str(s, data)?))
                        }
                        Prop::Value(other) => Prop::Value(other.clone()),
                    };
                    props.insert(key, prop);
                }
                Ok(Node::Element(Element {
                    tag: element.tag.clone(),
                    props,
                }))
            }
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every `slot` element with `content`
pub fn fill_slots(node: &Node, content: &Node) -> Node {
    match node {
        Node::Element(element) if element.tag == SLOT_TAG => content.clone(),
        Node::Element(element) => {
            let mut props = Props::new();
            for (key, prop) in element.props.iter() {
                let prop = match prop {
                    Prop::Content(inner) => Prop::Content(fill_slots(inner, content)),
                    other => other.clone(),
                };
                props.insert(key, prop);
            }
            Node::Element(Element {
                tag: element.tag.clone(),
                props,
            })
        }
        Node::Sequence(items) => Node::Sequence(items.iter().map(|i| fill_slots(i, content)).collect()),
        Node::Text(_) => node.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolates_text_and_attributes() {
        let interpolator = Interpolator::new();
        let body = Node::from(json!({
            "a": { "href": "/users/{{id}}", "content": "Hello, {{name}}!" }
        }));
        let out = interpolator
            .interpolate(&body, &json!({ "id": 7, "name": "<Ana>" }))
            .unwrap();
        assert_eq!(
            out,
            Node::from(json!({ "a": { "href": "/users/7", "content": "Hello, <Ana>!" } }))
        );
    }

    #[test]
    fn test_missing_values_render_empty() {
        let interpolator = Interpolator::new();
        let out = interpolator.interpolate_str("[{{missing}}]", &json!({})).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_non_string_props_untouched() {
        let interpolator = Interpolator::new();
        let body = Node::from(json!({ "input": { "tabindex": 3 } }));
        assert_eq!(interpolator.interpolate(&body, &json!({})).unwrap(), body);
    }

    #[test]
    fn test_broken_expression_is_an_error() {
        let interpolator = Interpolator::new();
        let err = interpolator.interpolate_str("{{#if}}", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Interpolation(_)));
    }

    #[test]
    fn test_fill_slots_nested() {
        let layout = Node::from(json!({
            "div": { "content": [{ "main": { "content": { "slot": {} } } }, { "footer": {} }] }
        }));
        let filled = fill_slots(&layout, &Node::text("page"));
        assert_eq!(
            filled,
            Node::from(json!({
                "div": { "content": [{ "main": { "content": "page" } }, { "footer": {} }] }
            }))
        );
    }
}
