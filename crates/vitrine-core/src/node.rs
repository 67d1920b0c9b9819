//! Node: the declarative authoring unit for pages, templates and components.
//!
//! Nodes are written as JSON/YAML-like literals:
//!
//! ```text
//! "hello"                                  -> Text
//! ["a", {"b": {}}]                         -> Sequence
//! {"div": {"class": "x", "content": "hi"}} -> Element
//! ```
//!
//! Conversion from [`serde_json::Value`] is lenient: it never fails, it only
//! decides which variant a value describes.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prop key holding an element's children
pub const CONTENT_KEY: &str = "content";
/// Prop key holding an element's event markers
pub const EVENTS_KEY: &str = "events";

/// A declarative UI unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    /// Literal text
    Text(String),
    /// Ordered children, rendered as a fragment
    Sequence(Vec<Node>),
    /// A tag with its props
    Element(Element),
}

/// A single tag-to-props entry
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub props: Props,
}

/// One prop value, classified by its key
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    /// `content`: rendered recursively as children
    Content(Node),
    /// `events`: event name -> handler method name
    Events(Vec<(String, String)>),
    /// Anything else: emitted as a literal string attribute
    Value(Value),
}

/// Ordered props of an element. Insertion order is the emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: Vec<(String, Prop)>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    /// Start building an element node
    pub fn element(tag: impl Into<String>) -> Element {
        Element::new(tag)
    }

    /// An empty sequence renders as an empty fragment
    pub fn empty() -> Self {
        Node::Sequence(Vec::new())
    }

    /// Interpret a JSON-like value as a node
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Node::Text(s),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from_value).collect()),
            Value::Object(map) => match map.into_iter().next() {
                Some((tag, props)) => Node::Element(Element {
                    tag,
                    props: match props {
                        Value::Object(props) => Props::from_map(props),
                        _ => Props::default(),
                    },
                }),
                None => Node::empty(),
            },
            Value::Number(n) => Node::Text(n.to_string()),
            Value::Bool(b) => Node::Text(b.to_string()),
            Value::Null => Node::empty(),
        }
    }

    /// Inverse of [`Node::from_value`] for well-formed nodes
    pub fn to_value(&self) -> Value {
        match self {
            Node::Text(s) => Value::String(s.clone()),
            Node::Sequence(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            Node::Element(el) => {
                let mut map = Map::new();
                map.insert(el.tag.clone(), el.props.to_value());
                Value::Object(map)
            }
        }
    }

    /// Items a `content` prop contributes: a sequence spreads, anything else is one item
    pub fn items(&self) -> &[Node] {
        match self {
            Node::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_value(value)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_value()
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::default(),
        }
    }

    /// Set a literal attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key, Prop::Value(value.into()));
        self
    }

    /// Append children to the `content` prop
    pub fn content(mut self, node: impl Into<Node>) -> Self {
        let node = node.into();
        let merged = match self.props.content() {
            Some(existing) => {
                let mut items = existing.items().to_vec();
                items.extend(node.items().iter().cloned());
                Node::Sequence(items)
            }
            None => node,
        };
        self.props.insert(CONTENT_KEY, Prop::Content(merged));
        self
    }

    /// Declare an event marker
    pub fn on(mut self, event: impl Into<String>, handler: impl Into<String>) -> Self {
        let mut events = self.props.events().to_vec();
        events.push((event.into(), handler.into()));
        self.props.insert(EVENTS_KEY, Prop::Events(events));
        self
    }
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every entry of a props object
    pub fn from_map(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let prop = match key.as_str() {
                    CONTENT_KEY if is_falsy(&value) => Prop::Content(Node::empty()),
                    CONTENT_KEY => Prop::Content(Node::from_value(value)),
                    EVENTS_KEY => Prop::Events(match value {
                        Value::Object(events) => events
                            .into_iter()
                            .map(|(event, handler)| (event, value_to_string(&handler)))
                            .collect(),
                        _ => Vec::new(),
                    }),
                    _ => Prop::Value(value),
                };
                (key, prop)
            })
            .collect();
        Self { entries }
    }

    /// Insert or replace a prop; a replaced prop keeps its position
    pub fn insert(&mut self, key: impl Into<String>, prop: Prop) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = prop,
            None => self.entries.push((key, prop)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// A literal prop's raw value
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(Prop::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// A literal prop's value when it is a string
    pub fn str(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&Node> {
        match self.get(CONTENT_KEY) {
            Some(Prop::Content(node)) => Some(node),
            _ => None,
        }
    }

    pub fn events(&self) -> &[(String, String)] {
        match self.get(EVENTS_KEY) {
            Some(Prop::Events(events)) => events,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Props as a JSON object, e.g. as template data
    pub fn to_value(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(key, prop)| {
                let value = match prop {
                    Prop::Content(node) => node.to_value(),
                    Prop::Events(events) => Value::Object(
                        events
                            .iter()
                            .map(|(e, h)| (e.clone(), Value::String(h.clone())))
                            .collect(),
                    ),
                    Prop::Value(v) => v.clone(),
                };
                (key.clone(), value)
            })
            .collect();
        Value::Object(map)
    }
}

/// String coercion used for attribute values and handler names
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// `null`, `false`, zero and `""` contribute no content
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
