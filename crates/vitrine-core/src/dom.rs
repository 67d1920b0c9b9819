//! Concrete DOM produced by the rendering engine, plus HTML serialization.
//!
//! Appending a fragment to an element moves the fragment's children into the
//! element, so a finished element never holds a nested fragment.

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are emitted without entity escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(DomElement),
    Text(String),
    Fragment(Vec<DomNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn text(text: impl Into<String>) -> Self {
        DomNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&DomElement> {
        match self {
            DomNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            DomNode::Text(t) => escape_into(t, false, out),
            DomNode::Element(el) => el.write_html(out),
            DomNode::Fragment(items) => items.iter().for_each(|c| c.write_html(out)),
        }
    }
}

impl From<DomElement> for DomNode {
    fn from(el: DomElement) -> Self {
        DomNode::Element(el)
    }
}

impl DomElement {
    /// HTML documents lowercase tag names
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set or overwrite an attribute; the first write fixes its position
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child; fragments are spliced in
    pub fn append(&mut self, child: DomNode) {
        match child {
            DomNode::Fragment(items) => items.into_iter().for_each(|c| self.append(c)),
            other => self.children.push(other),
        }
    }

    pub fn with_child(mut self, child: impl Into<DomNode>) -> Self {
        self.append(child.into());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(DomNode::text(text))
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    pub fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.contains(&self.tag.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        let raw = self.is_raw_text();
        for child in &self.children {
            match child {
                DomNode::Text(t) if raw => out.push_str(t),
                other => other.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Whether a string is usable as a tag or attribute name
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '='))
}

/// Escape text for an HTML text node or a double-quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, false, &mut out);
    out
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_element() {
        let el = DomElement::new("A")
            .with_attribute("HREF", "/?a=1&b=\"2\"")
            .with_text("x < y");
        assert_eq!(el.to_html(), r#"<a href="/?a=1&amp;b=&quot;2&quot;">x &lt; y</a>"#);
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let meta = DomElement::new("meta").with_attribute("charset", "UTF-8");
        assert_eq!(meta.to_html(), r#"<meta charset="UTF-8">"#);
    }

    #[test]
    fn test_script_and_style_bodies_are_not_escaped() {
        let style = DomElement::new("style").with_text("ul > li { color: red }");
        assert_eq!(style.to_html(), "<style>ul > li { color: red }</style>");

        let script = DomElement::new("SCRIPT").with_text("if (a < b && c) { go(\"x\") }");
        assert_eq!(script.to_html(), "<script>if (a < b && c) { go(\"x\") }</script>");

        let p = DomElement::new("p").with_text("a < b && c");
        assert_eq!(p.to_html(), "<p>a &lt; b &amp;&amp; c</p>");
    }

    #[test]
    fn test_fragment_is_spliced() {
        let mut ul = DomElement::new("ul");
        ul.append(DomNode::Fragment(vec![
            DomElement::new("li").into(),
            DomNode::Fragment(vec![DomElement::new("li").into()]),
        ]));
        assert_eq!(ul.children.len(), 2);
        assert_eq!(ul.to_html(), "<ul><li></li><li></li></ul>");
    }

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut el = DomElement::new("div");
        el.set_attribute("id", "a");
        el.set_attribute("class", "b");
        el.set_attribute("id", "c");
        assert_eq!(el.to_html(), r#"<div id="c" class="b"></div>"#);
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("data-event-click"));
        assert!(is_valid_name("my-button"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("x\"onload"));
    }
}
