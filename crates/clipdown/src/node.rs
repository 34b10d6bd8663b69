//! Document tree consumed by the converter.
//!
//! Any HTML parser can build this structure; the converter only reads it.
//! The one mutation the engine relies on is [`Node::remove_last_matching_child`],
//! used on a private copy when footnote back-links are stripped.

use indexmap::IndexMap;

/// Node kinds understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (`<p>`, `<a>`, ...)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document root, holds children only
    Document,
}

/// A node of the input tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node kind
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text`, `#comment` or `#document` otherwise
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes in source order, keys unique and lowercase
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_lowercase(),
            node_value: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes.
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty document root
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            node_name: "#document".to_string(),
            node_value: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Node::add_child`]
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder shorthand for appending a text child
    #[must_use]
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_comment(&self) -> bool {
        self.node_type == NodeType::Comment
    }

    /// Tag name for elements, empty for every other node kind
    pub fn tag_name(&self) -> &str {
        if self.is_element() {
            &self.node_name
        } else {
            ""
        }
    }

    /// Text of a text or comment node
    pub fn value(&self) -> &str {
        self.node_value.as_deref().unwrap_or("")
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_lowercase().as_str())
            .map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whitespace separated tokens of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Concatenated text of the direct text children
    pub fn own_text(&self) -> String {
        self.children()
            .filter(|c| c.is_text())
            .map(Node::value)
            .collect()
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, keeping the position of an existing key
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Detach the last child accepted by `predicate`, skipping trailing
    /// whitespace-only text. Returns `None` (and leaves the node untouched)
    /// when the last meaningful child does not match.
    pub fn remove_last_matching_child<F>(&mut self, predicate: F) -> Option<Node>
    where
        F: Fn(&Node) -> bool,
    {
        let index = self
            .children
            .iter()
            .rposition(|c| !(c.is_text() && c.value().trim().is_empty()))?;
        if predicate(&self.children[index]) {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value().to_string(),
            NodeType::Comment => String::new(),
            _ => self.children().map(Node::text_content).collect(),
        }
    }

    /// Reconstruct outer HTML (for literal pass-through)
    pub fn outer_html(&self) -> String {
        self.serialize(true)
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children().map(|c| c.serialize(true)).collect()
    }

    /// Inner HTML with text left as parsed, for preformatted content
    pub fn raw_inner_html(&self) -> String {
        self.children().map(|c| c.serialize(false)).collect()
    }

    fn serialize(&self, escape: bool) -> String {
        match self.node_type {
            NodeType::Text if escape => escape_html_text(self.value()),
            NodeType::Text => self.value().to_string(),
            NodeType::Comment => format!("<!--{}-->", self.value()),
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();
                let open = if attrs.is_empty() {
                    format!("<{tag}>")
                } else {
                    format!("<{tag} {attrs}>")
                };

                if self.is_void_element() {
                    open
                } else {
                    let inner: String = self.children().map(|c| c.serialize(escape)).collect();
                    format!("{open}{inner}</{tag}>")
                }
            }
            NodeType::Document => self.children().map(|c| c.serialize(escape)).collect(),
        }
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{name}=\"{}\"", escape_html_attr(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_void_element(&self) -> bool {
        crate::utilities::is_void(self.tag_name())
    }
}

fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A node seen from its place in the tree.
///
/// The walk hands handlers the parent and the next element sibling so that
/// context rules (block-level parents, adjacent `dd`s) need no parent pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent: Option<&'a Node>,
    next_element: Option<&'a Node>,
}

impl<'a> NodeRef<'a> {
    /// A root reference with no surrounding context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent: None,
            next_element: None,
        }
    }

    /// The `index`-th child of `parent`, or `None` when out of range
    pub fn child_of(parent: &'a Node, index: usize) -> Option<Self> {
        let node = parent.children.get(index)?;
        let next_element = parent.children[index + 1..]
            .iter()
            .find(|n| n.is_element());
        Some(Self {
            node,
            parent: Some(parent),
            next_element,
        })
    }

    /// Tag name of the parent element, if any
    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent.filter(|p| p.is_element()).map(Node::tag_name)
    }

    /// Next sibling that is an element, skipping text and comments
    pub fn next_element_sibling(&self) -> Option<&'a Node> {
        self.next_element
    }

    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }
}
