//! HTML parsing support.
//!
//! Turns an HTML string into the [`Node`] tree the converter walks, keeping
//! comments so they can become CriticMarkup.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML document into a Node tree.
///
/// The result is a document node whose only child is the `html` element;
/// missing `html`, `head` and `body` tags are supplied by the parser.
///
/// # Example
///
/// ```rust
/// use clipdown::{convert, parse_html, Options};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
/// let markdown = convert(&node, &Options::default()).unwrap();
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    Node::document().with_child(scraper_to_node(document.root_element()))
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => node.add_child(Node::text(&text.text)),
            ScraperNode::Comment(comment) => node.add_child(Node::comment(&comment.comment)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn test_parse_wraps_document() {
        let node = parse_html("<p>Hello World</p>");
        assert_eq!(node.node_type, NodeType::Document);
        let html = node.element_children().next().unwrap();
        assert_eq!(html.tag_name(), "html");
    }

    #[test]
    fn test_attributes_and_comments_survive() {
        let node = parse_html(r#"<p class="x">a<!-- note --></p>"#);
        let p = node
            .element_children()
            .flat_map(Node::element_children)
            .flat_map(Node::element_children)
            .find(|n| n.tag_name() == "p")
            .unwrap();
        assert_eq!(p.attr("class"), Some("x"));
        assert!(p.children().any(|c| c.is_comment() && c.value() == " note "));
    }
}
