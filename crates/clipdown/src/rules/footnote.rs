//! Footnote containers and their definitions.
//!
//! References are numbered as they are met in the body (see
//! `Session::superscript`); definitions are numbered by their own counter in
//! container order. The two are expected to line up and a mismatch is only
//! logged.

use crate::convert::{Separator, Session};
use crate::node::{Node, NodeRef};
use crate::Result;

const CONTINUATION: &str = "    ";

impl Session<'_> {
    /// `div` and `section`: a footnote container, or a plain wrapper
    pub(crate) fn division(&mut self, node: NodeRef<'_>) -> Result<()> {
        let is_container = self.options.footnotes
            && node
                .node
                .classes()
                .any(|class| class.contains("footnote"));
        if !is_container {
            return self.transparent(node);
        }

        self.break_block(Separator::Blank);
        let outer = std::mem::replace(&mut self.in_footnotes, true);
        let result = self.footnote_container(node.node);
        self.in_footnotes = outer;
        result?;
        self.separate(Separator::Blank);
        Ok(())
    }

    fn footnote_container(&mut self, container: &Node) -> Result<()> {
        for index in 0..container.children.len() {
            let Some(child) = NodeRef::child_of(container, index) else {
                continue;
            };
            match child.tag_name() {
                "ol" | "ul" => {
                    for item in child.node.element_children().filter(|c| c.tag_name() == "li") {
                        self.footnote_definition(item)?;
                    }
                }
                _ => self.visit(child)?,
            }
        }
        Ok(())
    }

    fn footnote_definition(&mut self, item: &Node) -> Result<()> {
        let mut item = item.clone();
        strip_back_link(&mut item);

        let rendered = self.capture(|s| match sole_paragraph(&item) {
            Some(paragraph) => s.walk_children(paragraph),
            None => s.walk_children(&item),
        })?;
        let rendered = rendered.trim_end();
        let rendered = rendered.strip_suffix("()").unwrap_or(rendered).trim_end();

        self.footnote_defs += 1;
        let mut definition = format!("[^{}]: ", self.footnote_defs);
        for (i, line) in rendered.split('\n').enumerate() {
            if i > 0 {
                definition.push('\n');
                if !line.is_empty() {
                    definition.push_str(CONTINUATION);
                }
            }
            definition.push_str(line);
        }

        self.run.push(definition);
        self.flush_raw(Separator::Blank);
        Ok(())
    }
}

fn is_back_link(node: &Node) -> bool {
    node.tag_name() == "a" && node.attr("href").is_some_and(|href| href.starts_with('#'))
}

/// Drop the link back to the reference, found at the end of the item or at
/// the end of its last paragraph
fn strip_back_link(item: &mut Node) {
    if item.remove_last_matching_child(is_back_link).is_some() {
        return;
    }
    if let Some(last) = item.children.iter_mut().rev().find(|c| c.is_element()) {
        if last.tag_name() == "p" {
            last.remove_last_matching_child(is_back_link);
        }
    }
}

/// The item's only child when it is a paragraph
fn sole_paragraph(item: &Node) -> Option<&Node> {
    let mut meaningful = item
        .children()
        .filter(|c| c.is_element() || (c.is_text() && !c.value().trim().is_empty()));
    match (meaningful.next(), meaningful.next()) {
        (Some(only), None) if only.tag_name() == "p" => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_back_link_in_paragraph() {
        let mut item = Node::element("li").with_child(
            Node::element("p")
                .with_text("Note.")
                .with_child(Node::element_with_attrs("a", vec![("href", "#fnref:1")]).with_text("^"))
                .with_text(" "),
        );
        strip_back_link(&mut item);
        assert_eq!(item.text_content(), "Note. ");
    }

    #[test]
    fn test_external_link_is_not_a_back_link() {
        let mut item = Node::element("li")
            .with_text("See ")
            .with_child(Node::element_with_attrs("a", vec![("href", "http://x")]).with_text("x"));
        strip_back_link(&mut item);
        assert_eq!(item.text_content(), "See x");
    }

    #[test]
    fn test_sole_paragraph() {
        let item = Node::element("li")
            .with_text("\n  ")
            .with_child(Node::element("p").with_text("a"));
        assert!(sole_paragraph(&item).is_some());

        let item = item.with_child(Node::element("p").with_text("b"));
        assert!(sole_paragraph(&item).is_none());
    }
}
