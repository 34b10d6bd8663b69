//! The conversion walk.
//!
//! A [`Session`] is created per call and threaded through every handler. Inline
//! content collects in the run buffer; block handlers flush it into the output
//! with the prefix computed from the context stack.

mod buffer;
mod context;
mod output;

use std::mem;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::entities;
use crate::node::{Node, NodeRef, NodeType};
use crate::options::Options;
use crate::utilities::{collapse_whitespace, is_block};
use crate::{Error, Result};

use buffer::RunBuffer;
use context::ContextStack;
use output::Output;

pub(crate) use buffer::Annotation;
pub(crate) use context::Marker;
pub(crate) use output::Separator;

/// Convert a tree to Markdown.
///
/// All state lives for this call only; nothing is shared between calls.
pub fn convert(node: &Node, options: &Options) -> Result<String> {
    if node.is_element() && node.tag_name().is_empty() {
        return Err(Error::InvalidInput("element without a tag name".to_string()));
    }

    let mut session = Session::new(options);
    session.visit(NodeRef::new(node))?;
    session.flush(Separator::None);
    debug_assert_eq!(session.stack.depth(), 0);

    if session.footnote_refs != session.footnote_defs {
        warn!(
            references = session.footnote_refs,
            definitions = session.footnote_defs,
            "footnote references and definitions do not line up"
        );
    }

    let markdown = session.output.finish();
    debug!(
        bytes = markdown.len(),
        footnotes = session.footnote_refs,
        "conversion finished"
    );
    Ok(markdown)
}

/// State of one conversion
pub(crate) struct Session<'o> {
    pub(crate) options: &'o Options,
    pub(crate) stack: ContextStack,
    pub(crate) run: RunBuffer,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) output: Output,
    /// Opening markers waiting for the next flushed content
    pub(crate) carry: String,
    pub(crate) footnote_refs: usize,
    pub(crate) footnote_defs: usize,
    pub(crate) list_depth: usize,
    pub(crate) in_footnotes: bool,
    /// The last written block was a code block
    pub(crate) code_written: bool,
    /// Handlers currently collecting inline content
    block_depth: usize,
    depth: usize,
}

impl<'o> Session<'o> {
    fn new(options: &'o Options) -> Self {
        Self {
            options,
            stack: ContextStack::default(),
            run: RunBuffer::default(),
            annotations: Vec::new(),
            output: Output::default(),
            carry: String::new(),
            footnote_refs: 0,
            footnote_defs: 0,
            list_depth: 0,
            in_footnotes: false,
            code_written: false,
            block_depth: 0,
            depth: 0,
        }
    }

    pub(crate) fn visit(&mut self, node: NodeRef<'_>) -> Result<()> {
        match node.node.node_type {
            NodeType::Text => {
                self.text(node);
                Ok(())
            }
            NodeType::Comment => {
                self.comment(node.node);
                Ok(())
            }
            NodeType::Document => self.walk_children(node.node),
            NodeType::Element => {
                if self.depth >= self.options.max_depth {
                    return Err(Error::NestingTooDeep {
                        limit: self.options.max_depth,
                    });
                }
                self.depth += 1;
                let result = self.element(node);
                self.depth -= 1;
                result
            }
        }
    }

    pub(crate) fn walk_children(&mut self, parent: &Node) -> Result<()> {
        for index in 0..parent.children.len() {
            if let Some(child) = NodeRef::child_of(parent, index) {
                self.visit(child)?;
            }
        }
        Ok(())
    }

    fn text(&mut self, node: NodeRef<'_>) {
        let raw = node.node.value();
        if raw.is_empty() {
            return;
        }

        if node.parent_tag().map_or(true, is_block) {
            let collapsed = collapse_whitespace(raw);
            let text = if self.run.at_line_start() {
                collapsed.trim_start()
            } else {
                collapsed.as_str()
            };
            self.run.push(text);
        } else if raw.trim().is_empty() {
            if !self.run.at_line_start() {
                self.run.push(" ");
            }
        } else {
            self.run.push(raw);
        }
    }

    fn comment(&mut self, node: &Node) {
        if self.options.critic_markup {
            self.run.push(format!("{{>>{}<<}}", node.value().trim()));
        }
    }

    /// Serialized HTML for elements without a Markdown form
    pub(crate) fn pass_through(&mut self, node: &Node) {
        trace!(tag = node.tag_name(), "no markdown form, keeping markup");
        if self.block_depth > 0 || !is_block(node.tag_name()) {
            self.run.push(node.outer_html());
        } else {
            self.break_block(Separator::Blank);
            self.run.push(node.outer_html());
            self.flush(Separator::Blank);
        }
    }

    /// Queue leftover attributes of `node` for the next flush
    pub(crate) fn annotate(&mut self, node: &Node, consumed: &[&str]) {
        if !self.options.emit_attributes {
            return;
        }
        let attributes = leftover_attributes(node, consumed);
        if !attributes.is_empty() {
            self.annotations.push(Annotation {
                tag: node.tag_name().to_string(),
                attributes,
            });
        }
    }

    /// Flush buffered inline content before a new block starts
    pub(crate) fn break_block(&mut self, separator: Separator) {
        if self.run.is_blank() {
            self.run.take();
        } else {
            self.flush(separator);
        }
    }

    /// Write the run buffer as one block and request `separator` after it
    pub(crate) fn flush(&mut self, separator: Separator) {
        self.flush_with(separator, true);
    }

    /// Like [`Session::flush`], keeping surrounding whitespace
    pub(crate) fn flush_raw(&mut self, separator: Separator) {
        self.flush_with(separator, false);
    }

    fn flush_with(&mut self, separator: Separator, trim: bool) {
        let joined = self.run.take();
        let content = if trim { joined.trim() } else { joined.as_str() };

        if !content.is_empty() {
            let mut body = mem::take(&mut self.carry);
            body.push_str(&entities::normalize(content));
            let mut block = self.indent(&body);

            if !self.annotations.is_empty() {
                let rendered: Vec<String> = self
                    .annotations
                    .drain(..)
                    .map(|a| {
                        trace!(tag = %a.tag, "attribute annotation");
                        a.render()
                    })
                    .collect();
                block.push(' ');
                block.push_str(&rendered.join(" "));
            }

            self.output.write(&block);
            self.stack.settle();
            self.code_written = false;
        }

        self.separate(separator);
    }

    /// Prefix the first line and indent the rest for the current context
    fn indent(&self, body: &str) -> String {
        let continuation = self.stack.continuation();
        let blank = continuation.trim_end();
        let mut block = self.stack.line_prefix();

        for (i, line) in body.split('\n').enumerate() {
            if i > 0 {
                block.push('\n');
                block.push_str(if line.is_empty() { blank } else { &continuation });
            }
            block.push_str(line);
        }
        block
    }

    /// Request a separator in the current context without flushing
    pub(crate) fn separate(&mut self, separator: Separator) {
        let blank_line = self.stack.blank_line();
        self.output.request(separator, &blank_line);
    }

    /// Run `f` with `marker` pushed; the marker is popped on every exit path
    pub(crate) fn within<F>(&mut self, marker: Marker, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.stack.push(marker);
        let result = f(self);
        self.stack.pop();
        result
    }

    /// Run `f` as a handler that collects inline content
    pub(crate) fn accumulate<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.block_depth += 1;
        let result = f(self);
        self.block_depth -= 1;
        result
    }

    /// Render whatever `f` produces into a separate document and return it
    pub(crate) fn capture<F>(&mut self, f: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let output = mem::take(&mut self.output);
        let run = mem::take(&mut self.run);
        let stack = mem::take(&mut self.stack);
        let annotations = mem::take(&mut self.annotations);
        let carry = mem::take(&mut self.carry);
        let code_written = mem::replace(&mut self.code_written, false);

        let result = f(self);
        if result.is_ok() {
            self.flush(Separator::None);
        }
        let captured = mem::replace(&mut self.output, output).finish();

        self.run = run;
        self.stack = stack;
        self.annotations = annotations;
        self.carry = carry;
        self.code_written = code_written;
        result.map(|()| captured)
    }
}

/// Attributes of `node` other than `consumed`, in source order
pub(crate) fn leftover_attributes(node: &Node, consumed: &[&str]) -> IndexMap<String, String> {
    node.attributes
        .iter()
        .filter(|(name, _)| !consumed.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(node: &Node) -> String {
        convert(node, &Options::default()).unwrap()
    }

    #[test]
    fn test_bare_text_is_trimmed() {
        assert_eq!(md(&Node::text("  hello   world \n")), "hello world");
    }

    #[test]
    fn test_whitespace_between_inline_elements_survives() {
        let p = Node::element("p")
            .with_child(Node::element("em").with_text("a"))
            .with_text(" ")
            .with_child(Node::element("strong").with_text("b"));
        assert_eq!(md(&p), "*a* **b**");
    }

    #[test]
    fn test_inline_parent_keeps_whitespace() {
        let p = Node::element("p")
            .with_text("x ")
            .with_child(Node::element("em").with_text("a  b"));
        assert_eq!(md(&p), "x *a  b*");
    }

    #[test]
    fn test_comments_dropped_by_default() {
        let p = Node::element("p").with_text("a").with_child(Node::comment("note"));
        assert_eq!(md(&p), "a");
    }

    #[test]
    fn test_comment_as_critic_markup() {
        let options = Options {
            critic_markup: true,
            ..Default::default()
        };
        let p = Node::element("p").with_text("a ").with_child(Node::comment(" note "));
        assert_eq!(convert(&p, &options).unwrap(), "a {>>note<<}");
    }

    #[test]
    fn test_nesting_limit() {
        let mut node = Node::element("span").with_text("deep");
        for _ in 0..10 {
            node = Node::element("span").with_child(node);
        }
        let options = Options {
            max_depth: 5,
            ..Default::default()
        };
        let err = convert(&node, &options).unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { limit: 5 }));
    }

    #[test]
    fn test_element_without_name_is_rejected() {
        let err = convert(&Node::element(""), &Options::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_stack_is_balanced_after_conversion() {
        let options = Options::default();
        let mut session = Session::new(&options);
        let tree = Node::element("blockquote").with_child(
            Node::element("ul").with_child(Node::element("li").with_text("item")),
        );
        session.visit(NodeRef::new(&tree)).unwrap();
        assert_eq!(session.stack.depth(), 0);
        assert_eq!(session.list_depth, 0);
    }
}
