//! CriticMarkup for edits: `ins`, `del` and highlights.

use crate::convert::Session;
use crate::node::NodeRef;
use crate::utilities::is_block;
use crate::Result;

impl Session<'_> {
    /// Wrap the element in `open`/`close`.
    ///
    /// When the element holds blocks and no text of its own, the opener is
    /// carried to the start of the next flushed block and the closer is
    /// spliced onto the last written one. Code blocks get both markers on
    /// lines of their own.
    pub(crate) fn critic(&mut self, node: NodeRef<'_>, open: &str, close: &str) -> Result<()> {
        self.annotate(node.node, &[]);

        let has_text = !node.node.own_text().trim().is_empty();
        let wraps_blocks = node.node.element_children().any(|c| is_block(c.tag_name()));
        if has_text || !wraps_blocks || !self.run.is_blank() {
            self.run.push(open);
            self.walk_children(node.node)?;
            self.run.push(close);
            return Ok(());
        }

        let carry_mark = self.carry.len();
        self.carry.push_str(open);
        self.walk_children(node.node)?;

        if self.carry.len() > carry_mark {
            // no block was written; the opener moves to the buffered inline tail
            self.carry.truncate(carry_mark);
            if !self.run.is_blank() {
                self.run.insert_before_content(open);
                self.run.push(close);
            }
        } else if !self.run.is_blank() {
            self.run.push(close);
        } else if self.code_written {
            let line = format!("\n{}{close}", self.stack.continuation());
            self.output.splice(&line);
        } else {
            self.output.splice(close);
        }
        Ok(())
    }
}
