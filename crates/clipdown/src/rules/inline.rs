//! Inline elements, appended to the run buffer of the enclosing block.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::{leftover_attributes, Session};
use crate::node::{Node, NodeRef};
use crate::utilities::{attribute_list, clean_attribute, code_fence_for};
use crate::Result;

/// `id` of a footnote reference marker: `fnr`, `fnref`, `fnref:1`, ...
static FOOTNOTE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^fnr(ef)*").expect("valid footnote pattern"));

fn is_footnote_reference(node: NodeRef<'_>) -> bool {
    node.attr("id").is_some_and(|id| FOOTNOTE_REF.is_match(id))
}

impl Session<'_> {
    pub(crate) fn inline_code(&mut self, node: NodeRef<'_>) -> Result<()> {
        let code = node.node.text_content();
        if code.is_empty() {
            return Ok(());
        }
        self.annotate(node.node, &[]);

        let fence = code_fence_for(&code);
        let pad = if code.starts_with('`') || code.ends_with('`') { " " } else { "" };
        self.run.push(format!("{fence}{pad}{code}{pad}{fence}"));
        Ok(())
    }

    pub(crate) fn anchor(&mut self, node: NodeRef<'_>) -> Result<()> {
        if self.options.footnotes && is_footnote_reference(node) {
            self.footnote_reference();
            return Ok(());
        }
        let Some(href) = node.attr("href") else {
            self.pass_through(node.node);
            return Ok(());
        };
        let href = clean_attribute(Some(href));

        self.run.push("[");
        self.walk_children(node.node)?;
        let title = self.link_title(node.node, &["href", "title"]);
        self.run.push(format!("]({href}{title})"));
        Ok(())
    }

    pub(crate) fn image(&mut self, node: NodeRef<'_>) {
        let Some(src) = node.attr("src") else {
            self.pass_through(node.node);
            return;
        };
        let src = clean_attribute(Some(src));
        let alt = Some(clean_attribute(node.attr("alt")))
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| clean_attribute(node.attr("title")));

        let title = self.link_title(node.node, &["src", "alt", "title"]);
        self.run.push(format!("![{alt}]({src}{title})"));
    }

    /// `em` and `strong`; nothing is written when the content is empty
    pub(crate) fn delimited(&mut self, node: NodeRef<'_>, delimiter: &str) -> Result<()> {
        self.annotate(node.node, &[]);

        let mark = self.run.len();
        self.run.push(delimiter);
        self.walk_children(node.node)?;
        if self.run.len() == mark + 1 {
            self.run.truncate(mark);
        } else {
            self.run.push(delimiter);
        }
        Ok(())
    }

    pub(crate) fn superscript(&mut self, node: NodeRef<'_>) -> Result<()> {
        if is_footnote_reference(node) {
            self.footnote_reference();
        } else {
            self.pass_through(node.node);
        }
        Ok(())
    }

    fn footnote_reference(&mut self) {
        self.footnote_refs += 1;
        self.run.push(format!("[^{}]", self.footnote_refs));
    }

    /// ` "title"` part of a link, with leftover attributes appended when
    /// attribute output is on
    fn link_title(&self, node: &Node, consumed: &[&str]) -> String {
        let mut parts = Vec::new();
        let title = clean_attribute(node.attr("title"));
        if !title.is_empty() {
            parts.push(title);
        }
        if self.options.emit_attributes {
            let leftover = attribute_list(&leftover_attributes(node, consumed));
            if !leftover.is_empty() {
                parts.push(format!("{{{{{leftover}}}}}"));
            }
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", parts.join(" "))
        }
    }
}
