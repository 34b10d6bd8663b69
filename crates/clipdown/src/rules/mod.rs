//! Element handlers.
//!
//! Every element is classified once into a [`Tag`]. Dedicated handlers win,
//! then the transparent set (children kept, tag dropped), then the skipped set
//! (element and subtree dropped). Anything left is kept as literal HTML.

mod block;
mod critic;
mod footnote;
mod inline;

use crate::convert::Session;
use crate::node::NodeRef;
use crate::options::Options;
use crate::utilities::{is_skipped, is_transparent};
use crate::Result;

/// How an element is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Heading(usize),
    Paragraph,
    Blockquote,
    List { ordered: bool },
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Preformatted,
    Code,
    HorizontalRule,
    Anchor,
    Image,
    Emphasis,
    Strong,
    LineBreak,
    Superscript,
    Insertion,
    Deletion,
    Highlight,
    /// `div` and `section`, which may hold footnote definitions
    Division,
    Center,
    Transparent,
    Skipped,
    Unknown,
}

impl Tag {
    pub(crate) fn classify(tag: &str, options: &Options) -> Self {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                Tag::Heading(usize::from(tag.as_bytes()[1] - b'0'))
            }
            "p" => Tag::Paragraph,
            "blockquote" => Tag::Blockquote,
            "ol" => Tag::List { ordered: true },
            "ul" => Tag::List { ordered: false },
            "li" => Tag::ListItem,
            "dl" if options.definition_lists => Tag::DefinitionList,
            "dt" if options.definition_lists => Tag::DefinitionTerm,
            "dd" if options.definition_lists => Tag::DefinitionDescription,
            "pre" => Tag::Preformatted,
            "code" | "tt" | "kbd" | "samp" => Tag::Code,
            "hr" => Tag::HorizontalRule,
            "a" => Tag::Anchor,
            "img" => Tag::Image,
            "em" | "i" => Tag::Emphasis,
            "strong" | "b" => Tag::Strong,
            "br" => Tag::LineBreak,
            "sup" if options.footnotes => Tag::Superscript,
            "ins" if options.critic_markup => Tag::Insertion,
            "del" | "s" | "strike" if options.critic_markup => Tag::Deletion,
            "u" | "mark" if options.critic_markup => Tag::Highlight,
            "div" | "section" => Tag::Division,
            "center" => Tag::Center,
            t if is_transparent(t) => Tag::Transparent,
            t if is_skipped(t) => Tag::Skipped,
            _ => Tag::Unknown,
        }
    }
}

impl Session<'_> {
    pub(crate) fn element(&mut self, node: NodeRef<'_>) -> Result<()> {
        match Tag::classify(node.tag_name(), self.options) {
            Tag::Heading(level) => self.heading(node, level),
            Tag::Paragraph => self.paragraph(node),
            Tag::Blockquote => self.blockquote(node),
            Tag::List { ordered } => self.list(node, ordered),
            Tag::ListItem => self.list_item(node),
            Tag::DefinitionList => self.definition_list(node),
            Tag::DefinitionTerm => self.definition_term(node),
            Tag::DefinitionDescription => self.definition_description(node),
            Tag::Preformatted => self.preformatted(node),
            Tag::Code => self.inline_code(node),
            Tag::HorizontalRule => {
                self.horizontal_rule();
                Ok(())
            }
            Tag::Anchor => self.anchor(node),
            Tag::Image => {
                self.image(node);
                Ok(())
            }
            Tag::Emphasis => self.delimited(node, "*"),
            Tag::Strong => self.delimited(node, "**"),
            Tag::LineBreak => {
                self.run.push("  \n");
                Ok(())
            }
            Tag::Superscript => self.superscript(node),
            Tag::Insertion => self.critic(node, "{++", "++}"),
            Tag::Deletion => self.critic(node, "{--", "--}"),
            Tag::Highlight => self.critic(node, "{==", "==}{>><<}"),
            Tag::Division => self.division(node),
            Tag::Center => self.center(node),
            Tag::Transparent => self.transparent(node),
            Tag::Skipped => Ok(()),
            Tag::Unknown => {
                self.pass_through(node.node);
                Ok(())
            }
        }
    }
}
