//! Block-level elements: headings, paragraphs, quotes, lists, definition
//! lists, preformatted text and rules.

use indexmap::IndexMap;
use tracing::warn;

use crate::convert::{Annotation, Marker, Separator, Session};
use crate::node::{Node, NodeRef};
use crate::utilities::is_block;
use crate::Result;

/// Largest `start` honoured; CommonMark allows at most nine digits
const MAX_LIST_START: u32 = 999_999_999;

/// Children of a list item that end its first line
const NESTED_BLOCKS: &[&str] = &[
    "blockquote", "dl", "h1", "h2", "h3", "h4", "h5", "h6", "ol", "p", "pre", "ul",
];

impl Session<'_> {
    pub(crate) fn heading(&mut self, node: NodeRef<'_>, level: usize) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &[]);

        let mark = self.run.len();
        self.run.push(format!("{} ", "#".repeat(level)));
        self.accumulate(|s| s.walk_children(node.node))?;
        if self.run.len() == mark + 1 {
            self.run.truncate(mark);
        }

        self.flush(Separator::Blank);
        Ok(())
    }

    pub(crate) fn paragraph(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &[]);
        self.accumulate(|s| s.walk_children(node.node))?;
        self.flush(Separator::Blank);
        Ok(())
    }

    /// Wrappers without a Markdown form of their own
    pub(crate) fn transparent(&mut self, node: NodeRef<'_>) -> Result<()> {
        if !is_block(node.tag_name()) {
            return self.walk_children(node.node);
        }
        self.break_block(Separator::Blank);
        self.walk_children(node.node)?;
        self.break_block(Separator::Blank);
        Ok(())
    }

    /// `center`: a block annotated as a centered paragraph
    pub(crate) fn center(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);

        let mark = self.annotations.len();
        if self.options.emit_attributes {
            let mut attributes = IndexMap::new();
            attributes.insert("style".to_string(), "text-align:center;".to_string());
            self.annotations.push(Annotation {
                tag: "p".to_string(),
                attributes,
            });
        }

        self.walk_children(node.node)?;
        if self.run.is_blank() {
            self.run.take();
            self.annotations.truncate(mark);
        } else {
            self.flush(Separator::Blank);
        }
        self.separate(Separator::Blank);
        Ok(())
    }

        pub(crate) fn blockquote(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &[]);
        self.within(Marker::Blockquote, |s| {
            s.walk_children(node.node)?;
            s.flush(Separator::Blank);
            Ok(())
        })?;
        self.separate(Separator::Blank);
        Ok(())
    }

    pub(crate) fn list(&mut self, node: NodeRef<'_>, ordered: bool) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &["start"]);

        let marker = if ordered {
            let number = node
                .attr("start")
                .and_then(|start| start.trim().parse::<u32>().ok())
                .map_or(1, |start| start.min(MAX_LIST_START));
            Marker::OrderedListOpen { number }
        } else {
            Marker::UnorderedListOpen
        };

        self.list_depth += 1;
        let result = self.within(marker, |s| s.walk_children(node.node));
        self.list_depth -= 1;
        result?;

        if self.list_depth == 0 {
            self.separate(Separator::Blank);
        }
        Ok(())
    }

    pub(crate) fn list_item(&mut self, node: NodeRef<'_>) -> Result<()> {
        if !self.stack.top().is_some_and(Marker::is_list) {
            warn!("list item outside of a list, rendering it as a paragraph");
            return self.paragraph(node);
        }

        self.break_block(Separator::Line);
        self.stack.update_top(Marker::rearmed);
        self.annotate(node.node, &[]);

        let mut first_block = true;
        let mut last_block: Option<&Node> = None;
        self.accumulate(|s| {
            for index in 0..node.node.children.len() {
                let Some(child) = NodeRef::child_of(node.node, index) else {
                    continue;
                };
                if NESTED_BLOCKS.contains(&child.tag_name()) {
                    if first_block {
                        // text before the first block is the item's own paragraph
                        let separator = if s.run.is_blank() {
                            Separator::Line
                        } else {
                            Separator::Blank
                        };
                        s.flush(separator);
                        first_block = false;
                    }
                    last_block = Some(child.node);
                }
                s.visit(child)?;
            }
            Ok(())
        })?;

        self.flush(Separator::Line);
        if last_block.is_some_and(is_compact) {
            self.output.tighten();
        }
        // an item that rendered nothing still uses up its number
        self.stack.update_top(Marker::settled);
        Ok(())
    }

    pub(crate) fn definition_list(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &[]);
        self.walk_children(node.node)?;
        self.flush(Separator::Blank);
        Ok(())
    }

    pub(crate) fn definition_term(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);
        self.annotate(node.node, &[]);
        self.accumulate(|s| s.walk_children(node.node))?;
        self.flush(Separator::Line);
        Ok(())
    }

    pub(crate) fn definition_description(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Line);
        self.annotate(node.node, &[]);

        let separator = match node.next_element_sibling() {
            Some(next) if next.tag_name() == "dd" => Separator::Line,
            _ => Separator::Blank,
        };
        self.within(Marker::DefinitionDescription, |s| {
            s.accumulate(|s| s.walk_children(node.node))?;
            s.flush(separator);
            Ok(())
        })
    }

    pub(crate) fn preformatted(&mut self, node: NodeRef<'_>) -> Result<()> {
        self.break_block(Separator::Blank);

        let code = sole_code_child(node.node);
        let content = match code {
            Some(code) => code.text_content(),
            None => node.node.raw_inner_html(),
        };
        let content = content.strip_suffix('\n').unwrap_or(&content);
        if content.trim().is_empty() {
            return Ok(());
        }

        let fence = self.options.fenced_code.fence();
        let body = match fence {
            Some(fence) => {
                let language = language_of(node.node, code);
                format!("{fence}{language}\n{content}\n{fence}")
            }
            None => content.to_string(),
        };

        // a carried CriticMarkup opener gets its own line above the code
        let opener = std::mem::take(&mut self.carry);
        if !opener.is_empty() {
            self.run.push(opener);
            self.flush(if fence.is_some() {
                Separator::Line
            } else {
                Separator::Blank
            });
        }

        self.within(
            Marker::Preformatted {
                indented: fence.is_none(),
            },
            |s| {
                s.run.push(body);
                s.flush_raw(Separator::Blank);
                Ok(())
            },
        )?;
        self.code_written = true;
        Ok(())
    }

    pub(crate) fn horizontal_rule(&mut self) {
        if self.in_footnotes {
            return;
        }
        self.break_block(Separator::Blank);
        self.run.push("-----");
        self.flush(Separator::Blank);
    }
}

/// Nested blocks after which the item needs no blank line
fn is_compact(block: &Node) -> bool {
    match block.tag_name() {
        "ul" | "ol" => block.element_children().filter(|c| c.tag_name() == "li").count() < 2,
        "p" => !block.text_content().trim().contains('\n') && !has_descendant(block, "br"),
        _ => false,
    }
}

fn has_descendant(node: &Node, tag: &str) -> bool {
    node.element_children()
        .any(|child| child.tag_name() == tag || has_descendant(child, tag))
}

fn sole_code_child(pre: &Node) -> Option<&Node> {
    let mut elements = pre.element_children();
    match (elements.next(), elements.next()) {
        (Some(only), None) if only.tag_name() == "code" => Some(only),
        _ => None,
    }
}

/// First class token of the `pre`, else of its `code`, without a
/// `language-` or `lang-` prefix
fn language_of(pre: &Node, code: Option<&Node>) -> String {
    let token = pre
        .classes()
        .next()
        .or_else(|| code.and_then(|c| c.classes().next()))
        .unwrap_or("");
    token
        .strip_prefix("language-")
        .or_else(|| token.strip_prefix("lang-"))
        .unwrap_or(token)
        .to_string()
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use crate::html::parse_html;
    use crate::options::{CodeBlockStyle, Options};

    fn md(html: &str) -> String {
        crate::convert(&parse_html(html), &Options::default()).unwrap()
    }

    fn md_with(html: &str, options: Options) -> String {
        crate::convert(&parse_html(html), &options).unwrap()
    }

    #[test]
    fn test_headings_are_atx() {
        assert_eq!(md("<h1>Title</h1><h3>Sub</h3>"), "# Title\n\n### Sub");
    }

    #[test]
    fn test_empty_heading_is_dropped() {
        assert_eq!(md("<p>a</p><h2> </h2><p>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_paragraphs_and_divs_separate() {
        assert_eq!(md("<p>one</p><div>two</div><div>three</div>"), "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_center_becomes_a_paragraph() {
        assert_eq!(md("<center>Title</center><p>b</p>"), "Title\n\nb");

        let options = Options {
            emit_attributes: true,
            ..Default::default()
        };
        assert_eq!(
            md_with("<center>Title</center>", options),
            "Title {{p:style='text-align:center;'}}"
        );
    }

    #[test]
    fn test_nested_blockquote() {
        assert_eq!(
            md("<blockquote><p>a</p><blockquote><p>b</p></blockquote></blockquote><p>c</p>"),
            "> a\n>\n> > b\n\nc"
        );
    }

    #[test]
    fn test_ordered_list_numbers_items() {
        assert_eq!(
            md("<ol><li>first</li><li>second</li><li>third</li></ol>"),
            "1.  first\n2.  second\n3.  third"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(md(r#"<ol start="9"><li>a</li><li>b</li></ol>"#), "9.  a\n10. b");
    }

    #[test]
    fn test_ordered_list_huge_start_is_clamped() {
        assert_eq!(
            md(r#"<ol start="4294967295"><li>a</li><li>b</li></ol>"#),
            "999999999. a\n1000000000. b"
        );
        assert_eq!(md(r#"<ol start="-3"><li>a</li></ol>"#), "1.  a");
    }

    #[test]
    fn test_item_with_paragraphs_continues() {
        assert_eq!(
            md("<ul><li><p>para one</p><p>para two</p></li></ul>"),
            "*   para one\n\n    para two"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            md("<ul><li>A<ul><li>B</li></ul></li><li>C</li></ul><p>after</p>"),
            "*   A\n\n    *   B\n*   C\n\nafter"
        );
    }

    #[test]
    fn test_list_inside_blockquote() {
        assert_eq!(md("<blockquote><ul><li>x</li><li>y</li></ul></blockquote>"), "> *   x\n> *   y");
    }

    #[test]
    fn test_definition_list() {
        assert_eq!(
            md("<dl><dt>Term</dt><dd>One</dd><dd>Two</dd><dt>Other</dt><dd>Three</dd></dl>"),
            "Term\n:   One\n:   Two\n\nOther\n:   Three"
        );
    }

    #[test]
    fn test_definition_list_disabled_keeps_html() {
        let options = Options {
            definition_lists: false,
            ..Default::default()
        };
        assert_eq!(
            md_with("<dl><dt>T</dt><dd>D</dd></dl>", options),
            "<dl><dt>T</dt><dd>D</dd></dl>"
        );
    }

    #[test]
    fn test_indented_code() {
        assert_eq!(
            md("<p>x</p><pre><code>let a = 1;\n  a + 1\n</code></pre>"),
            "x\n\n    let a = 1;\n      a + 1"
        );
    }

    #[test]
    fn test_fenced_code_with_language() {
        let options = Options {
            fenced_code: CodeBlockStyle::FencedLabeled,
            ..Default::default()
        };
        assert_eq!(
            md_with(r#"<pre class="python"><code>print(1)</code></pre>"#, options),
            "```python\nprint(1)\n```"
        );
    }

    #[test]
    fn test_tilde_fence_reads_code_class() {
        let options = Options {
            fenced_code: CodeBlockStyle::FencedTilde,
            ..Default::default()
        };
        assert_eq!(
            md_with(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#, options),
            "~~~rust\nfn main() {}\n~~~"
        );
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(md("<p>a</p><hr><p>b</p>"), "a\n\n-----\n\nb");
    }
}
