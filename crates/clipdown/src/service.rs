//! Converter - reusable entry point holding the options.

use crate::node::Node;
use crate::options::Options;
use crate::Result;

/// Converts trees (or HTML strings) to Markdown with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: Options,
}

impl Converter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Convert a tree to Markdown
    pub fn convert(&self, node: &Node) -> Result<String> {
        crate::convert(node, &self.options)
    }

    /// Parse an HTML document and convert it to Markdown
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let document = crate::html::parse_html(html);
        self.convert(&document)
    }
}
