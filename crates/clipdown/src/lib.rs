//! # clipdown
//!
//! Convert HTML document trees to Markdown, with optional extensions for
//! footnotes, definition lists, CriticMarkup and attribute annotations.
//!
//! ## Design
//!
//! The converter walks a [`Node`] tree in document order. Inline content
//! collects in a run buffer; block elements flush it into the output, prefixed
//! by the active stack of quote, list, definition and code contexts. All state
//! belongs to one call, so a [`Converter`] can be shared freely.
//!
//! Any HTML parser can build the tree. With the default `html` feature,
//! [`parse_html`] does it with `scraper`.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use clipdown::{convert, Node, Options};
//!
//! let list = Node::element("ol")
//!     .with_child(Node::element("li").with_text("first"))
//!     .with_child(Node::element("li").with_text("second"));
//!
//! let markdown = convert(&list, &Options::default()).unwrap();
//! assert_eq!(markdown, "1.  first\n2.  second");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use clipdown::{CodeBlockStyle, Converter, Options};
//!
//! let converter = Converter::with_options(Options {
//!     fenced_code: CodeBlockStyle::FencedLabeled,
//!     ..Options::default()
//! });
//! let markdown = converter
//!     .convert_html(r#"<pre class="python"><code>print(1)</code></pre>"#)
//!     .unwrap();
//! assert_eq!(markdown, "```python\nprint(1)\n```");
//! ```

mod convert;
mod entities;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod options;
mod rules;
mod service;
mod utilities;

pub use convert::convert;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeRef, NodeType};
pub use options::{CodeBlockStyle, Options};
pub use service::Converter;

/// Error type for conversions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Nesting deeper than {limit} elements")]
    NestingTooDeep { limit: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
