//! Element tables and small text helpers shared by the handlers.

use indexmap::IndexMap;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Wrappers that add nothing themselves; their children are converted
pub const TRANSPARENT_ELEMENTS: &[&str] = &[
    "html", "body", "main", "article", "section", "header", "footer", "aside",
    "div", "span", "figure", "figcaption", "font", "hgroup",
    "address", "small", "big", "time", "label", "abbr", "cite",
];

/// Elements dropped together with everything inside them
pub const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "title", "meta", "link", "nav", "menu", "script", "style",
    "noscript", "template", "iframe", "form", "button", "input", "select",
    "textarea", "svg", "canvas", "object", "embed",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

pub fn is_transparent(tag: &str) -> bool {
    TRANSPARENT_ELEMENTS.contains(&tag)
}

pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_ELEMENTS.contains(&tag)
}

/// Collapse whitespace in text.
///
/// A run of whitespace becomes one space, or one line break when the run
/// contains a line break.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut run: Option<char> = None;

    for c in s.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            run = match (run, c) {
                (Some('\n'), _) | (_, '\n') => Some('\n'),
                _ => Some(' '),
            };
        } else {
            if let Some(ws) = run.take() {
                result.push(ws);
            }
            result.push(c);
        }
    }
    if let Some(ws) = run {
        result.push(ws);
    }

    result
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Serialize attributes as `#id`, bare class tokens and `key=value` pairs,
/// joined by spaces. Values holding a space, `:`, `-` or `;` are quoted with
/// `'`.
pub fn attribute_list(attrs: &IndexMap<String, String>) -> String {
    let mut parts = Vec::new();
    if let Some(id) = attrs.get("id") {
        parts.push(format!("#{id}"));
    }
    if let Some(class) = attrs.get("class") {
        parts.extend(class.split_whitespace().map(str::to_string));
    }
    for (key, value) in attrs {
        if key == "id" || key == "class" {
            continue;
        }
        if value.contains([' ', ':', '-', ';']) {
            parts.push(format!("{key}='{value}'"));
        } else {
            parts.push(format!("{key}={value}"));
        }
    }
    parts.join(" ")
}

/// The backtick run that safely wraps `code` as an inline span
pub fn code_fence_for(code: &str) -> String {
    let longest = code
        .chars()
        .fold((0usize, 0usize), |(max, current), c| {
            if c == '`' {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0;
    "`".repeat(longest + 1)
}
