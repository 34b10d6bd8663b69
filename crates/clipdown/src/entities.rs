//! Entity and smart punctuation normalization.
//!
//! A fixed table maps a handful of numeric entities and their code points to
//! plain ASCII. Replacement is a single pass, so output is never rewritten.

use once_cell::sync::Lazy;
use regex::Regex;

/// (numeric entity, code point, replacement)
const TABLE: &[(&str, char, &str)] = &[
    ("&#160;", '\u{a0}', " "),
    ("&#8203;", '\u{200b}', ""),
    ("&#8211;", '\u{2013}', "-"),
    ("&#8212;", '\u{2014}', "--"),
    ("&#8216;", '\u{2018}', "'"),
    ("&#8217;", '\u{2019}', "'"),
    ("&#8220;", '\u{201c}', "\""),
    ("&#8221;", '\u{201d}', "\""),
    ("&#8226;", '\u{2022}', "*"),
    ("&#8230;", '\u{2026}', "..."),
];

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = TABLE
        .iter()
        .flat_map(|(entity, ch, _)| [regex::escape(entity), regex::escape(&ch.to_string())])
        .collect();
    Regex::new(&alternatives.join("|")).expect("entity table builds a valid pattern")
});

fn replacement(matched: &str) -> &'static str {
    TABLE
        .iter()
        .find(|(entity, ch, _)| *entity == matched || matched.starts_with(*ch))
        .map_or("", |(_, _, ascii)| *ascii)
}

/// Replace every table entry in `text` with its ASCII form
pub fn normalize(text: &str) -> String {
    PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| replacement(&caps[0]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_entities() {
        assert_eq!(normalize("a&#8212;b"), "a--b");
        assert_eq!(normalize("&#8220;quoted&#8221;"), "\"quoted\"");
        assert_eq!(normalize("x&#160;y"), "x y");
    }

    #[test]
    fn test_code_points() {
        assert_eq!(normalize("wait\u{2026}"), "wait...");
        assert_eq!(normalize("it\u{2019}s"), "it's");
        assert_eq!(normalize("1\u{2013}2"), "1-2");
    }

    #[test]
    fn test_each_occurrence_once() {
        assert_eq!(normalize("\u{2014}\u{2014}&#8212;"), "------");
        // an ampersand sequence produced by replacement is not rescanned
        assert_eq!(normalize("&#38;#8212;"), "&#38;#8212;");
    }

    #[test]
    fn test_untouched_text() {
        assert_eq!(normalize("plain ascii -- text"), "plain ascii -- text");
    }
}
