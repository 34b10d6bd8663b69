//! Inline fragments waiting for the next flush.

use indexmap::IndexMap;

use crate::utilities::attribute_list;

/// Ordered inline fragments of the block being built
#[derive(Debug, Default)]
pub struct RunBuffer {
    fragments: Vec<String>,
}

impl RunBuffer {
    pub fn push(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    /// Number of fragments, usable as a mark for [`RunBuffer::truncate`]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn truncate(&mut self, mark: usize) {
        self.fragments.truncate(mark);
    }

    /// Insert `fragment` before the first fragment that is not whitespace
    pub fn insert_before_content(&mut self, fragment: impl Into<String>) {
        let index = self
            .fragments
            .iter()
            .position(|f| !f.trim().is_empty())
            .unwrap_or(self.fragments.len());
        self.fragments.insert(index, fragment.into());
    }

    /// True when nothing but whitespace is buffered
    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.trim().is_empty())
    }

    /// True when the next text should drop its leading whitespace
    pub fn at_line_start(&self) -> bool {
        self.fragments
            .last()
            .and_then(|f| f.chars().last())
            .map_or(true, char::is_whitespace)
    }

    /// Join and clear
    pub fn take(&mut self) -> String {
        let joined = self.fragments.concat();
        self.fragments.clear();
        joined
    }
}

/// Leftover attributes of one element, rendered after its block
#[derive(Debug, Clone)]
pub struct Annotation {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
}

impl Annotation {
    /// `{{tag:#id class key=value}}`
    pub fn render(&self) -> String {
        format!("{{{{{}:{}}}}}", self.tag, attribute_list(&self.attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_joins_and_clears() {
        let mut run = RunBuffer::default();
        run.push("Hello ");
        run.push("");
        run.push("*World*");
        assert_eq!(run.len(), 2);
        assert_eq!(run.take(), "Hello *World*");
        assert_eq!(run.len(), 0);
        assert!(run.is_blank());
    }

    #[test]
    fn test_insert_before_content() {
        let mut run = RunBuffer::default();
        run.push(" ");
        run.push("*x*");
        run.insert_before_content("{--");
        assert_eq!(run.take(), " {--*x*");
    }

    #[test]
    fn test_line_start() {
        let mut run = RunBuffer::default();
        assert!(run.at_line_start());
        run.push("## ");
        assert!(run.at_line_start());
        run.push("Title");
        assert!(!run.at_line_start());
        run.push("  \n");
        assert!(run.at_line_start());
    }

    #[test]
    fn test_annotation_render() {
        let mut attributes = IndexMap::new();
        attributes.insert("id".to_string(), "intro".to_string());
        attributes.insert("class".to_string(), "a b".to_string());
        let annotation = Annotation {
            tag: "p".to_string(),
            attributes,
        };
        assert_eq!(annotation.render(), "{{p:#intro a b}}");
    }
}
