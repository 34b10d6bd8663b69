//! Growing output document.
//!
//! Separators are requested, not written: a request waits until the next
//! block arrives and merges with any request already waiting, so a trailing
//! line break always absorbs a new leading one.

/// Gap written between two blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Separator {
    None,
    Line,
    Blank,
}

#[derive(Debug)]
struct Pending {
    separator: Separator,
    blank_line: String,
}

#[derive(Debug, Default)]
pub struct Output {
    text: String,
    pending: Option<Pending>,
}

impl Output {
    /// Ask for `separator` before the next block. `blank_line` is the prefix a
    /// blank separator line carries in the requesting context.
    pub fn request(&mut self, separator: Separator, blank_line: &str) {
        if separator == Separator::None {
            return;
        }
        match &mut self.pending {
            Some(pending) => {
                pending.separator = pending.separator.max(separator);
                // the outermost requester decides what a blank line looks like
                if blank_line.len() < pending.blank_line.len() {
                    pending.blank_line = blank_line.to_string();
                }
            }
            None => {
                self.pending = Some(Pending {
                    separator,
                    blank_line: blank_line.to_string(),
                });
            }
        }
    }

    /// Downgrade a waiting blank line to a single line break
    pub fn tighten(&mut self) {
        if let Some(pending) = &mut self.pending {
            pending.separator = pending.separator.min(Separator::Line);
        }
    }

    /// Write a block, preceded by the waiting separator
    pub fn write(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        if let Some(pending) = self.pending.take() {
            if !self.text.is_empty() {
                match pending.separator {
                    Separator::None => {}
                    Separator::Line => self.text.push('\n'),
                    Separator::Blank => {
                        self.text.push('\n');
                        self.text.push_str(&pending.blank_line);
                        self.text.push('\n');
                    }
                }
            }
        }
        let chunk = match chunk.strip_prefix('\n') {
            Some(rest) if self.text.ends_with('\n') => rest,
            _ => chunk,
        };
        self.text.push_str(chunk);
    }

    /// Append to the last written line, ignoring any waiting separator
    pub fn splice(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    /// The document with trailing whitespace removed
    pub fn finish(self) -> String {
        let mut text = self.text;
        text.truncate(text.trim_end().len());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_merge_instead_of_stacking() {
        let mut out = Output::default();
        out.write("one");
        out.request(Separator::Blank, "");
        out.request(Separator::Line, "");
        out.request(Separator::Blank, "");
        out.write("two");
        assert_eq!(out.finish(), "one\n\ntwo");
    }

    #[test]
    fn test_leading_separator_is_dropped() {
        let mut out = Output::default();
        out.request(Separator::Blank, "");
        out.write("first");
        out.request(Separator::Blank, "");
        assert_eq!(out.finish(), "first");
    }

    #[test]
    fn test_blank_line_uses_outermost_prefix() {
        let mut out = Output::default();
        out.write("> a");
        out.request(Separator::Blank, ">");
        out.write("> b");
        out.request(Separator::Blank, ">");
        out.request(Separator::Blank, "");
        out.write("c");
        assert_eq!(out.finish(), "> a\n>\n> b\n\nc");
    }

    #[test]
    fn test_tighten_and_splice() {
        let mut out = Output::default();
        out.write("*   a");
        out.request(Separator::Blank, "");
        out.splice("--}");
        out.tighten();
        out.write("*   b");
        assert_eq!(out.finish(), "*   a--}\n*   b");
    }

    #[test]
    fn test_trailing_break_absorbs_leading_one() {
        let mut out = Output::default();
        out.write("line\n");
        out.write("\nnext");
        assert_eq!(out.finish(), "line\nnext");
    }
}
