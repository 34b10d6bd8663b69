//! Block context stack.
//!
//! Each block handler that nests content pushes one [`Marker`]. Replaying the
//! stack bottom to top gives the prefix of the next flushed line and the
//! indentation of every line after it.

/// One level of block nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Blockquote,
    /// List item whose marker line has not been written yet
    OrderedListOpen { number: u32 },
    /// List item past its marker line
    OrderedListContinuation { number: u32 },
    UnorderedListOpen,
    UnorderedListContinuation,
    Preformatted { indented: bool },
    /// Definition whose `:` line has not been written yet
    DefinitionDescription,
    DefinitionContinuation,
}

const BULLET: &str = "*   ";
const DEFINITION: &str = ":   ";
const CODE_INDENT: &str = "    ";

fn ordered_marker(number: u32) -> String {
    let mut marker = format!("{number}.");
    let pad = 4usize.saturating_sub(marker.len()).max(1);
    marker.push_str(&" ".repeat(pad));
    marker
}

impl Marker {
    /// Text this marker contributes to the first line of a flush
    fn first_line(self) -> String {
        match self {
            Marker::Blockquote => "> ".to_string(),
            Marker::OrderedListOpen { number } => ordered_marker(number),
            Marker::UnorderedListOpen => BULLET.to_string(),
            Marker::DefinitionDescription => DEFINITION.to_string(),
            other => other.continuation(),
        }
    }

    /// Text this marker contributes to every following line
    fn continuation(self) -> String {
        match self {
            Marker::Blockquote => "> ".to_string(),
            Marker::OrderedListOpen { number } | Marker::OrderedListContinuation { number } => {
                " ".repeat(ordered_marker(number).len())
            }
            Marker::UnorderedListOpen | Marker::UnorderedListContinuation => {
                " ".repeat(BULLET.len())
            }
            Marker::Preformatted { indented: true } => CODE_INDENT.to_string(),
            Marker::Preformatted { indented: false } => String::new(),
            Marker::DefinitionDescription | Marker::DefinitionContinuation => {
                " ".repeat(DEFINITION.len())
            }
        }
    }

    /// The state after this marker's first line has been written
    pub fn settled(self) -> Self {
        match self {
            Marker::OrderedListOpen { number } => Marker::OrderedListContinuation { number },
            Marker::UnorderedListOpen => Marker::UnorderedListContinuation,
            Marker::DefinitionDescription => Marker::DefinitionContinuation,
            other => other,
        }
    }

    /// The state for the next sibling list item
    pub fn rearmed(self) -> Self {
        match self {
            Marker::OrderedListContinuation { number } => {
                Marker::OrderedListOpen {
                    number: number.saturating_add(1),
                }
            }
            Marker::UnorderedListContinuation => Marker::UnorderedListOpen,
            other => other,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            Marker::OrderedListOpen { .. }
                | Marker::OrderedListContinuation { .. }
                | Marker::UnorderedListOpen
                | Marker::UnorderedListContinuation
        )
    }
}

/// Stack of active block contexts
#[derive(Debug, Default)]
pub struct ContextStack {
    markers: Vec<Marker>,
}

impl ContextStack {
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn pop(&mut self) -> Option<Marker> {
        self.markers.pop()
    }

    pub fn depth(&self) -> usize {
        self.markers.len()
    }

    pub fn top(&self) -> Option<Marker> {
        self.markers.last().copied()
    }

    /// Replace the top marker with `f(top)`
    pub fn update_top(&mut self, f: impl FnOnce(Marker) -> Marker) {
        if let Some(top) = self.markers.last_mut() {
            *top = f(*top);
        }
    }

    /// Prefix for the first line of the next flush
    pub fn line_prefix(&self) -> String {
        self.markers.iter().map(|m| m.first_line()).collect()
    }

    /// Indentation for lines after the first
    pub fn continuation(&self) -> String {
        self.markers.iter().map(|m| m.continuation()).collect()
    }

    /// Prefix of a blank line inside the current context
    pub fn blank_line(&self) -> String {
        self.continuation().trim_end().to_string()
    }

    /// Move every open marker past its first line
    pub fn settle(&mut self) {
        for marker in &mut self.markers {
            *marker = marker.settled();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_marker_width() {
        assert_eq!(ordered_marker(1), "1.  ");
        assert_eq!(ordered_marker(10), "10. ");
        assert_eq!(ordered_marker(100), "100. ");
    }

    #[test]
    fn test_prefixes_follow_nesting() {
        let mut stack = ContextStack::default();
        stack.push(Marker::Blockquote);
        stack.push(Marker::UnorderedListOpen);
        assert_eq!(stack.line_prefix(), "> *   ");
        assert_eq!(stack.continuation(), ">     ");
        assert_eq!(stack.blank_line(), ">");

        stack.settle();
        assert_eq!(stack.line_prefix(), ">     ");
        assert_eq!(stack.top(), Some(Marker::UnorderedListContinuation));
    }

    #[test]
    fn test_rearm_advances_ordered_number() {
        let mut stack = ContextStack::default();
        stack.push(Marker::OrderedListOpen { number: 1 });
        stack.settle();
        stack.update_top(Marker::rearmed);
        assert_eq!(stack.line_prefix(), "2.  ");

        // an open marker is left alone
        stack.update_top(Marker::rearmed);
        assert_eq!(stack.top(), Some(Marker::OrderedListOpen { number: 2 }));
    }

    #[test]
    fn test_rearm_saturates() {
        let last = Marker::OrderedListContinuation { number: u32::MAX };
        assert_eq!(last.rearmed(), Marker::OrderedListOpen { number: u32::MAX });
    }

    #[test]
    fn test_definition_and_code() {
        let mut stack = ContextStack::default();
        stack.push(Marker::DefinitionDescription);
        stack.push(Marker::Preformatted { indented: true });
        assert_eq!(stack.line_prefix(), ":       ");
        assert_eq!(stack.continuation(), "        ");
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Some(Marker::Preformatted { indented: true }));
        assert_eq!(stack.depth(), 1);
    }
}
