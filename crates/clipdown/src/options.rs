//! Configuration options for a conversion

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Indented code blocks (4 spaces), no fence lines
    #[default]
    Indented,
    /// Fenced with ```` ``` ````, followed by the language label when known
    FencedLabeled,
    /// Fenced with `~~~`, followed by the language label when known
    FencedTilde,
}

impl CodeBlockStyle {
    /// Fence line for the fenced styles
    pub fn fence(self) -> Option<&'static str> {
        match self {
            CodeBlockStyle::Indented => None,
            CodeBlockStyle::FencedLabeled => Some("```"),
            CodeBlockStyle::FencedTilde => Some("~~~"),
        }
    }
}

impl FromStr for CodeBlockStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indented" => Ok(CodeBlockStyle::Indented),
            "fenced" | "fenced-labeled" | "backtick" => Ok(CodeBlockStyle::FencedLabeled),
            "tilde" | "fenced-tilde" => Ok(CodeBlockStyle::FencedTilde),
            other => Err(Error::InvalidInput(format!("unknown code block style `{other}`"))),
        }
    }
}

impl fmt::Display for CodeBlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodeBlockStyle::Indented => "indented",
            CodeBlockStyle::FencedLabeled => "fenced",
            CodeBlockStyle::FencedTilde => "tilde",
        })
    }
}

/// Options for one conversion. Fixed for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Render leftover element attributes as inline annotations
    pub emit_attributes: bool,

    /// Extract footnote blocks and references
    pub footnotes: bool,

    /// Code block style
    pub fenced_code: CodeBlockStyle,

    /// Render `ins`/`del`/`u`/`mark` and comments as CriticMarkup
    pub critic_markup: bool,

    /// Render `dl`/`dt`/`dd` as definition lists
    pub definition_lists: bool,

    /// Deepest element nesting accepted before the conversion is aborted
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            emit_attributes: false,
            footnotes: true,
            fenced_code: CodeBlockStyle::Indented,
            critic_markup: false,
            definition_lists: true,
            max_depth: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_style_from_str() {
        assert_eq!("indented".parse::<CodeBlockStyle>().unwrap(), CodeBlockStyle::Indented);
        assert_eq!("Fenced".parse::<CodeBlockStyle>().unwrap(), CodeBlockStyle::FencedLabeled);
        assert_eq!("fenced-tilde".parse::<CodeBlockStyle>().unwrap(), CodeBlockStyle::FencedTilde);
        assert!("wavy".parse::<CodeBlockStyle>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for style in [
            CodeBlockStyle::Indented,
            CodeBlockStyle::FencedLabeled,
            CodeBlockStyle::FencedTilde,
        ] {
            assert_eq!(style.to_string().parse::<CodeBlockStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.footnotes);
        assert!(options.definition_lists);
        assert!(!options.critic_markup);
        assert!(!options.emit_attributes);
        assert_eq!(options.fenced_code.fence(), None);
    }
}
