//! Message decoration.

use std::fmt;

/// Chick glyph used on both ends of a decorated message.
pub const CHICK: &str = "🐣";
/// Bunny glyph used on both ends of a decorated message.
pub const BUNNY: &str = "🐰";

/// Token placed before the message ("🐣🐰").
pub const PREFIX: &str = "🐣🐰";
/// Token placed after the message ("🐰🐣").
pub const SUFFIX: &str = "🐰🐣";

/// Where a message being copied came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// Typed into the input field.
    Typed,
    /// Picked from the sample list.
    Sample,
}

impl MessageSource {
    /// Clipboard label attached to a write from this source.
    pub fn label(self) -> &'static str {
        match self {
            MessageSource::Typed => "EasterMessage",
            MessageSource::Sample => "CopiedMessage",
        }
    }
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSource::Typed => write!(f, "typed"),
            MessageSource::Sample => write!(f, "sample"),
        }
    }
}

/// Wrap a message with the Easter tokens.
///
/// The output always ends with a single trailing space, and an empty message
/// leaves two spaces between the tokens. Both are kept so that copied text
/// matches what users already paste elsewhere.
pub fn decorate(message: &str) -> String {
    format!("{PREFIX} {message} {SUFFIX} ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_wraps_with_tokens() {
        assert_eq!(decorate("Happy Easter!"), "🐣🐰 Happy Easter! 🐰🐣 ");
    }

    #[test]
    fn test_decorate_empty_keeps_double_space() {
        assert_eq!(decorate(""), "🐣🐰  🐰🐣 ");
    }

    #[test]
    fn test_decorate_matches_concatenation() {
        for s in ["a", " padded ", "多语言", "🐣", "line\nbreak"] {
            let expected = String::from("🐣🐰 ") + s + " 🐰🐣 ";
            assert_eq!(decorate(s), expected);
        }
    }

    #[test]
    fn test_decorate_is_deterministic() {
        let first = decorate("He is risen");
        let second = decorate("He is risen");
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_tokens_are_built_from_glyphs() {
        assert_eq!(PREFIX, format!("{CHICK}{BUNNY}"));
        assert_eq!(SUFFIX, format!("{BUNNY}{CHICK}"));
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(MessageSource::Typed.label(), "EasterMessage");
        assert_eq!(MessageSource::Sample.label(), "CopiedMessage");
    }
}
