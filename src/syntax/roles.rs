//! Style roles for markup highlighting
//!
//! A role names what a piece of markup *is* (a heading, a link target, a
//! chevron). Themes map roles to colors; the role itself carries the font
//! attributes that make sense regardless of theme.

use super::style::{Color, Format};

/// Semantic roles assigned by rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleRole {
    /// Admonition labels (TODO:, WARNING:)
    Admonition,
    /// Document attributes ({name}, :name:)
    Attribute,
    /// Block quotes (> text)
    Blockquote,
    /// Strong emphasis
    Bold,
    /// Markup punctuation around links and other structured constructs
    Chevron,
    /// Code regions (fenced or delimited)
    Code,
    /// Comments
    Comment,
    /// Code fence delimiters
    Fence,
    /// Math formulas
    Formula,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    /// Emphasis
    Italic,
    /// Mode keywords (NOTE::)
    Keyword,
    /// Code fence language tag
    Language,
    /// Link targets and URLs
    Link,
    /// Link text
    LinkName,
    /// List item markers
    List,
    /// Inline code spans
    Mono,
    /// Block options (.Title)
    Option,
    Strikethrough,
    Underline,
}

impl StyleRole {
    /// All roles, in declaration order
    pub const ALL: [StyleRole; 25] = [
        StyleRole::Admonition,
        StyleRole::Attribute,
        StyleRole::Blockquote,
        StyleRole::Bold,
        StyleRole::Chevron,
        StyleRole::Code,
        StyleRole::Comment,
        StyleRole::Fence,
        StyleRole::Formula,
        StyleRole::H1,
        StyleRole::H2,
        StyleRole::H3,
        StyleRole::H4,
        StyleRole::H5,
        StyleRole::H6,
        StyleRole::Italic,
        StyleRole::Keyword,
        StyleRole::Language,
        StyleRole::Link,
        StyleRole::LinkName,
        StyleRole::List,
        StyleRole::Mono,
        StyleRole::Option,
        StyleRole::Strikethrough,
        StyleRole::Underline,
    ];

    /// Get the configuration name for this role
    pub fn name(&self) -> &'static str {
        match self {
            StyleRole::Admonition => "admonition",
            StyleRole::Attribute => "attribute",
            StyleRole::Blockquote => "blockquote",
            StyleRole::Bold => "bold",
            StyleRole::Chevron => "chevron",
            StyleRole::Code => "code",
            StyleRole::Comment => "comment",
            StyleRole::Fence => "fence",
            StyleRole::Formula => "formula",
            StyleRole::H1 => "h1",
            StyleRole::H2 => "h2",
            StyleRole::H3 => "h3",
            StyleRole::H4 => "h4",
            StyleRole::H5 => "h5",
            StyleRole::H6 => "h6",
            StyleRole::Italic => "italic",
            StyleRole::Keyword => "keyword",
            StyleRole::Language => "language",
            StyleRole::Link => "link",
            StyleRole::LinkName => "linkName",
            StyleRole::List => "list",
            StyleRole::Mono => "mono",
            StyleRole::Option => "option",
            StyleRole::Strikethrough => "strikethrough",
            StyleRole::Underline => "underline",
        }
    }

    /// Parse a role from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        StyleRole::ALL.iter().copied().find(|role| role.name() == name)
    }

    /// Heading role for a level 1-6
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(StyleRole::H1),
            2 => Some(StyleRole::H2),
            3 => Some(StyleRole::H3),
            4 => Some(StyleRole::H4),
            5 => Some(StyleRole::H5),
            6 => Some(StyleRole::H6),
            _ => None,
        }
    }

    /// Font attributes intrinsic to the role, in the given colors
    pub fn font(&self, color: Color, background: Color) -> Format {
        let mut format = Format::plain(color, background);
        match self {
            StyleRole::Bold
            | StyleRole::H1
            | StyleRole::H2
            | StyleRole::H3
            | StyleRole::H4
            | StyleRole::H5
            | StyleRole::H6
            | StyleRole::Admonition => format.bold = true,
            StyleRole::Italic | StyleRole::Comment | StyleRole::Blockquote => format.italic = true,
            StyleRole::Underline | StyleRole::Link => format.underline = true,
            StyleRole::Strikethrough => format.strike = true,
            StyleRole::Code => format.block = true,
            _ => {}
        }
        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for role in StyleRole::ALL {
            assert_eq!(StyleRole::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(StyleRole::from_name("linkname"), None);
        assert_eq!(StyleRole::from_name(""), None);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(StyleRole::heading(1), Some(StyleRole::H1));
        assert_eq!(StyleRole::heading(6), Some(StyleRole::H6));
        assert_eq!(StyleRole::heading(0), None);
        assert_eq!(StyleRole::heading(7), None);
    }

    #[test]
    fn test_font_attributes() {
        assert!(StyleRole::Bold.font(Color::BLACK, Color::WHITE).bold);
        assert!(StyleRole::H3.font(Color::BLACK, Color::WHITE).bold);
        assert!(StyleRole::Italic.font(Color::BLACK, Color::WHITE).italic);
        assert!(StyleRole::Code.font(Color::BLACK, Color::WHITE).block);
        assert_eq!(
            StyleRole::Chevron.font(Color::BLACK, Color::WHITE),
            Format::plain(Color::BLACK, Color::WHITE)
        );
    }
}
