//! Markup mode definitions
//!
//! A [`ModeDefinition`] is the rule table for one dialect: ordered inline
//! and block rules plus the chevrons used to toggle styles on a selection.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use super::rules::{Rule, RuleBuilder};

/// Supported markup dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MarkupMode {
    Asciidoc,
    Markdown,
    RestructuredText,
    #[default]
    Text,
}

impl MarkupMode {
    /// All modes, sorted by name
    pub const ALL: [MarkupMode; 4] = [
        MarkupMode::Asciidoc,
        MarkupMode::Markdown,
        MarkupMode::RestructuredText,
        MarkupMode::Text,
    ];

    /// Get the name of this mode
    pub fn name(&self) -> &'static str {
        match self {
            MarkupMode::Asciidoc => "asciidoc",
            MarkupMode::Markdown => "markdown",
            MarkupMode::RestructuredText => "restructuredtext",
            MarkupMode::Text => "text",
        }
    }

    /// Parse a mode from its name (case-insensitive, common aliases accepted)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "asciidoc" | "adoc" => Some(MarkupMode::Asciidoc),
            "markdown" | "md" => Some(MarkupMode::Markdown),
            "restructuredtext" | "rst" => Some(MarkupMode::RestructuredText),
            "text" | "txt" | "plain" => Some(MarkupMode::Text),
            _ => None,
        }
    }
}

impl fmt::Display for MarkupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inline styles that can be toggled on a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Mono,
}

impl InlineStyle {
    /// Get the name of this style
    pub fn name(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "bold",
            InlineStyle::Italic => "italic",
            InlineStyle::Underline => "underline",
            InlineStyle::Strikethrough => "strikethrough",
            InlineStyle::Mono => "mono",
        }
    }
}

/// Opening and closing markers inserted around text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chevrons {
    pub open: &'static str,
    pub close: &'static str,
}

impl Chevrons {
    /// The same marker on both sides
    pub const fn symmetric(marker: &'static str) -> Self {
        Self { open: marker, close: marker }
    }

    /// Different opening and closing markers
    pub const fn pair(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

/// A complete rule table for one markup dialect
#[derive(Debug)]
pub struct ModeDefinition {
    /// Dialect this table describes
    pub mode: MarkupMode,
    /// Rules run over the scan window, in application order (later wins)
    pub inline_rules: Vec<Rule>,
    /// Rules run over the whole document, in priority order (first wins)
    pub block_rules: Vec<Rule>,
    /// Chevrons for each supported inline toggle
    toggles: HashMap<InlineStyle, Chevrons>,
    /// Character repeated to form a header prefix
    header_marker: Option<char>,
    /// Delimiters for an inserted code block
    code_block: Option<Chevrons>,
}

impl ModeDefinition {
    /// Create a new empty mode definition
    pub fn new(mode: MarkupMode) -> Self {
        Self {
            mode,
            inline_rules: Vec::new(),
            block_rules: Vec::new(),
            toggles: HashMap::new(),
            header_marker: None,
            code_block: None,
        }
    }

    /// Add an inline rule; a rule that fails to compile is logged and skipped
    pub fn add_inline(&mut self, rule: RuleBuilder) {
        if let Some(rule) = self.compile(rule) {
            self.inline_rules.push(rule);
        }
    }

    /// Add a block rule; a rule that fails to compile is logged and skipped
    pub fn add_block(&mut self, rule: RuleBuilder) {
        if let Some(rule) = self.compile(rule) {
            self.block_rules.push(rule);
        }
    }

    fn compile(&self, rule: RuleBuilder) -> Option<Rule> {
        let name = rule.name().to_string();
        match rule.compile() {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(mode = %self.mode, rule = %name, "skipping rule: {}", e);
                None
            }
        }
    }

    /// Declare the chevrons for an inline toggle
    pub fn set_toggle(&mut self, style: InlineStyle, chevrons: Chevrons) {
        self.toggles.insert(style, chevrons);
    }

    /// Chevrons for an inline toggle, `None` when the dialect lacks it
    pub fn toggle(&self, style: InlineStyle) -> Option<Chevrons> {
        self.toggles.get(&style).copied()
    }

    /// Declare the character used for header prefixes
    pub fn set_header_marker(&mut self, marker: char) {
        self.header_marker = Some(marker);
    }

    /// Line prefix for a header level, `None` for level 0, levels above 6,
    /// or dialects without header toggles
    pub fn header_prefix(&self, level: u8) -> Option<String> {
        let marker = self.header_marker?;
        match level {
            1..=6 => Some(std::iter::repeat(marker).take(level as usize).collect()),
            _ => None,
        }
    }

    /// Declare the delimiters for an inserted code block
    pub fn set_code_block(&mut self, chevrons: Chevrons) {
        self.code_block = Some(chevrons);
    }

    /// Delimiters for an inserted code block
    pub fn code_block(&self) -> Option<Chevrons> {
        self.code_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::roles::StyleRole;

    #[test]
    fn test_mode_names() {
        for mode in MarkupMode::ALL {
            assert_eq!(MarkupMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(MarkupMode::from_name("MD"), Some(MarkupMode::Markdown));
        assert_eq!(MarkupMode::from_name("rst"), Some(MarkupMode::RestructuredText));
        assert_eq!(MarkupMode::from_name("richedit"), None);
    }

    #[test]
    fn test_bad_rule_is_skipped() {
        let mut mode = ModeDefinition::new(MarkupMode::Markdown);
        mode.add_inline(Rule::build("broken", r"(\*").role(StyleRole::Bold));
        mode.add_inline(Rule::build("italic", r"\*[^*\n]*?\*").role(StyleRole::Italic));
        assert_eq!(mode.inline_rules.len(), 1);
        assert_eq!(mode.inline_rules[0].name, "italic");
    }

    #[test]
    fn test_header_prefix() {
        let mut mode = ModeDefinition::new(MarkupMode::Markdown);
        assert_eq!(mode.header_prefix(1), None);
        mode.set_header_marker('#');
        assert_eq!(mode.header_prefix(0), None);
        assert_eq!(mode.header_prefix(1).as_deref(), Some("#"));
        assert_eq!(mode.header_prefix(6).as_deref(), Some("######"));
        assert_eq!(mode.header_prefix(7), None);
    }

    #[test]
    fn test_toggles() {
        let mut mode = ModeDefinition::new(MarkupMode::Asciidoc);
        mode.set_toggle(InlineStyle::Underline, Chevrons::pair("[underline]#", "#"));
        assert_eq!(
            mode.toggle(InlineStyle::Underline),
            Some(Chevrons { open: "[underline]#", close: "#" })
        );
        assert_eq!(mode.toggle(InlineStyle::Bold), None);
    }
}
