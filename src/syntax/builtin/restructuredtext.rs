//! reStructuredText mode definition

use crate::syntax::mode::{Chevrons, InlineStyle, MarkupMode, ModeDefinition};
use crate::syntax::roles::StyleRole;
use crate::syntax::rules::Rule;

/// Create the reStructuredText mode definition
pub fn restructuredtext_mode() -> ModeDefinition {
    let mut mode = ModeDefinition::new(MarkupMode::RestructuredText);

    // Inline rules, later rules overwrite earlier ones

    mode.add_inline(Rule::build("italic", r"\*[^*\n]*?\*").role(StyleRole::Italic));
    mode.add_inline(Rule::build("bold", r"\*\*[^*\n]*?\*\*").role(StyleRole::Bold));
    mode.add_inline(Rule::build("mono", r"``[^`\n]+``").role(StyleRole::Mono));

    // * item, - item, 1. item, #. item
    mode.add_inline(
        Rule::build("list", r"(?m)^[ \t]*(?:[*+-]|(?:\w+|#)\.)[ \t]+").role(StyleRole::List),
    );

    // name_ or name__
    mode.add_inline(
        Rule::build("link_reference", r"\b([A-Za-z0-9][\w-]*?)(__?)\b")
            .group(1, StyleRole::LinkName)
            .group(2, StyleRole::Chevron)
            .link(),
    );

    // |substitution|
    mode.add_inline(
        Rule::build("substitution", r"(\|)([^|\n]+)(\|)")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron),
    );

    // `text <url>`_
    mode.add_inline(
        Rule::build("link_inline", r"(`)([^`<\n]*?)([ \t]*<)([^>\n]+)(>`__?)")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .group(4, StyleRole::Link)
            .group(5, StyleRole::Chevron)
            .link(),
    );

    // .. _name: url
    mode.add_inline(
        Rule::build("link_target", r"(?m)^(\.\. _)([^:\n]+)(:)[ \t]*(\S*)")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .group(4, StyleRole::Link)
            .link(),
    );

    // Block rules, first match wins

    // ====
    // Title
    // ====
    mode.add_block(
        Rule::build("h1", r"(?m)^={3,}[ \t]*\r?\n[^\n]*\S[^\n]*\r?\n={3,}[ \t]*$")
            .role(StyleRole::H1),
    );

    // Title
    // =====
    let underlined = [
        ("h2", r"(?m)^[^=\s][^\n]*\r?\n={2,}[ \t]*$", StyleRole::H2),
        ("h3", r"(?m)^[^-\s][^\n]*\r?\n-{2,}[ \t]*$", StyleRole::H3),
        ("h4", r"(?m)^[^*\s][^\n]*\r?\n\*{2,}[ \t]*$", StyleRole::H4),
        ("h5", r"(?m)^[^~\s][^\n]*\r?\n~{2,}[ \t]*$", StyleRole::H5),
        ("h6", r"(?m)^[^\^\s][^\n]*\r?\n\^{2,}[ \t]*$", StyleRole::H6),
    ];
    for (name, pattern, role) in underlined {
        mode.add_block(Rule::build(name, pattern).role(role));
    }

    // paragraph::
    //
    //     literal block
    mode.add_block(
        Rule::build(
            "literal",
            r"(::)[ \t]*\r?\n(?:[ \t]*\r?\n)+((?:[ \t]+[^\n]*(?:\r?\n|\z))+)",
        )
        .group(1, StyleRole::Fence)
        .group(2, StyleRole::Code),
    );

    mode.set_toggle(InlineStyle::Bold, Chevrons::symmetric("**"));
    mode.set_toggle(InlineStyle::Italic, Chevrons::symmetric("*"));
    mode.set_header_marker('=');

    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<'a>(mode: &'a ModeDefinition, name: &str) -> &'a Rule {
        mode.inline_rules
            .iter()
            .chain(mode.block_rules.iter())
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("rule {} missing", name))
    }

    #[test]
    fn test_all_rules_compile() {
        let mode = restructuredtext_mode();
        assert_eq!(mode.inline_rules.len(), 8);
        assert_eq!(mode.block_rules.len(), 7);
    }

    #[test]
    fn test_mono() {
        let mode = restructuredtext_mode();
        assert_eq!(rule(&mode, "mono").find("use ``code`` here")[0].text, "``code``");
    }

    #[test]
    fn test_overline_heading() {
        let mode = restructuredtext_mode();
        let text = "=====\nTitle\n=====\n";
        let m = &rule(&mode, "h1").find(text)[0];
        assert_eq!(m.text, "=====\nTitle\n=====");
    }

    #[test]
    fn test_underline_headings() {
        let mode = restructuredtext_mode();
        assert_eq!(rule(&mode, "h3").find("Section one\n-----------")[0].start, 0);
        assert_eq!(rule(&mode, "h4").find("Sub\n****")[0].text, "Sub\n****");
    }

    #[test]
    fn test_links() {
        let mode = restructuredtext_mode();
        let m = &rule(&mode, "link_inline").find("see `Python <http://python.org>`_ now")[0];
        assert_eq!(m.group(2).unwrap().text, "Python");
        assert_eq!(m.group(4).unwrap().text, "http://python.org");

        let m = &rule(&mode, "link_reference").find("read docs_ first")[0];
        assert_eq!(m.group(1).unwrap().text, "docs");
        assert!(rule(&mode, "link_reference").find("snake_case word").is_empty());

        let m = &rule(&mode, "link_target").find(".. _docs: https://docs.org")[0];
        assert_eq!(m.group(2).unwrap().text, "docs");
        assert_eq!(m.group(4).unwrap().text, "https://docs.org");
    }

    #[test]
    fn test_literal_block() {
        let mode = restructuredtext_mode();
        let text = "Example::\n\n    code line\n    more\n\nafter";
        let m = &rule(&mode, "literal").find(text)[0];
        assert_eq!(m.group(1).unwrap().text, "::");
        assert_eq!(m.group(2).unwrap().text, "    code line\n    more\n");
    }

    #[test]
    fn test_unsupported_toggles() {
        let mode = restructuredtext_mode();
        assert_eq!(mode.toggle(InlineStyle::Bold), Some(Chevrons::symmetric("**")));
        assert_eq!(mode.toggle(InlineStyle::Underline), None);
        assert_eq!(mode.toggle(InlineStyle::Strikethrough), None);
        assert_eq!(mode.toggle(InlineStyle::Mono), None);
        assert_eq!(mode.code_block(), None);
    }
}
