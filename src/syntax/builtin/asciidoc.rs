//! AsciiDoc mode definition

use crate::syntax::mode::{Chevrons, InlineStyle, MarkupMode, ModeDefinition};
use crate::syntax::roles::StyleRole;
use crate::syntax::rules::Rule;

/// Create the AsciiDoc mode definition
pub fn asciidoc_mode() -> ModeDefinition {
    let mut mode = ModeDefinition::new(MarkupMode::Asciidoc);

    // Inline rules, later rules overwrite earlier ones

    // [text]
    mode.add_inline(
        Rule::build("link_text", r"(\[)([^\]\n]*)(\])")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .not_followed_by(&['[', '(', '#'])
            .link(),
    );

    // // comment
    mode.add_inline(Rule::build("comment", r"(?m)^[ \t]*//[^\n]*").role(StyleRole::Comment));

    // {attribute} or :attribute: value
    mode.add_inline(
        Rule::build("attribute", r"(?m)\{[^}\n]*\}|^:[^:\n]+:").role(StyleRole::Attribute),
    );

    // .Block title
    mode.add_inline(Rule::build("option", r"(?m)^[ \t]*\.[^\s.][^\n]*").role(StyleRole::Option));

    // NOTE:: or include::
    mode.add_inline(Rule::build("keyword", r"\w+::").role(StyleRole::Keyword));

    mode.add_inline(Rule::build("bold", r"\*[^*\n]*?\*").role(StyleRole::Bold));
    mode.add_inline(Rule::build("italic", r"_[^_\n]*?_").role(StyleRole::Italic));
    mode.add_inline(Rule::build("mono", r"\+[^+\n]*?\+|`[^`\n]*?`").role(StyleRole::Mono));
    mode.add_inline(
        Rule::build("underline", r"\[underline\]#[^#\n]*?#").role(StyleRole::Underline),
    );
    mode.add_inline(
        Rule::build("strikethrough", r"\[line-through\]#[^#\n]*?#")
            .role(StyleRole::Strikethrough),
    );

    // * item, - item, . item, 1. item
    mode.add_inline(
        Rule::build("list", r"(?m)^[ \t]*(?:[*+.-]+|\w+\.)[ \t]+").role(StyleRole::List),
    );

    // = Title .. ====== Title
    for level in 1..=6u8 {
        if let Some(role) = StyleRole::heading(level) {
            let pattern = format!(r"(?m)^={{{level}}}[ \t]+.*");
            mode.add_inline(Rule::build(role.name(), &pattern).role(role));
        }
    }

    // http://host/path[text]
    mode.add_inline(
        Rule::build("url", r#"((?:https?|ftp)://[^\s\[\]<>"]+)(?:(\[)([^\]\n]*)(\]))?"#)
            .group(1, StyleRole::Link)
            .group(2, StyleRole::Chevron)
            .group(3, StyleRole::LinkName)
            .group(4, StyleRole::Chevron)
            .link(),
    );

    mode.add_inline(
        Rule::build("email", r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").role(StyleRole::Link),
    );

    // NOTE: TIP: ...
    mode.add_inline(
        Rule::build(
            "admonition",
            r"(?m)^([ \t]*)(TODO|FIXME|IMPORTANT|WARNING|TIP|NOTE|CAUTION)(:)",
        )
        .group(2, StyleRole::Admonition)
        .group(3, StyleRole::Admonition),
    );

    // Block rules, first match wins

    // ////
    // comment
    // ////
    mode.add_block(
        Rule::build("comment_block", r"(?m)^[ \t]*/{4,}[ \t]*\r?\n[\s\S]*?^[ \t]*/{4,}[ \t]*$")
            .role(StyleRole::Comment),
    );

    // [source,lang]
    // ----
    // code
    // ----
    mode.add_block(
        Rule::build(
            "code_section",
            r"(?m)^(\[[^\]\n]*\])\r?\n(-{4,})[ \t]*\r?\n[\s\S]*?^[ \t]*(-{4,})[ \t]*$",
        )
        .role(StyleRole::Code)
        .group(1, StyleRole::Language)
        .group(2, StyleRole::Fence)
        .group(3, StyleRole::Fence),
    );

    // ----
    // code
    // ----
    // The opening delimiter must start the document or follow a blank line,
    // otherwise it is a heading underline.
    mode.add_block(
        Rule::build(
            "code",
            r"(?m)(?:\A|^[ \t]*\r?\n)[ \t]*(-{4,})[ \t]*\r?\n[\s\S]*?^[ \t]*(-{4,})[ \t]*$",
        )
        .role(StyleRole::Code)
        .group(1, StyleRole::Fence)
        .group(2, StyleRole::Fence),
    );

    // Title
    // =====
    let underlined = [
        ("h1_block", r"(?m)^[^=\s][^\n]*\r?\n={2,}[ \t]*$", StyleRole::H1),
        ("h2_block", r"(?m)^[^-\s][^\n]*\r?\n-{2,}[ \t]*$", StyleRole::H2),
        ("h3_block", r"(?m)^[^~\s][^\n]*\r?\n~{2,}[ \t]*$", StyleRole::H3),
        ("h4_block", r"(?m)^[^\^\s][^\n]*\r?\n\^{2,}[ \t]*$", StyleRole::H4),
        ("h5_block", r"(?m)^[^+\s][^\n]*\r?\n\+{2,}[ \t]*$", StyleRole::H5),
        ("h6_block", r"(?m)^[^#\s][^\n]*\r?\n#{2,}[ \t]*$", StyleRole::H6),
    ];
    for (name, pattern, role) in underlined {
        mode.add_block(Rule::build(name, pattern).role(role));
    }

    mode.set_toggle(InlineStyle::Bold, Chevrons::symmetric("*"));
    mode.set_toggle(InlineStyle::Italic, Chevrons::symmetric("_"));
    mode.set_toggle(InlineStyle::Mono, Chevrons::symmetric("+"));
    mode.set_toggle(InlineStyle::Underline, Chevrons::pair("[underline]#", "#"));
    mode.set_toggle(InlineStyle::Strikethrough, Chevrons::pair("[line-through]#", "#"));
    mode.set_header_marker('=');
    mode.set_code_block(Chevrons::pair("----\n", "\n----"));

    mode
}
