//! Markdown mode definition

use crate::syntax::mode::{Chevrons, InlineStyle, MarkupMode, ModeDefinition};
use crate::syntax::roles::StyleRole;
use crate::syntax::rules::Rule;

/// Create the Markdown mode definition
pub fn markdown_mode() -> ModeDefinition {
    let mut mode = ModeDefinition::new(MarkupMode::Markdown);

    // Inline rules, later rules overwrite earlier ones

    // > quote
    mode.add_inline(Rule::build("blockquote", r"(?m)^>[ \t].*").role(StyleRole::Blockquote));

    // - item, * item, + item, 1. item
    mode.add_inline(
        Rule::build("list", r"(?m)^[ \t]*(?:[*+-]|\w+\.)[ \t]+").role(StyleRole::List),
    );

    mode.add_inline(Rule::build("italic", r"\*[^*\n]*?\*").role(StyleRole::Italic));
    mode.add_inline(Rule::build("bold", r"\*\*[^*\n]*?\*\*").role(StyleRole::Bold));
    mode.add_inline(Rule::build("strikethrough", r"~[^~\n]+?~").role(StyleRole::Strikethrough));
    mode.add_inline(Rule::build("underline", r"_[^_\n]+?_").role(StyleRole::Underline));

    // # heading .. ###### heading
    for level in 1..=6u8 {
        if let Some(role) = StyleRole::heading(level) {
            let pattern = format!(r"(?m)^{} .*", "#".repeat(level as usize));
            mode.add_inline(Rule::build(role.name(), &pattern).role(role));
        }
    }

    // [text]
    mode.add_inline(
        Rule::build("link_text", r"(\[)([^\]\n]*)(\])")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .not_followed_by(&['[', '('])
            .link(),
    );

    // [text](link) or ![text](link)
    mode.add_inline(
        Rule::build("link_inline", r"(!?\[)([^\[\]\n]*)(\]\()([^)\n]*)(\))")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .group(4, StyleRole::Link)
            .group(5, StyleRole::Chevron)
            .link(),
    );

    // [text][id] or ![text][id]
    mode.add_inline(
        Rule::build("link_reference", r"(!?\[)([^\[\]\n]*)(\]\[)([^\]\n]*)(\])")
            .group(1, StyleRole::Chevron)
            .group(2, StyleRole::LinkName)
            .group(3, StyleRole::Chevron)
            .group(4, StyleRole::Link)
            .group(5, StyleRole::Chevron)
            .link(),
    );

    // [id]: url "title"
    mode.add_inline(
        Rule::build(
            "link_definition",
            r#"(\[)([^\[\]\n]*)(\]:[ \t]+)(\S+)(?:[ \t]+("[^"\n]*"))?"#,
        )
        .group(1, StyleRole::Chevron)
        .group(2, StyleRole::LinkName)
        .group(3, StyleRole::Chevron)
        .group(4, StyleRole::Link)
        .group(5, StyleRole::Comment)
        .link(),
    );

    // TODO: FIXME: ...
    mode.add_inline(
        Rule::build(
            "admonition",
            r"(?im)^([ \t]*)(TODO|FIXME|IMPORTANT|WARNING|TIP)(:)",
        )
        .group(2, StyleRole::Admonition)
        .group(3, StyleRole::Admonition),
    );

    // $x$, \(x\), \[x\]
    mode.add_inline(
        Rule::build("formula", r"\$[^$\n]+\$|\\\([^\n]*?\\\)|\\\[[^\n]*?\\\]")
            .role(StyleRole::Formula),
    );

    mode.add_inline(Rule::build("mono", r"`[^`\n]+`").role(StyleRole::Mono));

    // Block rules, first match wins

    // ```lang
    // code
    // ```
    mode.add_block(
        Rule::build("code", r"(```)([\w+#.-]*)([^`]*?)(```)")
            .role(StyleRole::Code)
            .group(1, StyleRole::Fence)
            .group(2, StyleRole::Language)
            .group(4, StyleRole::Fence),
    );

    mode.add_block(Rule::build("comment", r"<!--[\s\S]*?-->").role(StyleRole::Comment));

    // text
    // ====
    mode.add_block(Rule::build("h1_block", r"(?m)^[^\n]*\S[^\n]*\r?\n={2,}[ \t]*$").role(StyleRole::H1));

    // text
    // ----
    mode.add_block(Rule::build("h2_block", r"(?m)^[^\n]*\S[^\n]*\r?\n-{2,}[ \t]*$").role(StyleRole::H2));

    // $$
    // formula
    // $$
    mode.add_block(
        Rule::build(
            "formula_block",
            r"(?m)^\$\$[\s\S]*?\$\$|^\\\\\([\s\S]*?\\\\\)|^\\\\\[[\s\S]*?\\\\\]",
        )
        .role(StyleRole::Formula),
    );

    mode.set_toggle(InlineStyle::Bold, Chevrons::symmetric("**"));
    mode.set_toggle(InlineStyle::Italic, Chevrons::symmetric("*"));
    mode.set_toggle(InlineStyle::Underline, Chevrons::symmetric("_"));
    mode.set_toggle(InlineStyle::Strikethrough, Chevrons::symmetric("~"));
    mode.set_toggle(InlineStyle::Mono, Chevrons::symmetric("`"));
    mode.set_header_marker('#');
    mode.set_code_block(Chevrons::pair("```\n", "\n```"));

    mode
}
