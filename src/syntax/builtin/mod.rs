//! Built-in mode definitions
//!
//! This module provides the rule tables for the supported markup
//! dialects.

mod asciidoc;
mod markdown;
mod restructuredtext;
mod text;

pub use asciidoc::asciidoc_mode;
pub use markdown::markdown_mode;
pub use restructuredtext::restructuredtext_mode;
pub use text::text_mode;

use super::mode::ModeDefinition;

/// Get all built-in mode definitions
pub fn all_modes() -> Vec<ModeDefinition> {
    vec![
        asciidoc_mode(),
        markdown_mode(),
        restructuredtext_mode(),
        text_mode(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::mode::MarkupMode;

    #[test]
    fn test_every_mode_has_a_definition() {
        let modes: Vec<MarkupMode> = all_modes().iter().map(|m| m.mode).collect();
        assert_eq!(modes, MarkupMode::ALL.to_vec());
    }
}
