//! Plain text mode definition

use crate::syntax::mode::{MarkupMode, ModeDefinition};

/// Create the plain text mode definition
///
/// Text mode has no rules and no toggles; highlighting only resets the
/// document to the base format.
pub fn text_mode() -> ModeDefinition {
    ModeDefinition::new(MarkupMode::Text)
}
