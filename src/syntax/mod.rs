//! Syntax and styling module
//!
//! This module provides the highlighting infrastructure:
//! - Colors, formats and themes
//! - Pattern rules and per-dialect rule tables
//! - Block tracking and the two-pass highlighter

mod blocks;
mod builtin;
mod highlighter;
mod manager;
mod matcher;
mod mode;
mod roles;
mod rules;
mod style;
mod theme;

pub use blocks::{content_hash, BlockRecord, BlockStatus, BlockTracker};
pub use highlighter::{FormatBatch, FormatOp, Highlighter, LinkSpan};
pub use manager::ModeRegistry;
pub use matcher::{find_matches, Group, Match};
pub use mode::{Chevrons, InlineStyle, MarkupMode, ModeDefinition};
pub use roles::StyleRole;
pub use rules::{Rule, RuleBuilder};
pub use style::{Color, Format, Span};
pub use theme::{MarkupStyle, RoleColors, StyleSheet};
