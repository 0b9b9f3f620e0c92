//! Mode registry
//!
//! Holds one shared rule table per markup mode, built once at startup.
//! Highlighters borrow the table through an `Rc`, so switching modes never
//! recompiles patterns.

use std::collections::HashMap;
use std::rc::Rc;

use super::builtin;
use super::mode::{MarkupMode, ModeDefinition};
use crate::error::{MarkupError, Result};

/// Registry of compiled mode definitions
#[derive(Debug)]
pub struct ModeRegistry {
    modes: HashMap<MarkupMode, Rc<ModeDefinition>>,
}

impl ModeRegistry {
    /// Create a registry with the built-in modes
    pub fn new() -> Self {
        let mut registry = Self {
            modes: HashMap::new(),
        };

        for definition in builtin::all_modes() {
            registry.add_mode(definition);
        }

        registry
    }

    /// Add or replace a mode definition
    pub fn add_mode(&mut self, definition: ModeDefinition) {
        self.modes.insert(definition.mode, Rc::new(definition));
    }

    /// Get the definition for a mode
    pub fn get(&self, mode: MarkupMode) -> Option<Rc<ModeDefinition>> {
        self.modes.get(&mode).cloned()
    }

    /// Look up a mode by name
    pub fn get_by_name(&self, name: &str) -> Result<Rc<ModeDefinition>> {
        MarkupMode::from_name(name)
            .and_then(|mode| self.get(mode))
            .ok_or_else(|| MarkupError::UnknownMode(name.to_string()))
    }

    /// List available modes by name
    pub fn list_modes(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.modes.keys().map(|m| m.name()).collect();
        names.sort();
        names
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
