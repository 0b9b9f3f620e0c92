//! Configuration file support
//!
//! Loads settings from ~/.markup-highlight.toml (or
//! %USERPROFILE%\.markup-highlight.toml on Windows)
//!
//! Example:
//! ```toml
//! # markup-highlight configuration
//! mode = "markdown"
//! theme = "monokai"
//! dirty-edit-threshold = 10
//! idle-delay-ms = 2000
//! debounce-delay-ms = 250
//! window-lines = 2
//! idle-full-rescan = false
//! follow-links = true
//!
//! [style]
//! bold = "#ff8800"
//! codeBackground = "#202020"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{MarkupError, Result};
use crate::syntax::{MarkupMode, MarkupStyle};

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Edits before tracked blocks are considered dirty
    pub dirty_edit_threshold: u32,
    /// Quiet time before the idle refresh, in milliseconds
    pub idle_delay_ms: u64,
    /// Delay between the last keystroke and the rescan, in milliseconds
    pub debounce_delay_ms: u64,
    /// Lines above and below the cursor line in a scan window
    pub window_lines: usize,
    /// Rescan everything on idle instead of only dirty blocks
    pub idle_full_rescan: bool,
    /// Route clicks on links to the link callback
    pub follow_links: bool,
    /// Initial markup mode
    pub mode: MarkupMode,
    /// Initial theme
    pub theme: MarkupStyle,
    /// Style overrides, role name to color
    pub style: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dirty_edit_threshold: 10,
            idle_delay_ms: 2000,
            debounce_delay_ms: 250,
            window_lines: 2,
            idle_full_rescan: false,
            follow_links: true,
            mode: MarkupMode::default(),
            theme: MarkupStyle::default(),
            style: HashMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".markup-highlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".markup-highlight.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "ignoring config file: {}", e);
                Config::default()
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Config::default();
        config.apply(&Self::parse(&contents)?);
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse config file contents into a table
    fn parse(contents: &str) -> Result<toml::Table> {
        Ok(contents.parse::<toml::Table>()?)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, settings: &toml::Table) {
        for (key, value) in settings {
            if key == "style" {
                self.apply_style(value);
                continue;
            }

            let Some(text) = scalar(value) else {
                warn!(key = %key, "ignoring non-scalar setting");
                continue;
            };

            match key.as_str() {
                "dirty-edit-threshold" => {
                    if let Ok(n) = text.parse::<u32>() {
                        self.dirty_edit_threshold = n.max(1);
                    }
                }
                "idle-delay-ms" => {
                    if let Ok(n) = text.parse::<u64>() {
                        self.idle_delay_ms = n.max(100); // Minimum 100 ms
                    }
                }
                "debounce-delay-ms" => {
                    if let Ok(n) = text.parse::<u64>() {
                        self.debounce_delay_ms = n.min(10_000);
                    }
                }
                "window-lines" => {
                    if let Ok(n) = text.parse::<usize>() {
                        self.window_lines = n.min(50);
                    }
                }
                "idle-full-rescan" => self.idle_full_rescan = parse_bool(&text),
                "follow-links" => self.follow_links = parse_bool(&text),
                "mode" => match MarkupMode::from_name(&text) {
                    Some(mode) => self.mode = mode,
                    None => warn!(mode = %text, "ignoring unknown mode"),
                },
                "theme" => match MarkupStyle::from_name(&text) {
                    Some(theme) => self.theme = theme,
                    None => warn!(theme = %text, "ignoring unknown theme"),
                },
                _ => warn!(key = %key, "ignoring unknown setting"),
            }
        }
    }

    fn apply_style(&mut self, value: &toml::Value) {
        let Some(table) = value.as_table() else {
            warn!("ignoring [style], expected a table");
            return;
        };
        for (role, color) in table {
            match color.as_str() {
                Some(color) => {
                    self.style.insert(role.clone(), color.to_string());
                }
                None => warn!(role = %role, "ignoring style override, expected a string"),
            }
        }
    }

    /// Debounce delay as a duration
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Idle delay as a duration
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }

    /// Check the settings that cannot be clamped
    pub fn validate(&self) -> Result<()> {
        if self.dirty_edit_threshold == 0 {
            return Err(MarkupError::Configuration(
                "dirty-edit-threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Render a scalar TOML value as text
fn scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(n) => Some(n.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r##"
# Comment
mode = "markdown"
theme = "monokai"
dirty-edit-threshold = 5
idle-delay-ms = 1500
follow-links = false

[style]
bold = "#ff8800"
codeBackground = "#202020"
        "##;

        let mut config = Config::default();
        config.apply(&Config::parse(contents).unwrap());
        assert_eq!(config.mode, MarkupMode::Markdown);
        assert_eq!(config.theme, MarkupStyle::Monokai);
        assert_eq!(config.dirty_edit_threshold, 5);
        assert_eq!(config.idle_delay_ms, 1500);
        assert!(!config.follow_links);
        assert_eq!(config.style.get("bold"), Some(&"#ff8800".to_string()));
        assert_eq!(config.style.get("codeBackground"), Some(&"#202020".to_string()));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dirty_edit_threshold, 10);
        assert_eq!(config.idle_delay(), Duration::from_millis(2000));
        assert_eq!(config.debounce_delay(), Duration::from_millis(250));
        assert_eq!(config.mode, MarkupMode::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_are_clamped() {
        let mut config = Config::default();
        let settings = Config::parse("idle-delay-ms = 5\nwindow-lines = 500\ndirty-edit-threshold = 0").unwrap();
        config.apply(&settings);
        assert_eq!(config.idle_delay_ms, 100);
        assert_eq!(config.window_lines, 50);
        assert_eq!(config.dirty_edit_threshold, 1);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let mut config = Config::default();
        let settings = Config::parse(
            "mode = \"richtext\"\nidle-delay-ms = \"soon\"\nunknown = 1\n[style]\nbold = 3",
        )
        .unwrap();
        config.apply(&settings);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_string_numbers_and_bools() {
        let mut config = Config::default();
        let settings = Config::parse("debounce-delay-ms = \"100\"\nidle-full-rescan = \"yes\"").unwrap();
        config.apply(&settings);
        assert_eq!(config.debounce_delay_ms, 100);
        assert!(config.idle_full_rescan);
    }

    #[test]
    fn test_malformed_file() {
        let err = Config::parse("mode = ").unwrap_err();
        assert!(matches!(err, MarkupError::Toml(_)));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("anything"));
    }
}
