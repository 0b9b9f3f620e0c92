//! Themes and the style sheet
//!
//! A [`StyleSheet`] maps roles to colors on top of a foreground/background
//! pair. Built-in themes provide defaults; user overrides are merged on top.

use std::collections::HashMap;

use tracing::{trace, warn};

use super::roles::StyleRole;
use super::style::{Color, Format};

/// Built-in display themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkupStyle {
    /// Only foreground/background; roles come from overrides
    Custom,
    /// Black on white with font attributes and a few muted colors
    #[default]
    Plain,
    Monokai,
}

impl MarkupStyle {
    /// Get the configuration name for this theme
    pub fn name(&self) -> &'static str {
        match self {
            MarkupStyle::Custom => "custom",
            MarkupStyle::Plain => "plain",
            MarkupStyle::Monokai => "monokai",
        }
    }

    /// Parse a theme from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "custom" => Some(MarkupStyle::Custom),
            "plain" => Some(MarkupStyle::Plain),
            "monokai" => Some(MarkupStyle::Monokai),
            _ => None,
        }
    }
}

/// Colors assigned to a single role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleColors {
    pub color: Option<Color>,
    pub background: Option<Color>,
}

impl RoleColors {
    fn fg(color: u32) -> Self {
        Self {
            color: Some(Color::hex(color)),
            background: None,
        }
    }

    fn fg_bg(color: u32, background: u32) -> Self {
        Self {
            color: Some(Color::hex(color)),
            background: Some(Color::hex(background)),
        }
    }
}

/// Role to format mapping for the active theme
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    theme: MarkupStyle,
    foreground: Color,
    background: Color,
    roles: HashMap<StyleRole, RoleColors>,
}

impl StyleSheet {
    /// Create the style sheet for a built-in theme
    pub fn new(theme: MarkupStyle) -> Self {
        match theme {
            MarkupStyle::Custom => Self {
                theme,
                foreground: Color::BLACK,
                background: Color::WHITE,
                roles: HashMap::new(),
            },
            MarkupStyle::Plain => Self::plain(),
            MarkupStyle::Monokai => Self::monokai(),
        }
    }

    fn plain() -> Self {
        let mut roles = HashMap::new();
        for role in StyleRole::ALL {
            roles.insert(role, RoleColors::default());
        }
        roles.insert(StyleRole::Admonition, RoleColors::fg_bg(0x000000, 0xfff3b0));
        roles.insert(StyleRole::Code, RoleColors::fg_bg(0x000000, 0xf2f2f2));
        roles.insert(StyleRole::Comment, RoleColors::fg(0x808080));
        roles.insert(StyleRole::Blockquote, RoleColors::fg(0x606060));
        roles.insert(StyleRole::Link, RoleColors::fg(0x0000ee));
        roles.insert(StyleRole::Chevron, RoleColors::fg(0x808080));
        roles.insert(StyleRole::Fence, RoleColors::fg(0x808080));

        Self {
            theme: MarkupStyle::Plain,
            foreground: Color::BLACK,
            background: Color::WHITE,
            roles,
        }
    }

    fn monokai() -> Self {
        let roles: HashMap<StyleRole, RoleColors> = [
            (StyleRole::Admonition, RoleColors::fg_bg(0x272822, 0xe6db74)),
            (StyleRole::Attribute, RoleColors::fg(0xa6e22e)),
            (StyleRole::Blockquote, RoleColors::fg(0x75715e)),
            (StyleRole::Bold, RoleColors::fg(0xfd971f)),
            (StyleRole::Chevron, RoleColors::fg(0xf92672)),
            (StyleRole::Code, RoleColors::fg_bg(0xf8f8f2, 0x3e3d32)),
            (StyleRole::Comment, RoleColors::fg(0x75715e)),
            (StyleRole::Fence, RoleColors::fg(0xf92672)),
            (StyleRole::Formula, RoleColors::fg(0xae81ff)),
            (StyleRole::H1, RoleColors::fg(0x66d9ef)),
            (StyleRole::H2, RoleColors::fg(0x66d9ef)),
            (StyleRole::H3, RoleColors::fg(0x66d9ef)),
            (StyleRole::H4, RoleColors::fg(0x66d9ef)),
            (StyleRole::H5, RoleColors::fg(0x66d9ef)),
            (StyleRole::H6, RoleColors::fg(0x66d9ef)),
            (StyleRole::Italic, RoleColors::fg(0xfd971f)),
            (StyleRole::Keyword, RoleColors::fg(0xf92672)),
            (StyleRole::Language, RoleColors::fg(0xa6e22e)),
            (StyleRole::Link, RoleColors::fg(0x66d9ef)),
            (StyleRole::LinkName, RoleColors::fg(0xe6db74)),
            (StyleRole::List, RoleColors::fg(0xf92672)),
            (StyleRole::Mono, RoleColors::fg(0xa6e22e)),
            (StyleRole::Option, RoleColors::fg(0xae81ff)),
            (StyleRole::Strikethrough, RoleColors::fg(0x75715e)),
            (StyleRole::Underline, RoleColors::fg(0xfd971f)),
        ]
        .into_iter()
        .collect();

        Self {
            theme: MarkupStyle::Monokai,
            foreground: Color::hex(0xf8f8f2),
            background: Color::hex(0x272822),
            roles,
        }
    }

    /// Theme this sheet was built from
    pub fn theme(&self) -> MarkupStyle {
        self.theme
    }

    /// Default text color
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Default background color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Format for a role
    ///
    /// Roles the sheet does not define fall back to the foreground and
    /// background colors, keeping the role's font attributes.
    pub fn format(&self, role: StyleRole) -> Format {
        match self.roles.get(&role) {
            Some(colors) => role.font(
                colors.color.unwrap_or(self.foreground),
                colors.background.unwrap_or(self.background),
            ),
            None => {
                trace!(role = role.name(), "style role not defined, using defaults");
                role.font(self.foreground, self.background)
            }
        }
    }

    /// Format for unstyled text
    pub fn base_format(&self) -> Format {
        Format::plain(self.foreground, self.background)
    }

    /// Check whether the sheet defines a role
    pub fn defines(&self, role: StyleRole) -> bool {
        self.roles.contains_key(&role)
    }

    /// Merge user overrides into the sheet
    ///
    /// Keys are `foreground`, `background`, a role name, or a role name
    /// followed by `Background`. Entries with unknown keys or unparsable
    /// colors are logged and skipped. Returns the number of entries applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> usize {
        let mut applied = 0;

        for (key, value) in overrides {
            let color = match value.parse::<Color>() {
                Ok(color) => color,
                Err(e) => {
                    warn!(key = %key, "ignoring style override: {}", e);
                    continue;
                }
            };

            match key.as_str() {
                "foreground" => self.foreground = color,
                "background" => self.background = color,
                _ => {
                    let (name, is_background) = match key.strip_suffix("Background") {
                        Some(name) => (name, true),
                        None => (key.as_str(), false),
                    };
                    let Some(role) = StyleRole::from_name(name) else {
                        warn!(key = %key, "ignoring style override for unknown role");
                        continue;
                    };
                    let entry = self.roles.entry(role).or_default();
                    if is_background {
                        entry.background = Some(color);
                    } else {
                        entry.color = Some(color);
                    }
                }
            }
            applied += 1;
        }

        applied
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet::new(MarkupStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(MarkupStyle::from_name("Monokai"), Some(MarkupStyle::Monokai));
        assert_eq!(MarkupStyle::from_name("plain"), Some(MarkupStyle::Plain));
        assert_eq!(MarkupStyle::from_name("solarized"), None);
    }

    #[test]
    fn test_builtin_themes_define_every_role() {
        for theme in [MarkupStyle::Plain, MarkupStyle::Monokai] {
            let sheet = StyleSheet::new(theme);
            for role in StyleRole::ALL {
                assert!(sheet.defines(role), "{} missing {}", theme.name(), role.name());
            }
        }
    }

    #[test]
    fn test_default_is_black_on_white() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.foreground(), Color::BLACK);
        assert_eq!(sheet.background(), Color::WHITE);
    }

    #[test]
    fn test_missing_role_falls_back_to_foreground() {
        let sheet = StyleSheet::new(MarkupStyle::Custom);
        assert!(!sheet.defines(StyleRole::Bold));
        let format = sheet.format(StyleRole::Bold);
        assert_eq!(format.color, Color::BLACK);
        assert_eq!(format.background, Color::WHITE);
        assert!(format.bold);
    }

    #[test]
    fn test_overrides_merge() {
        let mut sheet = StyleSheet::new(MarkupStyle::Custom);
        let applied = sheet.apply_overrides(&overrides(&[
            ("foreground", "yellow"),
            ("background", "red"),
            ("bold", "#00ff00"),
            ("admonitionBackground", "#000"),
        ]));
        assert_eq!(applied, 4);
        assert_eq!(sheet.foreground(), Color::hex(0xffff00));
        assert_eq!(sheet.background(), Color::hex(0xff0000));
        assert_eq!(sheet.format(StyleRole::Bold).color, Color::hex(0x00ff00));
        let admonition = sheet.format(StyleRole::Admonition);
        assert_eq!(admonition.background, Color::BLACK);
        assert_eq!(admonition.color, Color::hex(0xffff00));
    }

    #[test]
    fn test_bad_overrides_are_skipped() {
        let mut sheet = StyleSheet::new(MarkupStyle::Monokai);
        let before = sheet.clone();
        let applied = sheet.apply_overrides(&overrides(&[
            ("bold", "not-a-color"),
            ("sparkle", "#ffffff"),
        ]));
        assert_eq!(applied, 0);
        assert_eq!(sheet, before);
    }
}
