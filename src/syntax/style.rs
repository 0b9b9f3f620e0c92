//! Style types for text formatting
//!
//! This module provides the formatting attributes the engine hands to the
//! host buffer: colors, font flags and block decoration.

use std::fmt;
use std::str::FromStr;

use crate::error::MarkupError;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed 0xRRGGBB value
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::hex(0xff0000),
            "green" => Color::hex(0x008000),
            "blue" => Color::hex(0x0000ff),
            "yellow" => Color::hex(0xffff00),
            "cyan" => Color::hex(0x00ffff),
            "magenta" => Color::hex(0xff00ff),
            "orange" => Color::hex(0xffa500),
            "gray" | "grey" => Color::hex(0x808080),
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = MarkupError;

    /// Parse `#rrggbb`, `#rgb` or a basic color name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MarkupError::Configuration(format!("invalid color '{}'", s));

        let Some(digits) = s.strip_prefix('#') else {
            return Color::named(&s.to_lowercase()).ok_or_else(invalid);
        };

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Color::hex)
                .map_err(|_| invalid()),
            3 => {
                // #abc expands to #aabbcc
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Color::hex)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

/// Formatting attributes applied to a range of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    /// Foreground color
    pub color: Color,
    /// Background color
    pub background: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub strike: bool,
    /// Block decoration (code regions)
    pub block: bool,
}

impl Format {
    /// Plain text in the given colors
    pub fn plain(color: Color, background: Color) -> Self {
        Self {
            color,
            background,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            block: false,
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::plain(Color::BLACK, Color::WHITE)
    }
}

/// A formatted span of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Format applied to this span
    pub format: Format,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, format: Format) -> Self {
        Self { start, end, format }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
