//! Terminal rendering of highlighted buffers
//!
//! Writes a [`MemoryBuffer`] to any writer as text interleaved with
//! crossterm color and attribute commands. Unformatted bytes use the base
//! format of the style sheet.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::buffer::MemoryBuffer;
use crate::error::Result;
use crate::syntax::{Color, Format};

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn apply_format<W: Write>(out: &mut W, format: &Format) -> Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(term_color(format.color)),
        SetBackgroundColor(term_color(format.background))
    )?;
    if format.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if format.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if format.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if format.strike {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

/// Runs of equally formatted characters in one line, as absolute byte ranges
fn runs(buffer: &MemoryBuffer, line_start: usize, line: &str, base: &Format) -> Vec<(usize, usize, Format)> {
    let mut runs: Vec<(usize, usize, Format)> = Vec::new();
    for (i, ch) in line.char_indices() {
        let start = line_start + i;
        let end = start + ch.len_utf8();
        let format = buffer.format_at(start).unwrap_or(*base);
        match runs.last_mut() {
            Some(last) if last.1 == start && last.2 == format => last.1 = end,
            _ => runs.push((start, end, format)),
        }
    }
    runs
}

/// Truncate a string to a display width
fn truncate_to_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;

    for (i, ch) in s.char_indices() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            return (&s[..i], width);
        }
        width += ch_width;
    }

    (s, width)
}

/// Write a buffer with its formatting
///
/// With `max_cols`, each line is cut at that many display columns.
pub fn render<W: Write>(
    out: &mut W,
    buffer: &MemoryBuffer,
    base: &Format,
    max_cols: Option<usize>,
) -> Result<()> {
    let text = buffer.as_str();
    let mut offset = 0;

    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print("\n"))?;
        }

        let mut width = 0;
        for (start, end, format) in runs(buffer, offset, line, base) {
            let slice = &text[start..end];
            let visible = match max_cols {
                Some(max) => {
                    let (visible, used) = truncate_to_width(slice, max.saturating_sub(width));
                    width += used;
                    visible
                }
                None => slice,
            };
            if visible.is_empty() {
                break;
            }
            apply_format(out, &format)?;
            queue!(out, Print(visible))?;
        }

        offset += line.len() + 1;
    }

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()?;
    Ok(())
}
