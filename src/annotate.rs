//! Annotation toggler
//!
//! Inserts markup chevrons around a selection or at the start of a line.
//! Every operation validates its range against the buffer before the first
//! insertion, so a rejected call leaves the document untouched.

use tracing::debug;

use crate::buffer::HostBuffer;
use crate::error::{MarkupError, Result};
use crate::section::Section;

fn check_range<B: HostBuffer + ?Sized>(buf: &B, section: &Section) -> Result<()> {
    let len = buf.len();
    if section.start > section.end || section.end > len {
        return Err(MarkupError::InvalidRange {
            start: section.start,
            end: section.end,
            len,
        });
    }
    Ok(())
}

/// Wrap a selection in chevrons
///
/// The closing chevron goes in first so the selection start stays valid.
/// The cursor ends up after the closing chevron. Nothing happens for a
/// missing or empty selection.
pub fn wrap_selection<B: HostBuffer + ?Sized>(
    buf: &mut B,
    selection: Option<&Section>,
    open: &str,
    close: &str,
) -> Result<()> {
    let Some(section) = selection else {
        return Ok(());
    };
    check_range(buf, section)?;
    if section.is_empty() {
        return Ok(());
    }

    debug!(start = section.start, end = section.end, open, close, "wrapping selection");
    buf.insert_text(section.end, close);
    buf.insert_text(section.start, open);
    buf.set_selection(section.end + open.len() + close.len());
    Ok(())
}

/// Insert `prefix` and a space at the start of a line, and optionally a
/// suffix at its end
pub fn prefix_line<B: HostBuffer + ?Sized>(
    buf: &mut B,
    line: &Section,
    prefix: &str,
    suffix: Option<&str>,
) -> Result<()> {
    check_range(buf, line)?;

    debug!(start = line.start, prefix, "prefixing line");
    if let Some(suffix) = suffix {
        buf.insert_text(line.end, suffix);
    }
    let marker = format!("{} ", prefix);
    buf.insert_text(line.start, &marker);
    buf.set_selection(line.end + marker.len() + suffix.map_or(0, str::len));
    Ok(())
}

/// Insert an empty block between `open` and `close` at `pos`, leaving the
/// cursor inside it
pub fn insert_block<B: HostBuffer + ?Sized>(
    buf: &mut B,
    pos: usize,
    open: &str,
    close: &str,
) -> Result<()> {
    let len = buf.len();
    if pos > len {
        return Err(MarkupError::InvalidRange { start: pos, end: pos, len });
    }

    buf.insert_text(pos, &format!("{}{}", open, close));
    buf.set_selection(pos + open.len());
    Ok(())
}
