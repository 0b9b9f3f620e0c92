//! Section locator
//!
//! Pure functions that find the line, word, or padded window of lines
//! around an offset. Offsets are byte offsets; positions inside a multi-byte
//! character are moved back to the start of that character.

/// A slice of the document
///
/// `text` is a copy of the document between `start` and `end` (exclusive)
/// at the time the section was computed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Section {
    fn new(text: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: text[start..end].to_string(),
        }
    }

    /// Empty section at `pos`
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
            text: String::new(),
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the section covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Clamp `pos` to the text and move it back onto a character boundary
pub fn floor_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// The line containing `pos`, without its newline
pub fn line(text: &str, pos: usize) -> Section {
    let pos = floor_boundary(text, pos);
    Section::new(text, line_start(text, pos), line_end(text, pos))
}

/// The whole lines touched by `start..end`
pub fn lines_covering(text: &str, start: usize, end: usize) -> Section {
    let start = floor_boundary(text, start);
    let end = floor_boundary(text, end).max(start);
    Section::new(text, line_start(text, start), line_end(text, end))
}

/// The run of non-whitespace characters containing `pos`
///
/// Returns an empty section at `pos` when `pos` is on whitespace or at the
/// end of the text.
pub fn word(text: &str, pos: usize) -> Section {
    let pos = floor_boundary(text, pos);
    match text[pos..].chars().next() {
        Some(c) if !c.is_whitespace() => {}
        _ => return Section::empty(pos),
    }

    let start = text[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let end = text[pos..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map_or(text.len(), |(i, _)| pos + i);

    Section::new(text, start, end)
}

/// The line containing `pos` plus up to `pad_lines` lines on each side
pub fn windowed_section(text: &str, pos: usize, pad_lines: usize) -> Section {
    let pos = floor_boundary(text, pos);

    let mut start = line_start(text, pos);
    for _ in 0..pad_lines {
        if start == 0 {
            break;
        }
        start = line_start(text, start - 1);
    }

    let mut end = line_end(text, pos);
    for _ in 0..pad_lines {
        if end >= text.len() {
            break;
        }
        end = line_end(text, end + 1);
    }

    Section::new(text, start, end)
}
