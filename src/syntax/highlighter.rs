//! Two-pass highlighter
//!
//! The inline pass runs over a bounded window of whole lines and applies
//! rules in declaration order, so later rules overwrite earlier ones. The
//! block pass runs over the whole document; the first rule to claim a range
//! keeps it, and blocks whose content has not changed since the last scan
//! are skipped unless their formatting was cleared.
//!
//! The highlighter never touches the host buffer for formatting. It returns
//! a [`FormatBatch`] that the caller applies.

use std::rc::Rc;

use tracing::{debug, trace};

use super::blocks::{content_hash, BlockTracker};
use super::matcher::Match;
use super::mode::{InlineStyle, MarkupMode, ModeDefinition};
use super::rules::Rule;
use super::style::Format;
use super::theme::StyleSheet;
use crate::annotate;
use crate::buffer::HostBuffer;
use crate::error::Result;
use crate::section::{lines_covering, Section};

/// A single formatting operation
#[derive(Debug, Clone, PartialEq)]
pub enum FormatOp {
    /// Drop formatting from a range
    Clear { start: usize, len: usize },
    /// Apply a format to a range
    Apply { start: usize, len: usize, format: Format },
}

/// A clickable link found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Full text of the link construct
    pub text: String,
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
}

impl LinkSpan {
    /// Check if the link covers a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// Result of one highlighting request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatBatch {
    /// Operations, in the order they must be applied
    pub ops: Vec<FormatOp>,
    /// Links found in the scanned regions
    pub links: Vec<LinkSpan>,
    /// Ranges whose links were recomputed (exclusive ends)
    pub regions: Vec<(usize, usize)>,
    /// Blocks that were new or changed on this scan
    pub new_blocks: usize,
}

impl FormatBatch {
    fn clear(&mut self, start: usize, len: usize) {
        self.ops.push(FormatOp::Clear { start, len });
    }

    fn apply(&mut self, start: usize, len: usize, format: Format) {
        if len > 0 {
            self.ops.push(FormatOp::Apply { start, len, format });
        }
    }

    /// Number of apply operations
    pub fn applied(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, FormatOp::Apply { .. }))
            .count()
    }

    /// Check whether any operation touches `start..end`
    pub fn touches(&self, start: usize, end: usize) -> bool {
        self.ops.iter().any(|op| {
            let (s, len) = match op {
                FormatOp::Clear { start, len } => (*start, *len),
                FormatOp::Apply { start, len, .. } => (*start, *len),
            };
            s < end && start < s + len
        })
    }
}

/// Highlighter for one markup mode
#[derive(Debug)]
pub struct Highlighter {
    definition: Rc<ModeDefinition>,
    styles: StyleSheet,
    blocks: BlockTracker,
}

impl Highlighter {
    /// Create a highlighter with an empty block record set
    pub fn new(definition: Rc<ModeDefinition>, styles: StyleSheet) -> Self {
        Self {
            definition,
            styles,
            blocks: BlockTracker::new(),
        }
    }

    /// Active mode
    pub fn mode(&self) -> MarkupMode {
        self.definition.mode
    }

    /// Rule table in use
    pub fn definition(&self) -> &ModeDefinition {
        &self.definition
    }

    /// Style sheet in use
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Replace the style sheet
    ///
    /// Existing formatting keeps the old colors until the next full rescan.
    pub fn set_styles(&mut self, styles: StyleSheet) {
        self.styles = styles;
    }

    /// Blocks recorded by the last scan
    pub fn blocks(&self) -> &BlockTracker {
        &self.blocks
    }

    /// Re-highlight after a change to `start..end`
    ///
    /// The range is clamped to the text and widened to whole lines. Its
    /// formatting is cleared and the inline rules run over it; the block
    /// rules then run over the whole text.
    pub fn on_range_changed(&mut self, text: &str, start: usize, end: usize) -> FormatBatch {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let window = lines_covering(text, start, end);

        let mut batch = FormatBatch::default();
        batch.clear(window.start, window.len());
        self.inline_pass(&window.text, window.start, &mut batch);
        batch.regions.push((window.start, window.end));

        self.block_pass(text, Some((window.start, window.end)), &mut batch);
        trace!(
            mode = %self.mode(),
            start = window.start,
            end = window.end,
            ops = batch.ops.len(),
            "range highlighted"
        );
        batch
    }

    /// Forget every block and highlight the whole text
    pub fn full_rescan(&mut self, text: &str) -> FormatBatch {
        self.blocks.clear();

        let mut batch = FormatBatch::default();
        batch.clear(0, text.len());
        self.inline_pass(text, 0, &mut batch);
        batch.regions.push((0, text.len()));

        self.block_pass(text, Some((0, text.len())), &mut batch);
        trace!(mode = %self.mode(), ops = batch.ops.len(), "full rescan");
        batch
    }

    /// Re-run the block rules, formatting only new or changed blocks and
    /// reverting blocks that disappeared
    pub fn refresh_dirty_blocks_only(&mut self, text: &str) -> FormatBatch {
        let mut batch = FormatBatch::default();
        self.block_pass(text, None, &mut batch);
        trace!(mode = %self.mode(), ops = batch.ops.len(), "dirty blocks refreshed");
        batch
    }

    fn inline_pass(&self, text: &str, base: usize, batch: &mut FormatBatch) {
        for rule in &self.definition.inline_rules {
            for m in rule.find(text) {
                self.emit(rule, &m, base, batch);
            }
        }
    }

    fn block_pass(&mut self, text: &str, cleared: Option<(usize, usize)>, batch: &mut FormatBatch) {
        let definition = Rc::clone(&self.definition);
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut found: Vec<(&Rule, Match, bool)> = Vec::new();

        self.blocks.begin_scan();
        for rule in &definition.block_rules {
            for m in rule.find(text) {
                if claimed.iter().any(|&(s, e)| m.overlaps(s, e)) {
                    trace!(rule = %rule.name, start = m.start, "block already claimed");
                    continue;
                }
                claimed.push((m.start, m.end_exclusive()));

                let status = self
                    .blocks
                    .observe(m.start, m.end_exclusive(), content_hash(&m.text));
                if status.is_dirty() {
                    batch.new_blocks += 1;
                }
                found.push((rule, m, status.is_dirty()));
            }
        }

        // Blocks that vanished fall back to inline formatting
        let mut reverted: Vec<(usize, usize)> = Vec::new();
        for record in self.blocks.end_scan() {
            let lines = lines_covering(text, record.start, record.end);
            batch.clear(lines.start, lines.len());
            self.inline_pass(&lines.text, lines.start, batch);
            batch.regions.push((lines.start, lines.end));
            reverted.push((lines.start, lines.end));
        }

        for (rule, m, dirty) in found {
            let was_cleared = cleared
                .iter()
                .chain(reverted.iter())
                .any(|&(s, e)| m.overlaps(s, e));
            if dirty || was_cleared {
                self.emit(rule, &m, 0, batch);
                batch.regions.push((m.start, m.end_exclusive()));
            }
        }
    }

    /// Links the inline rules find in `section`, at document offsets
    pub fn find_links(&self, section: &Section) -> Vec<LinkSpan> {
        let mut batch = FormatBatch::default();
        for rule in self.definition.inline_rules.iter().filter(|rule| rule.link) {
            for m in rule.find(&section.text) {
                self.emit(rule, &m, section.start, &mut batch);
            }
        }
        batch.links
    }

    fn emit(&self, rule: &Rule, m: &Match, base: usize, batch: &mut FormatBatch) {
        if let Some(role) = rule.role {
            batch.apply(base + m.start, m.len(), self.styles.format(role));
        }
        for &(index, role) in &rule.groups {
            if let Some(group) = m.group(index) {
                batch.apply(base + group.start, group.len(), self.styles.format(role));
            }
        }
        if rule.link {
            batch.links.push(LinkSpan {
                text: m.text.clone(),
                start: base + m.start,
                end: base + m.end_exclusive(),
            });
        }
    }

    /// Wrap a selection in the chevrons for `style`
    ///
    /// A mode without such a toggle, or a missing or empty selection, leaves
    /// the buffer alone.
    pub fn toggle_inline<B: HostBuffer + ?Sized>(
        &self,
        buf: &mut B,
        selection: Option<&Section>,
        style: InlineStyle,
    ) -> Result<()> {
        let Some(chevrons) = self.definition.toggle(style) else {
            debug!(mode = %self.mode(), style = style.name(), "no toggle for style");
            return Ok(());
        };
        annotate::wrap_selection(buf, selection, chevrons.open, chevrons.close)
    }

    /// Prefix a line with the header marker for `level`
    ///
    /// Level 0, or a mode without headers, is a no-op.
    pub fn toggle_header<B: HostBuffer + ?Sized>(
        &self,
        buf: &mut B,
        line: &Section,
        level: u8,
    ) -> Result<()> {
        if level == 0 {
            return Ok(());
        }
        let Some(prefix) = self.definition.header_prefix(level) else {
            debug!(mode = %self.mode(), level, "no header marker");
            return Ok(());
        };
        annotate::prefix_line(buf, line, &prefix, None)
    }

    /// Insert an empty code block at `pos`
    pub fn insert_code_block<B: HostBuffer + ?Sized>(&self, buf: &mut B, pos: usize) -> Result<()> {
        let Some(chevrons) = self.definition.code_block() else {
            debug!(mode = %self.mode(), "no code block markers");
            return Ok(());
        };
        annotate::insert_block(buf, pos, chevrons.open, chevrons.close)
    }
}
