//! Markup engine
//!
//! [`Markup`] ties the pieces together for one host buffer: it owns the
//! active highlighter, feeds host notifications to the coordinator, applies
//! format batches to the buffer, and routes clicks on links.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::buffer::HostBuffer;
use crate::config::Config;
use crate::dirty::{Coordinator, DirtyState, ScanRequest, ScanState};
use crate::error::{MarkupError, Result};
use crate::section::{floor_boundary, windowed_section, word, Section};
use crate::syntax::{
    FormatBatch, FormatOp, Highlighter, InlineStyle, LinkSpan, MarkupMode, MarkupStyle,
    ModeRegistry, StyleSheet,
};

/// Called with the byte offset of every click
pub type ClickCallback = Box<dyn FnMut(usize)>;
/// Called when a click lands on a link
pub type LinkCallback = Box<dyn FnMut(&LinkSpan)>;
/// Called with the document text after a scheduled scan
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Builder for [`Markup`]
pub struct MarkupBuilder<B: HostBuffer> {
    buffer: Option<B>,
    config: Config,
    registry: Option<ModeRegistry>,
    on_click: Option<ClickCallback>,
    on_click_link: Option<LinkCallback>,
    on_change: Option<ChangeCallback>,
}

impl<B: HostBuffer> MarkupBuilder<B> {
    /// Start with default settings and no buffer
    pub fn new() -> Self {
        Self {
            buffer: None,
            config: Config::default(),
            registry: None,
            on_click: None,
            on_click_link: None,
            on_change: None,
        }
    }

    /// Host buffer to highlight
    pub fn buffer(mut self, buffer: B) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Settings
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Mode definitions to use instead of the built-in ones
    pub fn registry(mut self, registry: ModeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Callback for every click
    pub fn on_click(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Callback for clicks on links
    pub fn on_click_link(mut self, callback: impl FnMut(&LinkSpan) + 'static) -> Self {
        self.on_click_link = Some(Box::new(callback));
        self
    }

    /// Callback after each scheduled scan
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Create the engine and highlight the buffer
    pub fn build(self) -> Result<Markup<B>> {
        let buffer = self.buffer.ok_or(MarkupError::HostUnavailable)?;
        self.config.validate()?;

        let registry = self.registry.unwrap_or_default();
        let definition = registry
            .get(self.config.mode)
            .ok_or_else(|| MarkupError::UnknownMode(self.config.mode.name().to_string()))?;
        let styles = style_sheet(self.config.theme, &self.config.style);

        let mut markup = Markup {
            buffer,
            highlighter: Highlighter::new(definition, styles),
            registry,
            coordinator: Coordinator::new(&self.config),
            config: self.config,
            links: Vec::new(),
            on_click: self.on_click,
            on_click_link: self.on_click_link,
            on_change: self.on_change,
        };
        markup.refresh();
        Ok(markup)
    }
}

impl<B: HostBuffer> Default for MarkupBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn style_sheet(theme: MarkupStyle, overrides: &HashMap<String, String>) -> StyleSheet {
    let mut styles = StyleSheet::new(theme);
    styles.apply_overrides(overrides);
    styles
}

/// Highlighting engine bound to one host buffer
pub struct Markup<B: HostBuffer> {
    buffer: B,
    registry: ModeRegistry,
    highlighter: Highlighter,
    coordinator: Coordinator,
    config: Config,
    /// Links found by the scans, in document order
    links: Vec<LinkSpan>,
    on_click: Option<ClickCallback>,
    on_click_link: Option<LinkCallback>,
    on_change: Option<ChangeCallback>,
}

impl<B: HostBuffer> Markup<B> {
    /// Start building an engine
    pub fn builder() -> MarkupBuilder<B> {
        MarkupBuilder::new()
    }

    /// The host buffer
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// The host buffer, for edits made outside the engine
    ///
    /// Report such edits through [`Markup::on_text_change`].
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// Active mode
    pub fn mode(&self) -> MarkupMode {
        self.highlighter.mode()
    }

    /// Names of the supported modes
    pub fn modes(&self) -> Vec<&'static str> {
        self.registry.list_modes()
    }

    /// Active style sheet
    pub fn style_sheet(&self) -> &StyleSheet {
        self.highlighter.styles()
    }

    /// Settings in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dirty flags of the coordinator
    pub fn dirty_state(&self) -> DirtyState {
        self.coordinator.dirty()
    }

    /// Scheduling state of the coordinator
    pub fn scan_state(&self) -> ScanState {
        self.coordinator.state()
    }

    /// Links known from the last scans
    pub fn links(&self) -> &[LinkSpan] {
        &self.links
    }

    /// Switch to another mode
    ///
    /// The new highlighter starts with no block records and the whole
    /// document is rescanned.
    pub fn set_mode(&mut self, mode: MarkupMode) -> Result<()> {
        let definition = self
            .registry
            .get(mode)
            .ok_or_else(|| MarkupError::UnknownMode(mode.name().to_string()))?;
        debug!(from = %self.mode(), to = %mode, "switching mode");

        let styles = self.highlighter.styles().clone();
        self.highlighter = Highlighter::new(definition, styles);
        self.config.mode = mode;
        self.refresh();
        Ok(())
    }

    /// Switch to a mode given by name
    pub fn set_mode_name(&mut self, name: &str) -> Result<()> {
        let mode = MarkupMode::from_name(name).ok_or_else(|| MarkupError::UnknownMode(name.to_string()))?;
        self.set_mode(mode)
    }

    /// Switch theme, keeping the configured overrides, and rescan
    pub fn set_theme(&mut self, theme: MarkupStyle) {
        debug!(theme = theme.name(), "switching theme");
        self.config.theme = theme;
        self.highlighter
            .set_styles(style_sheet(theme, &self.config.style));
        self.refresh();
    }

    /// Merge style overrides and rescan
    ///
    /// Returns the number of overrides that were applied.
    pub fn set_style(&mut self, overrides: &HashMap<String, String>) -> usize {
        let mut styles = self.highlighter.styles().clone();
        let applied = styles.apply_overrides(overrides);
        for (key, value) in overrides {
            self.config.style.insert(key.clone(), value.clone());
        }
        debug!(applied, total = overrides.len(), "style overrides merged");
        self.highlighter.set_styles(styles);
        self.refresh();
        applied
    }

    /// Replace the document and rescan it
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.links.clear();
        self.refresh();
    }

    /// Rescan the whole document now and drop all pending work
    pub fn refresh(&mut self) {
        self.run_scan(ScanRequest::Full);
        self.coordinator.reset();
    }

    /// Rescan a range now
    pub fn handle_change(&mut self, start: usize, end: usize) {
        self.run_scan(ScanRequest::Range { start, end });
    }

    /// Wrap the selection, or the word at the cursor, in bold chevrons
    pub fn toggle_bold(&mut self) -> Result<()> {
        self.toggle(InlineStyle::Bold)
    }

    /// Wrap the selection, or the word at the cursor, in italic chevrons
    pub fn toggle_italic(&mut self) -> Result<()> {
        self.toggle(InlineStyle::Italic)
    }

    /// Wrap the selection, or the word at the cursor, in underline chevrons
    pub fn toggle_underline(&mut self) -> Result<()> {
        self.toggle(InlineStyle::Underline)
    }

    /// Wrap the selection, or the word at the cursor, in strikethrough chevrons
    pub fn toggle_strike_through(&mut self) -> Result<()> {
        self.toggle(InlineStyle::Strikethrough)
    }

    /// Wrap the selection, or the word at the cursor, in mono chevrons
    pub fn toggle_mono(&mut self) -> Result<()> {
        self.toggle(InlineStyle::Mono)
    }

    fn toggle(&mut self, style: InlineStyle) -> Result<()> {
        let selection = self.current_selection();
        let result = self
            .highlighter
            .toggle_inline(&mut self.buffer, selection.as_ref(), style);
        self.after_annotation(result)
    }

    /// Make the cursor line a header of `level` (1-6, 0 does nothing)
    pub fn set_header(&mut self, level: u8) -> Result<()> {
        let text = self.buffer.text();
        let line = crate::section::line(&text, self.cursor());
        let result = self.highlighter.toggle_header(&mut self.buffer, &line, level);
        self.after_annotation(result)
    }

    /// Insert an empty code block at the cursor
    pub fn insert_code_block(&mut self) -> Result<()> {
        let pos = self.cursor();
        let result = self.highlighter.insert_code_block(&mut self.buffer, pos);
        self.after_annotation(result)
    }

    fn after_annotation(&mut self, result: Result<()>) -> Result<()> {
        result?;
        let text = self.buffer.text();
        let window = windowed_section(&text, self.cursor(), self.config.window_lines);
        self.handle_change(window.start, window.end);
        Ok(())
    }

    fn cursor(&self) -> usize {
        self.buffer.selection().map_or(0, |s| s.index)
    }

    /// The selected text, or the word at a bare cursor
    fn current_selection(&self) -> Option<Section> {
        let selection = self.buffer.selection()?;
        let text = self.buffer.text();
        if selection.length == 0 {
            return Some(word(&text, selection.index));
        }

        let start = selection.index;
        let end = start.saturating_add(selection.length);
        if end > text.len() {
            // left for the toggler to reject
            return Some(Section { start, end, text: String::new() });
        }
        let start = floor_boundary(&text, start);
        let end = floor_boundary(&text, end);
        Some(Section {
            start,
            end,
            text: text[start..end].to_string(),
        })
    }

    /// Record an edit at the cursor
    pub fn on_text_change(&mut self, now: Instant) {
        let window = self.cursor_window();
        self.coordinator.on_text_change(now, (window.start, window.end));
    }

    /// Record that the pending edit was a paste
    pub fn on_paste(&mut self, now: Instant) {
        self.coordinator.on_paste(now);
    }

    /// Record a cursor move
    pub fn on_selection_change(&mut self, now: Instant) {
        let window = self.cursor_window();
        self.coordinator.on_selection_change(window.start, window.end);
        self.coordinator.on_user_activity(now);
    }

    /// Record an editor-change notification from the host
    ///
    /// Covers both cursor moves and focus changes, so the cached cursor
    /// section is refreshed as for a selection change.
    pub fn on_editor_change(&mut self, now: Instant) {
        self.on_selection_change(now);
    }

    /// Record any other editor activity, postponing the idle refresh
    pub fn on_user_activity(&mut self, now: Instant) {
        self.coordinator.on_user_activity(now);
    }

    fn cursor_window(&self) -> Section {
        let text = self.buffer.text();
        windowed_section(&text, self.cursor(), self.config.window_lines)
    }

    /// Run the scans due at `now`; returns whether any ran
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut scanned = false;
        while let Some(request) = self.coordinator.poll(now) {
            debug!(?request, "running scheduled scan");
            self.run_scan(request);
            scanned = true;
        }

        if scanned {
            if let Some(callback) = self.on_change.as_mut() {
                callback(&self.buffer.text());
            }
        }
        scanned
    }

    /// When [`Markup::tick`] next has work
    pub fn next_deadline(&self) -> Option<Instant> {
        self.coordinator.next_deadline()
    }

    fn run_scan(&mut self, request: ScanRequest) {
        if !self.coordinator.begin_scan() {
            debug!(?request, "scan already running");
            return;
        }

        let text = self.buffer.text();
        let batch = match request {
            ScanRequest::Full => self.highlighter.full_rescan(&text),
            ScanRequest::Range { start, end } => {
                self.highlighter
                    .on_range_changed(&text, start.min(text.len()), end.min(text.len()))
            }
            ScanRequest::DirtyBlocks => self.highlighter.refresh_dirty_blocks_only(&text),
        };
        self.apply(batch);
        self.coordinator.finish_scan();
    }

    /// Apply a batch, clamping every range to the current buffer length
    fn apply(&mut self, batch: FormatBatch) {
        let len = self.buffer.len();
        let clamp = |start: usize, n: usize| {
            let start = start.min(len);
            (start, n.min(len - start))
        };

        for op in &batch.ops {
            match op {
                FormatOp::Clear { start, len } => {
                    let (start, n) = clamp(*start, *len);
                    self.buffer.remove_format(start, n);
                }
                FormatOp::Apply { start, len, format } => {
                    let (start, n) = clamp(*start, *len);
                    if n > 0 {
                        self.buffer.format_range(start, n, format);
                    }
                }
            }
        }

        self.links.retain(|link| {
            link.end <= len
                && !batch
                    .regions
                    .iter()
                    .any(|&(s, e)| link.start < e && s < link.end)
        });
        self.links.extend(batch.links);
        self.links.sort_by_key(|link| link.start);
        self.links.dedup();

        if batch.new_blocks > 0 {
            self.coordinator.mark_blocks_dirty();
        }
    }

    /// The link at a byte offset
    ///
    /// A recorded link whose text has moved since its scan is looked up
    /// again on the line under `pos`, and the index for that line is
    /// replaced with what is found there.
    pub fn link_at(&mut self, pos: usize) -> Option<LinkSpan> {
        let text = self.buffer.text();
        let recorded = self
            .links
            .iter()
            .find(|link| link.contains(pos) && text.get(link.start..link.end) == Some(link.text.as_str()));
        if let Some(link) = recorded {
            return Some(link.clone());
        }

        let line = crate::section::line(&text, pos);
        let found = self.highlighter.find_links(&line);
        trace!(start = line.start, end = line.end, found = found.len(), "relinking line");

        self.links
            .retain(|link| link.end <= line.start || line.end <= link.start);
        self.links.extend(found);
        self.links.sort_by_key(|link| link.start);
        self.links.dedup();

        self.links.iter().find(|link| link.contains(pos)).cloned()
    }

    /// Route a click at a byte offset
    ///
    /// The click callback always runs; the link callback runs as well when
    /// the click lands on a link and following links is enabled.
    pub fn click(&mut self, pos: usize) {
        if let Some(callback) = self.on_click.as_mut() {
            callback(pos);
        }
        if !self.config.follow_links {
            return;
        }
        if let Some(link) = self.link_at(pos) {
            debug!(start = link.start, end = link.end, "link clicked");
            if let Some(callback) = self.on_click_link.as_mut() {
                callback(&link);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{MemoryBuffer, SelectionRange};
    use crate::syntax::{Color, Format, StyleRole};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn engine(mode: MarkupMode, text: &str) -> Markup<MemoryBuffer> {
        Markup::builder()
            .buffer(MemoryBuffer::new(text))
            .config(Config { mode, ..Config::default() })
            .build()
            .unwrap()
    }

    /// Host that counts format calls
    #[derive(Default)]
    struct RecordingBuffer {
        inner: MemoryBuffer,
        clears: usize,
        formats: usize,
    }

    impl HostBuffer for RecordingBuffer {
        fn text(&self) -> String {
            self.inner.text()
        }
        fn set_text(&mut self, text: &str) {
            self.inner.set_text(text)
        }
        fn insert_text(&mut self, offset: usize, text: &str) {
            self.inner.insert_text(offset, text)
        }
        fn remove_format(&mut self, start: usize, length: usize) {
            self.clears += 1;
            self.inner.remove_format(start, length)
        }
        fn format_range(&mut self, start: usize, length: usize, format: &Format) {
            self.formats += 1;
            self.inner.format_range(start, length, format)
        }
        fn set_selection(&mut self, offset: usize) {
            self.inner.set_selection(offset)
        }
        fn selection(&self) -> Option<SelectionRange> {
            self.inner.selection()
        }
    }

    const DOC: &str = "# Title\n\nSee [name](link) and **bold**.\n\n```\ncode\n```\n";

    #[test]
    fn test_missing_buffer() {
        let result = MarkupBuilder::<MemoryBuffer>::new().build();
        assert!(matches!(result, Err(MarkupError::HostUnavailable)));
    }

    #[test]
    fn test_toggle_bold_word() {
        let mut markup = engine(MarkupMode::Markdown, "test");
        markup.toggle_bold().unwrap();
        assert_eq!(markup.buffer().text(), "**test**");
        let bold = markup.style_sheet().format(StyleRole::Bold);
        assert_eq!(markup.buffer().format_at(3), Some(bold));
    }

    #[test]
    fn test_toggle_selection() {
        let mut markup = engine(MarkupMode::Asciidoc, "one two three");
        markup.buffer_mut().select(4, 3);
        markup.toggle_strike_through().unwrap();
        assert_eq!(markup.buffer().text(), "one [line-through]#two# three");
    }

    #[test]
    fn test_set_header() {
        let mut markup = engine(MarkupMode::Markdown, "hello");
        markup.set_header(1).unwrap();
        assert_eq!(markup.buffer().text(), "# hello");
        let h1 = markup.style_sheet().format(StyleRole::H1);
        assert_eq!(markup.buffer().format_at(0), Some(h1));
    }

    #[test]
    fn test_unsupported_operations_are_noops() {
        let mut markup = engine(MarkupMode::Text, "hello");
        markup.toggle_bold().unwrap();
        markup.set_header(2).unwrap();
        markup.insert_code_block().unwrap();
        assert_eq!(markup.buffer().text(), "hello");

        let mut markup = engine(MarkupMode::RestructuredText, "hello");
        markup.toggle_underline().unwrap();
        assert_eq!(markup.buffer().text(), "hello");
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut markup = engine(MarkupMode::Markdown, "a  b");
        markup.buffer_mut().set_selection(2);
        markup.toggle_italic().unwrap();
        assert_eq!(markup.buffer().text(), "a  b");

        markup.buffer_mut().clear_selection();
        markup.toggle_italic().unwrap();
        assert_eq!(markup.buffer().text(), "a  b");
    }

    #[test]
    fn test_insert_code_block() {
        let mut markup = engine(MarkupMode::Markdown, "");
        markup.insert_code_block().unwrap();
        assert_eq!(markup.buffer().text(), "```\n\n```");
        assert_eq!(markup.buffer().selection().unwrap().index, 4);
    }

    #[test]
    fn test_highlighting_keeps_text() {
        let mut markup = engine(MarkupMode::Markdown, DOC);
        markup.refresh();
        markup.handle_change(0, DOC.len());
        assert_eq!(markup.buffer().text(), DOC);
        assert_eq!(markup.buffer().len(), DOC.len());
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut markup = engine(MarkupMode::Markdown, DOC);
        let first = markup.buffer().spans();
        markup.refresh();
        assert_eq!(markup.buffer().spans(), first);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_mode_switch_on_empty_content() {
        let mut markup = Markup::builder()
            .buffer(RecordingBuffer::default())
            .build()
            .unwrap();
        markup.buffer_mut().clears = 0;
        markup.buffer_mut().formats = 0;

        markup.set_mode_name("text").unwrap();
        markup.set_mode_name("markdown").unwrap();
        assert_eq!(markup.mode(), MarkupMode::Markdown);
        assert_eq!(markup.buffer().clears, 2);
        assert_eq!(markup.buffer().formats, 0);
    }

    #[test]
    fn test_unknown_mode() {
        let mut markup = engine(MarkupMode::Markdown, "");
        assert!(matches!(
            markup.set_mode_name("richtext"),
            Err(MarkupError::UnknownMode(_))
        ));
        assert_eq!(markup.mode(), MarkupMode::Markdown);
    }

    #[test]
    fn test_link_click_routing() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let links = Rc::new(RefCell::new(Vec::new()));
        let (c, l) = (Rc::clone(&clicks), Rc::clone(&links));

        let mut markup = Markup::builder()
            .buffer(MemoryBuffer::new(DOC))
            .config(Config { mode: MarkupMode::Markdown, ..Config::default() })
            .on_click(move |pos| c.borrow_mut().push(pos))
            .on_click_link(move |link: &LinkSpan| l.borrow_mut().push(link.text.clone()))
            .build()
            .unwrap();

        let on_link = DOC.find("name").unwrap();
        markup.click(on_link);
        markup.click(2);

        assert_eq!(*clicks.borrow(), vec![on_link, 2]);
        assert_eq!(*links.borrow(), vec!["[name](link)".to_string()]);
    }

    #[test]
    fn test_links_not_followed_when_disabled() {
        let links = Rc::new(RefCell::new(0));
        let l = Rc::clone(&links);
        let mut markup = Markup::builder()
            .buffer(MemoryBuffer::new("[name](link)"))
            .config(Config {
                mode: MarkupMode::Markdown,
                follow_links: false,
                ..Config::default()
            })
            .on_click_link(move |_: &LinkSpan| *l.borrow_mut() += 1)
            .build()
            .unwrap();
        markup.click(2);
        assert_eq!(*links.borrow(), 0);
    }

    #[test]
    fn test_moved_link_is_found_again() {
        let mut markup = engine(MarkupMode::Markdown, "[name](link)");
        assert_eq!(markup.link_at(3).unwrap().start, 0);

        markup.buffer_mut().insert_text(0, "xx");
        let link = markup.link_at(3).unwrap();
        assert_eq!((link.start, link.end), (2, 14));
        assert_eq!(markup.links(), &[link]);

        markup.buffer_mut().set_text("plain words here");
        assert!(markup.link_at(3).is_none());
        assert!(markup.links().is_empty());
    }

    #[test]
    fn test_link_click_after_edit_above() {
        let doc = "one\ntwo\nthree\nfour\nfive\nsix\nseven\n[name](link)\n";
        let links = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&links);
        let mut markup = Markup::builder()
            .buffer(MemoryBuffer::new(doc))
            .config(Config { mode: MarkupMode::Markdown, ..Config::default() })
            .on_click_link(move |link: &LinkSpan| l.borrow_mut().push(link.start))
            .build()
            .unwrap();

        let t0 = Instant::now();
        markup.buffer_mut().insert_text(0, "x");
        markup.buffer_mut().set_selection(1);
        markup.on_text_change(t0);
        markup.tick(t0 + Duration::from_millis(300));
        markup.tick(t0 + Duration::from_millis(5000));

        let text = markup.buffer().text();
        let on_link = text.find("name").unwrap();
        markup.click(on_link);
        assert_eq!(*links.borrow(), vec![on_link - 1]);
    }

    #[test]
    fn test_debounced_edit() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let c = Rc::clone(&changes);
        let mut markup = Markup::builder()
            .buffer(MemoryBuffer::new("hello\n"))
            .config(Config { mode: MarkupMode::Markdown, ..Config::default() })
            .on_change(move |text: &str| c.borrow_mut().push(text.to_string()))
            .build()
            .unwrap();

        let t0 = Instant::now();
        markup.buffer_mut().insert_text(0, "**");
        markup.buffer_mut().insert_text(7, "**");
        markup.buffer_mut().set_selection(9);
        markup.on_text_change(t0);
        assert_eq!(markup.scan_state(), ScanState::PendingRescan);
        assert!(!markup.tick(t0 + Duration::from_millis(100)));

        assert!(markup.tick(t0 + Duration::from_millis(250)));
        let bold = markup.style_sheet().format(StyleRole::Bold);
        assert_eq!(markup.buffer().format_at(4), Some(bold));
        assert_eq!(*changes.borrow(), vec!["**hello**\n".to_string()]);
    }

    #[test]
    fn test_edit_threshold_and_idle_refresh() {
        let mut markup = Markup::builder()
            .buffer(MemoryBuffer::new("text\n"))
            .config(Config {
                mode: MarkupMode::Markdown,
                dirty_edit_threshold: 2,
                ..Config::default()
            })
            .build()
            .unwrap();

        let t0 = Instant::now();
        for (i, ch) in ["a", "b", "c"].iter().enumerate() {
            markup.buffer_mut().insert_text(0, ch);
            markup.on_text_change(t0 + Duration::from_millis(i as u64));
        }
        assert!(markup.dirty_state().blocks_dirty);
        assert_eq!(markup.dirty_state().edit_counter, 3);

        assert!(markup.tick(t0 + Duration::from_millis(300)));
        assert!(markup.tick(t0 + Duration::from_millis(2500)));
        assert_eq!(markup.dirty_state().edit_counter, 0);
        assert!(!markup.dirty_state().blocks_dirty);
        assert_eq!(markup.next_deadline(), None);
    }

    #[test]
    fn test_paste_rescans_everything() {
        let mut markup = engine(MarkupMode::Markdown, "x\n");
        let t0 = Instant::now();
        markup.buffer_mut().insert_text(2, "# pasted\nline\n\n**far away**\n");
        markup.on_paste(t0);
        markup.on_text_change(t0);
        markup.tick(t0 + Duration::from_millis(250));

        let text = markup.buffer().text();
        let far = text.find("far").unwrap();
        let bold = markup.style_sheet().format(StyleRole::Bold);
        assert_eq!(markup.buffer().format_at(far), Some(bold));
    }

    #[test]
    fn test_set_style() {
        let mut markup = engine(MarkupMode::Markdown, "**b**");
        let overrides: HashMap<String, String> = [
            ("bold".to_string(), "#ff0000".to_string()),
            ("nonsense".to_string(), "#00ff00".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(markup.set_style(&overrides), 1);
        let format = markup.buffer().format_at(2).unwrap();
        assert_eq!(format.color, Color::hex(0xff0000));
        assert!(format.bold);
    }

    #[test]
    fn test_set_theme() {
        let mut markup = engine(MarkupMode::Markdown, "plain words");
        markup.set_theme(MarkupStyle::Monokai);
        assert_eq!(markup.style_sheet().theme(), MarkupStyle::Monokai);
        assert_eq!(markup.style_sheet().background(), Color::hex(0x272822));
    }

    #[test]
    fn test_set_content() {
        let mut markup = engine(MarkupMode::Markdown, "[a](b)");
        markup.set_content("plain");
        assert_eq!(markup.buffer().text(), "plain");
        assert!(markup.links().is_empty());
        assert!(markup.buffer().spans().is_empty());
    }

    #[test]
    fn test_modes() {
        let markup = engine(MarkupMode::Text, "");
        assert_eq!(
            markup.modes(),
            vec!["asciidoc", "markdown", "restructuredtext", "text"]
        );
    }
}
