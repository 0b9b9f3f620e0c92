//! Dirty-region coordinator
//!
//! Decides how much of the document to rescan after edits. Keystrokes are
//! debounced: each edit pushes the debounce deadline back and the rescan
//! covers the window where editing started. A longer idle deadline refreshes
//! the tracked blocks once enough edits have piled up.
//!
//! The coordinator holds no clock. Callers pass the current instant in and
//! poll for due work with [`Coordinator::poll`].

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::Config;

/// Scan scheduling state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    /// An edit is waiting for the debounce deadline
    PendingRescan,
    /// A scan is being applied
    Scanning,
}

/// Counters and flags accumulated between scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyState {
    /// Edits since the last idle refresh
    pub edit_counter: u32,
    /// The idle deadline passed with no further activity
    pub idle: bool,
    /// Tracked blocks may be out of date
    pub blocks_dirty: bool,
    /// The edit window still needs an inline pass
    pub inline_dirty: bool,
}

/// Work the coordinator wants done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRequest {
    /// Rescan the whole document
    Full,
    /// Rescan a range (exclusive end)
    Range { start: usize, end: usize },
    /// Refresh new or changed blocks only
    DirtyBlocks,
}

/// Debounce and idle scheduling
#[derive(Debug, Clone)]
pub struct Coordinator {
    state: ScanState,
    dirty: DirtyState,
    threshold: u32,
    debounce_delay: Duration,
    idle_delay: Duration,
    idle_full_rescan: bool,
    debounce_deadline: Option<Instant>,
    idle_deadline: Option<Instant>,
    paste_pending: bool,
    /// Section around the cursor at the last selection change
    current: Option<(usize, usize)>,
    /// Range to rescan when the debounce deadline fires
    edit_target: Option<(usize, usize)>,
}

impl Coordinator {
    /// Create a coordinator using the timing settings from `config`
    pub fn new(config: &Config) -> Self {
        Self {
            state: ScanState::Idle,
            dirty: DirtyState::default(),
            threshold: config.dirty_edit_threshold.max(1),
            debounce_delay: config.debounce_delay(),
            idle_delay: config.idle_delay(),
            idle_full_rescan: config.idle_full_rescan,
            debounce_deadline: None,
            idle_deadline: None,
            paste_pending: false,
            current: None,
            edit_target: None,
        }
    }

    /// Current scheduling state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Accumulated dirty flags
    pub fn dirty(&self) -> DirtyState {
        self.dirty
    }

    /// Record a text change whose surrounding window is `section`
    pub fn on_text_change(&mut self, now: Instant, section: (usize, usize)) {
        self.dirty.edit_counter += 1;
        self.dirty.inline_dirty = true;
        self.dirty.idle = false;
        if self.dirty.edit_counter > self.threshold && !self.dirty.blocks_dirty {
            debug!(edits = self.dirty.edit_counter, "edit threshold passed, blocks dirty");
            self.dirty.blocks_dirty = true;
        }

        let target = self.edit_target.or(self.current).unwrap_or(section);
        self.edit_target = Some((target.0.min(section.0), target.1.max(section.1)));

        self.debounce_deadline = Some(now + self.debounce_delay);
        self.idle_deadline = Some(now + self.idle_delay);
        if self.state != ScanState::Scanning {
            self.state = ScanState::PendingRescan;
        }
    }

    /// Flag the pending change as a paste, which is rescanned in full
    pub fn on_paste(&mut self, now: Instant) {
        self.paste_pending = true;
        self.debounce_deadline = Some(now + self.debounce_delay);
        if self.state != ScanState::Scanning {
            self.state = ScanState::PendingRescan;
        }
    }

    /// Cache the section around a new cursor position; no rescan
    pub fn on_selection_change(&mut self, start: usize, end: usize) {
        self.current = Some((start.min(end), start.max(end)));
    }

    /// Postpone the idle deadline
    pub fn on_user_activity(&mut self, now: Instant) {
        self.dirty.idle = false;
        if self.idle_deadline.is_some() {
            self.idle_deadline = Some(now + self.idle_delay);
        }
    }

    /// Mark tracked blocks as needing a refresh
    ///
    /// Ignored outside an edit cycle, where the scan that found the blocks
    /// has already formatted them.
    pub fn mark_blocks_dirty(&mut self) {
        if self.idle_deadline.is_none() {
            trace!("new blocks outside an edit cycle");
            return;
        }
        self.dirty.blocks_dirty = true;
    }

    /// Take the work that is due at `now`, if any
    ///
    /// The debounce deadline is served before the idle deadline. Nothing is
    /// returned while a scan is in progress.
    pub fn poll(&mut self, now: Instant) -> Option<ScanRequest> {
        if self.state == ScanState::Scanning {
            return None;
        }

        if self.debounce_deadline.is_some_and(|d| now >= d) {
            self.debounce_deadline = None;
            self.state = ScanState::Idle;
            self.dirty.inline_dirty = false;
            let target = self.edit_target.take();
            if std::mem::take(&mut self.paste_pending) {
                debug!("debounce fired after paste");
                return Some(ScanRequest::Full);
            }
            if let Some((start, end)) = target {
                trace!(start, end, "debounce fired");
                return Some(ScanRequest::Range { start, end });
            }
        }

        if self.idle_deadline.is_some_and(|d| now >= d) {
            self.idle_deadline = None;
            let blocks_dirty = self.dirty.blocks_dirty;
            self.dirty = DirtyState {
                idle: true,
                ..DirtyState::default()
            };
            if blocks_dirty {
                debug!(full = self.idle_full_rescan, "idle refresh");
                return Some(if self.idle_full_rescan {
                    ScanRequest::Full
                } else {
                    ScanRequest::DirtyBlocks
                });
            }
        }

        None
    }

    /// Enter the scanning state; false if a scan is already running
    pub fn begin_scan(&mut self) -> bool {
        if self.state == ScanState::Scanning {
            return false;
        }
        self.state = ScanState::Scanning;
        true
    }

    /// Leave the scanning state
    pub fn finish_scan(&mut self) {
        self.state = if self.debounce_deadline.is_some() {
            ScanState::PendingRescan
        } else {
            ScanState::Idle
        };
    }

    /// Drop all pending work and counters
    pub fn reset(&mut self) {
        let scanning = self.state == ScanState::Scanning;
        self.dirty = DirtyState::default();
        self.debounce_deadline = None;
        self.idle_deadline = None;
        self.paste_pending = false;
        self.edit_target = None;
        self.state = if scanning { ScanState::Scanning } else { ScanState::Idle };
    }

    /// Earliest instant at which [`Coordinator::poll`] has work
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce_deadline, self.idle_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
