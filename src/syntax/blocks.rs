//! Block tracking
//!
//! Records every block construct found by the block pass, keyed both by
//! start offset and by content hash, so later scans can tell new or edited
//! blocks apart from ones that merely moved or did not change at all.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

/// A block construct seen on a previous scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
    /// Hash of the block text
    pub hash: u64,
}

/// How a block found by the current scan relates to the stored records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// Nothing was recorded at this offset
    New,
    /// A block was recorded at this offset with different content
    Changed,
    /// Same content at the same offset
    Unchanged,
    /// Same content, previously recorded at another offset
    Moved,
}

impl BlockStatus {
    /// Whether the block must be formatted again
    pub fn is_dirty(&self) -> bool {
        matches!(self, BlockStatus::New | BlockStatus::Changed)
    }
}

/// Hash the text of a block
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Block records retained across scans
#[derive(Debug, Default)]
pub struct BlockTracker {
    by_offset: BTreeMap<usize, BlockRecord>,
    by_hash: HashMap<u64, BTreeSet<usize>>,
    /// Start offsets confirmed by the scan in progress
    seen: BTreeSet<usize>,
}

impl BlockTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded blocks
    pub fn len(&self) -> usize {
        self.by_offset.len()
    }

    /// Check if no blocks are recorded
    pub fn is_empty(&self) -> bool {
        self.by_offset.is_empty()
    }

    /// Recorded blocks in offset order
    pub fn records(&self) -> impl Iterator<Item = &BlockRecord> {
        self.by_offset.values()
    }

    /// Record at a start offset
    pub fn get(&self, start: usize) -> Option<&BlockRecord> {
        self.by_offset.get(&start)
    }

    /// Forget every block
    pub fn clear(&mut self) {
        self.by_offset.clear();
        self.by_hash.clear();
        self.seen.clear();
    }

    /// Start a scan
    pub fn begin_scan(&mut self) {
        self.seen.clear();
    }

    /// Record a block found by the current scan and classify it
    pub fn observe(&mut self, start: usize, end: usize, hash: u64) -> BlockStatus {
        let status = match self.by_offset.get(&start) {
            Some(record) if record.hash == hash => BlockStatus::Unchanged,
            Some(_) => BlockStatus::Changed,
            None => match self.moved_from(hash) {
                Some(old) => {
                    self.remove(old);
                    BlockStatus::Moved
                }
                None => BlockStatus::New,
            },
        };

        if status != BlockStatus::Unchanged {
            self.remove(start);
            self.insert(BlockRecord { start, end, hash });
        }
        self.seen.insert(start);
        status
    }

    /// Finish a scan, dropping and returning the records it did not confirm
    pub fn end_scan(&mut self) -> Vec<BlockRecord> {
        let stale: Vec<usize> = self
            .by_offset
            .keys()
            .filter(|start| !self.seen.contains(start))
            .copied()
            .collect();

        let removed = stale.into_iter().filter_map(|start| self.remove(start)).collect();
        self.seen.clear();
        removed
    }

    /// An unconfirmed record with the same content at another offset
    fn moved_from(&self, hash: u64) -> Option<usize> {
        self.by_hash
            .get(&hash)?
            .iter()
            .find(|start| !self.seen.contains(start))
            .copied()
    }

    fn insert(&mut self, record: BlockRecord) {
        self.by_hash.entry(record.hash).or_default().insert(record.start);
        self.by_offset.insert(record.start, record);
    }

    fn remove(&mut self, start: usize) -> Option<BlockRecord> {
        let record = self.by_offset.remove(&start)?;
        if let Some(offsets) = self.by_hash.get_mut(&record.hash) {
            offsets.remove(&start);
            if offsets.is_empty() {
                self.by_hash.remove(&record.hash);
            }
        }
        Some(record)
    }
}
