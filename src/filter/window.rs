//! Trailing window of suppressed batches.

use crate::camera::ImageBatch;
use chrono::{DateTime, TimeDelta, Utc};

/// A suppressed batch held until it ages out or a trigger releases it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedEntry {
    /// The frames as they were pulled.
    pub batch: ImageBatch,
    /// Capture time used for ordering and pruning.
    pub captured_at: DateTime<Utc>,
}

impl BufferedEntry {
    /// Wrap a batch, keyed on the batch's own capture time.
    pub fn new(batch: ImageBatch) -> Self {
        let captured_at = batch.captured_at;
        Self { batch, captured_at }
    }
}

/// Recently suppressed batches no older than the window.
///
/// Insertion order is not assumed to be chronological: capture times come
/// from the frame source, not from the order calls arrive in.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    entries: Vec<BufferedEntry>,
    window: TimeDelta,
}

impl WindowBuffer {
    /// Create an empty buffer retaining `window` worth of entries.
    pub fn new(window: TimeDelta) -> Self {
        Self {
            entries: Vec::new(),
            window,
        }
    }

    /// Whether buffering is enabled at all.
    pub fn is_enabled(&self) -> bool {
        self.window > TimeDelta::zero()
    }

    /// Sort by capture time and drop every entry at or before `now - window`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.entries.sort_by_key(|e| e.captured_at);

        let cutoff = now
            .checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let stale = self
            .entries
            .iter()
            .position(|e| e.captured_at > cutoff)
            .unwrap_or(self.entries.len());
        self.entries.drain(..stale);
    }

    /// Append an entry without pruning.
    pub fn push(&mut self, entry: BufferedEntry) {
        self.entries.push(entry);
    }

    /// Remove and return every entry, leaving the buffer empty.
    pub fn take_all(&mut self) -> Vec<BufferedEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Entries in their current order.
    pub fn entries(&self) -> &[BufferedEntry] {
        &self.entries
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
