//! Queue of promoted batches waiting to be pulled.

use crate::filter::BufferedEntry;
use std::collections::VecDeque;

/// FIFO of batches released by triggers.
#[derive(Debug, Clone, Default)]
pub struct DispatchQueue {
    entries: VecDeque<BufferedEntry>,
}

impl DispatchQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries in the order given.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = BufferedEntry>) {
        self.entries.extend(entries);
    }

    /// Remove and return the oldest entry.
    pub fn pop_front(&mut self) -> Option<BufferedEntry> {
        self.entries.pop_front()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ImageBatch;
    use chrono::{TimeDelta, Utc};

    #[test]
    fn test_fifo_order() {
        let now = Utc::now();
        let mut queue = DispatchQueue::new();
        queue.extend([
            BufferedEntry::new(ImageBatch::new(Vec::new(), now)),
            BufferedEntry::new(ImageBatch::new(Vec::new(), now - TimeDelta::seconds(5))),
        ]);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_front().map(|e| e.captured_at), Some(now));
        assert_eq!(
            queue.pop_front().map(|e| e.captured_at),
            Some(now - TimeDelta::seconds(5))
        );
        assert!(queue.pop_front().is_none());
        assert!(queue.is_empty());
    }
}
