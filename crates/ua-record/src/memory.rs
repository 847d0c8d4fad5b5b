//! In-memory backend with a bounded history.

use std::collections::VecDeque;

use crate::writer::TraceWriter;
use crate::{EventRow, RecordResult, ThinkRecord};

/// Keeps the most recent `capacity` think records and events.
///
/// Older entries are dropped first.  A capacity of zero keeps nothing.
#[derive(Debug, Clone)]
pub struct MemoryWriter {
    capacity: usize,
    thinks:   VecDeque<ThinkRecord>,
    events:   VecDeque<EventRow>,
}

impl MemoryWriter {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            thinks: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn thinks(&self) -> impl Iterator<Item = &ThinkRecord> {
        self.thinks.iter()
    }

    /// Oldest first.
    pub fn events(&self) -> impl Iterator<Item = &EventRow> {
        self.events.iter()
    }

    pub fn latest_think(&self) -> Option<&ThinkRecord> {
        self.thinks.back()
    }

    /// Think record of frame `tick`, if still held.
    pub fn think_at(&self, tick: u64) -> Option<&ThinkRecord> {
        self.thinks.iter().rev().find(|r| r.tick == tick)
    }

    pub fn clear(&mut self) {
        self.thinks.clear();
        self.events.clear();
    }
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded<T>(queue: &mut VecDeque<T>, capacity: usize, item: T) {
    if capacity == 0 {
        return;
    }
    while queue.len() >= capacity {
        queue.pop_front();
    }
    queue.push_back(item);
}

impl TraceWriter for MemoryWriter {
    fn write_think(&mut self, record: &ThinkRecord) -> RecordResult<()> {
        push_bounded(&mut self.thinks, self.capacity, record.clone());
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> RecordResult<()> {
        push_bounded(&mut self.events, self.capacity, row.clone());
        Ok(())
    }

    fn finish(&mut self) -> RecordResult<()> {
        Ok(())
    }
}
