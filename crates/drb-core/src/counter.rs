//! Per-source answer sequence numbers.
//!
//! Every answer attached to a source gets the next number in that source's
//! sequence, whichever action added it, so answer ids never collide.

use crate::id::NodeId;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Next answer sequence number per source node. Entries are created on
/// first use and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerCounter {
    next: HashMap<NodeId, u32>,
}

impl AnswerCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `how_many` sequence numbers for `source`, starting at 1 the
    /// first time the source is seen.
    pub fn next_sequence(&mut self, source: NodeId, how_many: u32) -> RangeInclusive<u32> {
        let entry = self.next.entry(source).or_insert(1);
        let first = *entry;
        *entry = first + how_many;
        first..=first + how_many - 1
    }

    /// The number the next answer on `source` would get, if it has any yet.
    pub fn get(&self, source: NodeId) -> Option<u32> {
        self.next.get(&source).copied()
    }
}
