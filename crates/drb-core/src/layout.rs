//! Cascading layout policy.
//!
//! The root is pinned at an anchor; every later node goes into a single
//! column, one row further down per node already in the diagram. Positions
//! are assigned once and never recomputed.

use crate::model::Position;
use serde::{Deserialize, Serialize};

/// Layout constants for the cascading column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Where the DrugReview root is placed.
    pub anchor: Position,
    /// X coordinate of every non-root node.
    pub column_x: f32,
    /// Y offset of the column before any rows.
    pub base_offset: f32,
    pub row_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor: Position::new(250.0, 0.0),
            column_x: 300.0,
            base_offset: 200.0,
            row_height: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Position for the next node, given the node count before the append.
    pub fn position_for(&self, existing: usize) -> Position {
        if existing == 0 {
            return self.anchor;
        }
        Position::new(
            self.column_x,
            self.base_offset + existing as f32 * self.row_height,
        )
    }
}
