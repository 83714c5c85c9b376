//! Errors for malformed input. These are raised while building a `ConstraintGraph` or reading a
//! grid template, never during a fill: an unsatisfiable puzzle is a normal `FillFailure`, not an
//! error.

use std::io;

use crate::grid_config::Slot;
use crate::SlotId;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("slot {slot} has zero length")]
    ZeroLengthSlot { slot: Slot },

    #[error("slot {slot} extends outside the {height}x{width} grid")]
    SlotOutOfBounds {
        slot: Slot,
        height: usize,
        width: usize,
    },

    #[error("slot {slot} appears more than once")]
    DuplicateSlot { slot: Slot },

    #[error("slots {first} and {second} share more than one cell")]
    SlotsShareMultipleCells { first: SlotId, second: SlotId },

    #[error("more than two slots cover cell ({row}, {col})")]
    TooManySlotsInCell { row: usize, col: usize },

    #[error("unknown slot id {slot_id}")]
    UnknownSlot { slot_id: SlotId },

    #[error("slot {slot_id} cannot overlap itself")]
    SelfOverlap { slot_id: SlotId },

    #[error("overlap offset {offset} is outside slot {slot_id} (length {length})")]
    OffsetOutOfRange {
        slot_id: SlotId,
        offset: usize,
        length: usize,
    },

    #[error("conflicting overlaps given for slots {first} and {second}")]
    ConflictingOverlap { first: SlotId, second: SlotId },

    #[error("grid template is empty")]
    EmptyTemplate,

    #[error("grid template row {row} has width {found}, expected {expected}")]
    RaggedTemplate {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {found:?} in grid template at row {row}, column {col}")]
    InvalidTemplateChar { found: char, row: usize, col: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
