//! Crossword-construction solver: fills a fixed set of word slots from a vocabulary so that every
//! pair of crossing slots agrees on the shared letter.
//!
//! The core is a constraint-satisfaction engine made of a `Domains` store, a read-only
//! `ConstraintGraph`, an AC-3 propagation pass, and a recursive backtracking search that maintains
//! arc consistency after every tentative choice. The `template` and `render` modules are thin
//! collaborators for turning a text grid into slots and a filled assignment back into text.

pub mod arc_consistency;
pub mod backtracking_search;
pub mod domains;
pub mod errors;
pub mod grid_config;
pub mod logging;
pub mod render;
pub mod template;
pub mod word_list;

/// The expected maximum length for a single slot. Longer slots are fine; this is only the inline
/// capacity of the per-slot small vectors.
pub const MAX_SLOT_LENGTH: usize = 21;

/// An identifier for a given slot, based on its index in the `ConstraintGraph`'s `slot_configs`
/// field. This is also the index used by `Domains` and `Assignment`.
pub type SlotId = usize;

/// An identifier for a given word, based on its index in the (sorted) `WordList`.
pub type WordId = usize;

/// Zero-indexed row and column for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

pub use arc_consistency::{
    enforce_arc_consistency, revise, Arc, ArcConsistencyFailure, ArcConsistencyResult,
    ArcConsistencySuccess,
};
pub use backtracking_search::{
    find_fill, solve, Assignment, Choice, FillFailure, FillSuccess, SolverConfig, Statistics,
};
pub use domains::{DomainSnapshot, Domains};
pub use errors::GridError;
pub use grid_config::{ConstraintGraph, Crossing, Direction, Slot, SlotConfig};
pub use render::{letter_grid, render_grid};
pub use template::{
    load_template, load_word_list, parse_template, parse_word_list, GridTemplate,
};
pub use word_list::{Word, WordList};
