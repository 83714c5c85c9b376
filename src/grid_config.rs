use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display, Formatter};

use bit_set::BitSet;
use smallvec::SmallVec;

use crate::arc_consistency::Arc;
use crate::domains::Domains;
use crate::errors::GridError;
use crate::word_list::WordList;
use crate::{GridCoord, SlotId, MAX_SLOT_LENGTH};

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A run of cells that needs one word. Slots are ordered by start cell, then direction, then
/// length, and that order is what breaks ties during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at ({}, {}), length {}", self.direction, self.row, self.col, self.length)
    }
}

impl Slot {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Slot {
        Slot { row, col, direction, length }
    }

    /// The coords of the cell at `cell_idx` within this slot.
    pub fn cell(&self, cell_idx: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        }
    }

    /// Whether every cell of this slot lies inside a `height` x `width` grid. Written so that a
    /// slot starting near `usize::MAX` can't wrap around into the grid.
    pub fn fits_within(&self, height: usize, width: usize) -> bool {
        if self.row >= height || self.col >= width {
            return false;
        }
        match self.direction {
            Direction::Across => self.length <= width - self.col,
            Direction::Down => self.length <= height - self.row,
        }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cell_coords(&self) -> Vec<GridCoord> {
        (0..self.length).map(|cell_idx| self.cell(cell_idx)).collect()
    }
}

/// A crossing between one slot and another: the cell index within this slot, the other slot's
/// id, and the location of the intersection within the other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub cell: usize,
    pub other_slot_id: SlotId,
    pub other_slot_cell: usize,
}

/// The aspects of a slot that are static during filling.
pub struct SlotConfig {
    pub id: SlotId,
    pub slot: Slot,

    /// Crossings sorted by `cell`.
    pub crossings: SmallVec<[Crossing; MAX_SLOT_LENGTH]>,

    /// Ids of every slot that appears in `crossings`.
    pub neighbors: BitSet,
}

impl Debug for SlotConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotConfig")
            .field("id", &self.id)
            .field("slot", &self.slot)
            .field("crossings", &self.crossings)
            .finish()
    }
}

/// Read-only description of the slots to fill and which letters they share. Built once per
/// puzzle and never changed by a fill.
#[derive(Debug)]
pub struct ConstraintGraph {
    slot_configs: Vec<SlotConfig>,
    ids_by_slot: HashMap<Slot, SlotId>,
}

impl ConstraintGraph {
    /// Build a graph for slots laid out in a `height` x `width` grid. Two slots overlap when they
    /// cover a common cell, and the offsets are each slot's index of that cell.
    pub fn new(height: usize, width: usize, slots: Vec<Slot>) -> Result<ConstraintGraph, GridError> {
        validate_slots(&slots)?;

        for &slot in &slots {
            if !slot.fits_within(height, width) {
                return Err(GridError::SlotOutOfBounds { slot, height, width });
            }
        }

        // Map each covered cell to the (slot id, cell index) pairs that pass through it. A
        // BTreeMap keeps error reporting stable from run to run.
        let mut entries_by_cell: BTreeMap<GridCoord, SmallVec<[(SlotId, usize); 2]>> =
            BTreeMap::new();
        for (slot_id, slot) in slots.iter().enumerate() {
            for (cell_idx, loc) in slot.cell_coords().into_iter().enumerate() {
                entries_by_cell.entry(loc).or_default().push((slot_id, cell_idx));
            }
        }

        let mut overlaps: BTreeMap<(SlotId, SlotId), (usize, usize)> = BTreeMap::new();
        for (&(row, col), entries) in &entries_by_cell {
            match entries.as_slice() {
                [_] => {}
                [(first, first_cell), (second, second_cell)] => {
                    if overlaps.insert((*first, *second), (*first_cell, *second_cell)).is_some() {
                        return Err(GridError::SlotsShareMultipleCells {
                            first: *first,
                            second: *second,
                        });
                    }
                }
                _ => return Err(GridError::TooManySlotsInCell { row, col }),
            }
        }

        Ok(ConstraintGraph::build(slots, overlaps))
    }

    /// Build a graph from an explicit overlap relation, where `((x, y), (p, q))` means the `p`-th
    /// letter of slot `x` must equal the `q`-th letter of slot `y`. Each pair may be given in
    /// either direction, or both as long as the offsets agree.
    pub fn with_overlaps<I>(slots: Vec<Slot>, overlaps: I) -> Result<ConstraintGraph, GridError>
    where
        I: IntoIterator<Item = ((SlotId, SlotId), (usize, usize))>,
    {
        validate_slots(&slots)?;

        let mut normalized: BTreeMap<(SlotId, SlotId), (usize, usize)> = BTreeMap::new();
        for ((x, y), (p, q)) in overlaps {
            for (slot_id, offset) in [(x, p), (y, q)] {
                let slot = slots.get(slot_id).ok_or(GridError::UnknownSlot { slot_id })?;
                if offset >= slot.length {
                    return Err(GridError::OffsetOutOfRange {
                        slot_id,
                        offset,
                        length: slot.length,
                    });
                }
            }
            if x == y {
                return Err(GridError::SelfOverlap { slot_id: x });
            }

            let (key, offsets) = if x < y { ((x, y), (p, q)) } else { ((y, x), (q, p)) };
            match normalized.get(&key) {
                Some(&existing) if existing != offsets => {
                    return Err(GridError::ConflictingOverlap { first: key.0, second: key.1 });
                }
                _ => {
                    normalized.insert(key, offsets);
                }
            }
        }

        Ok(ConstraintGraph::build(slots, normalized))
    }

    fn build(slots: Vec<Slot>, overlaps: BTreeMap<(SlotId, SlotId), (usize, usize)>) -> ConstraintGraph {
        let mut slot_configs: Vec<SlotConfig> = slots
            .iter()
            .enumerate()
            .map(|(id, &slot)| SlotConfig {
                id,
                slot,
                crossings: SmallVec::new(),
                neighbors: BitSet::with_capacity(slots.len()),
            })
            .collect();

        for (&(x, y), &(p, q)) in &overlaps {
            slot_configs[x].crossings.push(Crossing { cell: p, other_slot_id: y, other_slot_cell: q });
            slot_configs[x].neighbors.insert(y);
            slot_configs[y].crossings.push(Crossing { cell: q, other_slot_id: x, other_slot_cell: p });
            slot_configs[y].neighbors.insert(x);
        }

        for slot_config in &mut slot_configs {
            slot_config.crossings.sort_by_key(|crossing| (crossing.cell, crossing.other_slot_id));
        }

        let ids_by_slot = slots.into_iter().enumerate().map(|(id, slot)| (slot, id)).collect();

        ConstraintGraph { slot_configs, ids_by_slot }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_configs.len()
    }

    pub fn slot_configs(&self) -> &[SlotConfig] {
        &self.slot_configs
    }

    pub fn slot(&self, slot_id: SlotId) -> &Slot {
        &self.slot_configs[slot_id].slot
    }

    pub fn slot_id(&self, slot: &Slot) -> Option<SlotId> {
        self.ids_by_slot.get(slot).copied()
    }

    pub fn length(&self, slot_id: SlotId) -> usize {
        self.slot_configs[slot_id].slot.length
    }

    pub fn direction(&self, slot_id: SlotId) -> Direction {
        self.slot_configs[slot_id].slot.direction
    }

    /// If `x` and `y` cross, return `(p, q)` such that letter `p` of `x` must equal letter `q`
    /// of `y`.
    pub fn overlaps(&self, x: SlotId, y: SlotId) -> Option<(usize, usize)> {
        self.slot_configs[x]
            .crossings
            .iter()
            .find(|crossing| crossing.other_slot_id == y)
            .map(|crossing| (crossing.cell, crossing.other_slot_cell))
    }

    pub fn neighbors(&self, slot_id: SlotId) -> &BitSet {
        &self.slot_configs[slot_id].neighbors
    }

    pub fn degree(&self, slot_id: SlotId) -> usize {
        self.slot_configs[slot_id].neighbors.len()
    }

    /// Every arc in the graph, in both directions, ordered by slot id.
    pub fn arcs(&self) -> Vec<Arc> {
        self.slot_configs
            .iter()
            .flat_map(|slot_config| {
                slot_config.crossings.iter().map(move |crossing| Arc {
                    slot_id: slot_config.id,
                    other_slot_id: crossing.other_slot_id,
                })
            })
            .collect()
    }

    /// Build the initial domains: each slot gets exactly the words whose length matches its own.
    /// This is the only unary constraint, so it's applied once up front and never again.
    pub fn enforce_node_consistency(&self, word_list: &WordList) -> Domains {
        let mut word_ids_by_length: HashMap<usize, BitSet> = HashMap::new();
        for (word_id, word) in word_list.iter() {
            word_ids_by_length
                .entry(word.len())
                .or_insert_with(|| BitSet::with_capacity(word_list.len()))
                .insert(word_id);
        }

        Domains::new(
            self.slot_configs
                .iter()
                .map(|slot_config| {
                    word_ids_by_length
                        .get(&slot_config.slot.length)
                        .cloned()
                        .unwrap_or_default()
                })
                .collect(),
        )
    }
}

fn validate_slots(slots: &[Slot]) -> Result<(), GridError> {
    let mut seen: HashMap<Slot, SlotId> = HashMap::with_capacity(slots.len());
    for (slot_id, &slot) in slots.iter().enumerate() {
        if slot.length == 0 {
            return Err(GridError::ZeroLengthSlot { slot });
        }
        if seen.insert(slot, slot_id).is_some() {
            return Err(GridError::DuplicateSlot { slot });
        }
    }
    Ok(())
}
