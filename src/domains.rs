use bit_set::BitSet;

use crate::{SlotId, WordId};

/// The live candidate words for each slot, as a set of word ids per slot id.
///
/// Every set is owned by the store, so `snapshot` is a deep copy and a later `restore` brings
/// back exactly the domains that existed when the snapshot was taken, no matter what happened to
/// the live sets in between.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains {
    sets: Vec<BitSet>,
}

/// Saved copy of a `Domains` store. It's consumed by `Domains::restore`, so each snapshot is
/// restored at most once, by whoever took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSnapshot {
    sets: Vec<BitSet>,
}

impl Domains {
    pub fn new(sets: Vec<BitSet>) -> Domains {
        Domains { sets }
    }

    pub fn slot_count(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, slot_id: SlotId) -> &BitSet {
        &self.sets[slot_id]
    }

    pub fn len(&self, slot_id: SlotId) -> usize {
        self.sets[slot_id].len()
    }

    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.sets[slot_id].is_empty()
    }

    pub fn contains(&self, slot_id: SlotId, word_id: WordId) -> bool {
        self.sets[slot_id].contains(word_id)
    }

    /// Replace the candidate set for a slot.
    pub fn restrict(&mut self, slot_id: SlotId, words: BitSet) {
        self.sets[slot_id] = words;
    }

    /// Drop a single candidate, returning whether it was present.
    pub fn remove(&mut self, slot_id: SlotId, word_id: WordId) -> bool {
        self.sets[slot_id].remove(word_id)
    }

    /// The lowest slot id whose domain is empty, if any.
    pub fn first_empty_slot(&self) -> Option<SlotId> {
        self.sets.iter().position(|set| set.is_empty())
    }

    pub fn total_candidates(&self) -> usize {
        self.sets.iter().map(|set| set.len()).sum()
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot { sets: self.sets.clone() }
    }

    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.sets = snapshot.sets;
    }
}
