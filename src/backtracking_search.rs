//! This module implements grid-filling using a recursive backtracking search. Slots are chosen
//! with the minimum-remaining-values heuristic (ties broken by degree, then by slot order), words
//! are tried in least-constraining-value order, and every tentative choice is followed by an AC-3
//! pass seeded from the chosen slot ("maintaining arc consistency"). All pruning done on behalf
//! of a choice is rolled back from a snapshot if that choice doesn't lead to a fill.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use bit_set::BitSet;
use instant::{Duration, Instant};

use crate::arc_consistency::{enforce_arc_consistency, Arc, ArcConsistencyFailure};
use crate::domains::Domains;
use crate::grid_config::ConstraintGraph;
use crate::word_list::WordList;
use crate::{SlotId, WordId};

/// A struct recording a slot assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Choice {
    pub slot_id: SlotId,
    pub word_id: WordId,
}

/// The words chosen so far, indexed by slot id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    word_ids: Vec<Option<WordId>>,
    count: usize,
}

impl Assignment {
    pub fn new(slot_count: usize) -> Assignment {
        Assignment { word_ids: vec![None; slot_count], count: 0 }
    }

    pub fn get(&self, slot_id: SlotId) -> Option<WordId> {
        self.word_ids[slot_id]
    }

    pub fn is_assigned(&self, slot_id: SlotId) -> bool {
        self.word_ids[slot_id].is_some()
    }

    /// Assign a word to a slot, returning the word it replaced, if any.
    pub fn insert(&mut self, slot_id: SlotId, word_id: WordId) -> Option<WordId> {
        let previous = self.word_ids[slot_id].replace(word_id);
        if previous.is_none() {
            self.count += 1;
        }
        previous
    }

    pub fn remove(&mut self, slot_id: SlotId) -> Option<WordId> {
        let previous = self.word_ids[slot_id].take();
        if previous.is_some() {
            self.count -= 1;
        }
        previous
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Does every slot have a word?
    pub fn is_complete(&self) -> bool {
        self.count == self.word_ids.len()
    }

    pub fn contains_word(&self, word_id: WordId) -> bool {
        self.word_ids.contains(&Some(word_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = Choice> + '_ {
        self.word_ids.iter().enumerate().filter_map(|(slot_id, word_id)| {
            word_id.map(|word_id| Choice { slot_id, word_id })
        })
    }

    /// The word assigned to `slot_id`, as a string.
    pub fn word<'a>(&self, word_list: &'a WordList, slot_id: SlotId) -> Option<&'a str> {
        self.get(slot_id).map(|word_id| word_list.word(word_id).string.as_str())
    }
}

/// Knobs for a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Forbid using the same word in more than one slot.
    pub distinct_words: bool,

    /// Run a global AC-3 pass in `find_fill` before searching.
    pub initial_arc_consistency: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig { distinct_words: false, initial_arc_consistency: true }
    }
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Search nodes visited, i.e. slots we chose to branch on.
    pub states: u64,

    /// Choices abandoned after the search below them failed.
    pub backtracks: u64,

    /// Choices rejected because propagating them emptied some slot.
    pub propagation_failures: u64,

    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

/// Why a fill didn't produce a grid. This is an ordinary outcome of a search, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillFailure {
    /// A slot ran out of candidates before the search started, either because no word has the
    /// right length or because the initial arc-consistency pass emptied it.
    EmptyDomain { slot_id: SlotId },

    /// The search exhausted every option.
    NoSolution,
}

impl Display for FillFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FillFailure::EmptyDomain { slot_id } => write!(f, "slot {slot_id} has no candidates"),
            FillFailure::NoSolution => write!(f, "no solution"),
        }
    }
}

/// Pick the unassigned slot with the fewest remaining candidates, preferring slots that cross
/// more others and then the lowest `Slot`. Returns `None` once every slot has a word.
pub fn select_unassigned_slot(
    graph: &ConstraintGraph,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<SlotId> {
    (0..graph.slot_count())
        .filter(|&slot_id| !assignment.is_assigned(slot_id))
        .min_by_key(|&slot_id| {
            (domains.len(slot_id), Reverse(graph.degree(slot_id)), *graph.slot(slot_id))
        })
}

/// Return the candidates for `slot_id` ordered by how many candidates each would rule out among
/// the unassigned slots crossing it, fewest first. Equal counts keep word id order.
pub fn order_domain_values(
    graph: &ConstraintGraph,
    word_list: &WordList,
    domains: &Domains,
    assignment: &Assignment,
    slot_id: SlotId,
) -> Vec<WordId> {
    // For each open crossing, count how many of the crossing slot's candidates put each letter in
    // the shared cell. A word then rules out everything in that slot except the words matching
    // its own letter.
    let crossing_glyph_counts: Vec<(usize, usize, HashMap<char, usize>)> = graph.slot_configs()
        [slot_id]
        .crossings
        .iter()
        .filter(|crossing| !assignment.is_assigned(crossing.other_slot_id))
        .map(|crossing| {
            let mut glyph_counts: HashMap<char, usize> = HashMap::new();
            for word_id in domains.get(crossing.other_slot_id) {
                if let Some(glyph) = word_list.glyph(word_id, crossing.other_slot_cell) {
                    *glyph_counts.entry(glyph).or_insert(0) += 1;
                }
            }
            (crossing.cell, domains.len(crossing.other_slot_id), glyph_counts)
        })
        .collect();

    let mut ranked: Vec<(usize, WordId)> = domains
        .get(slot_id)
        .iter()
        .map(|word_id| {
            let ruled_out: usize = crossing_glyph_counts
                .iter()
                .map(|(cell, option_count, glyph_counts)| {
                    let compatible = word_list
                        .glyph(word_id, *cell)
                        .and_then(|glyph| glyph_counts.get(&glyph))
                        .copied()
                        .unwrap_or(0);
                    option_count - compatible
                })
                .sum();
            (ruled_out, word_id)
        })
        .collect();
    ranked.sort_unstable();

    ranked.into_iter().map(|(_, word_id)| word_id).collect()
}

/// Could `choice` be added to `assignment`? The word must have the slot's length and agree with
/// every assigned crossing slot on the shared letter.
pub fn is_consistent(
    graph: &ConstraintGraph,
    word_list: &WordList,
    assignment: &Assignment,
    config: &SolverConfig,
    choice: Choice,
) -> bool {
    if word_list.word(choice.word_id).len() != graph.length(choice.slot_id) {
        return false;
    }

    if config.distinct_words && assignment.contains_word(choice.word_id) {
        return false;
    }

    graph.slot_configs()[choice.slot_id].crossings.iter().all(|crossing| {
        match assignment.get(crossing.other_slot_id) {
            Some(other_word_id) => matches!(
                (
                    word_list.glyph(choice.word_id, crossing.cell),
                    word_list.glyph(other_word_id, crossing.other_slot_cell),
                ),
                (Some(glyph), Some(other_glyph)) if glyph == other_glyph
            ),
            None => true,
        }
    })
}

struct Search<'a> {
    graph: &'a ConstraintGraph,
    word_list: &'a WordList,
    config: &'a SolverConfig,
    statistics: Statistics,
}

impl<'a> Search<'a> {
    /// Extend `assignment` to a full fill. On success the assignment is complete and `domains`
    /// reflect it; on failure both are exactly as they were when this was called.
    fn backtrack(&mut self, domains: &mut Domains, assignment: &mut Assignment) -> bool {
        let Some(slot_id) = select_unassigned_slot(self.graph, domains, assignment) else {
            return true;
        };
        self.statistics.states += 1;

        for word_id in order_domain_values(self.graph, self.word_list, domains, assignment, slot_id) {
            let choice = Choice { slot_id, word_id };
            if !is_consistent(self.graph, self.word_list, assignment, self.config, choice) {
                continue;
            }

            assignment.insert(slot_id, word_id);
            let snapshot = domains.snapshot();
            domains.restrict(slot_id, BitSet::from_iter([word_id]));

            let arcs: Vec<Arc> = self
                .graph
                .neighbors(slot_id)
                .iter()
                .filter(|&neighbor| !assignment.is_assigned(neighbor))
                .map(|neighbor| Arc { slot_id: neighbor, other_slot_id: slot_id })
                .collect();

            match enforce_arc_consistency(self.graph, self.word_list, domains, Some(arcs.as_slice())) {
                Ok(_) => {
                    if self.backtrack(domains, assignment) {
                        return true;
                    }
                    self.statistics.backtracks += 1;
                }
                Err(ArcConsistencyFailure { slot_id: emptied_slot_id }) => {
                    log::trace!(
                        "{} in slot {} empties slot {}",
                        self.word_list.word(word_id).string,
                        slot_id,
                        emptied_slot_id
                    );
                    self.statistics.propagation_failures += 1;
                }
            }

            domains.restore(snapshot);
            assignment.remove(slot_id);
        }

        false
    }
}

/// Search for a fill starting from the given domains, which should already be node-consistent.
/// On success `domains` are left narrowed to the fill; on failure they are unchanged.
pub fn solve(
    graph: &ConstraintGraph,
    word_list: &WordList,
    domains: &mut Domains,
    config: &SolverConfig,
) -> Result<FillSuccess, FillFailure> {
    debug_assert_eq!(domains.slot_count(), graph.slot_count());

    let start = Instant::now();
    let mut search = Search { graph, word_list, config, statistics: Statistics::default() };
    let mut assignment = Assignment::new(graph.slot_count());

    let found = search.backtrack(domains, &mut assignment);

    let mut statistics = search.statistics;
    statistics.duration = start.elapsed();

    if found {
        log::debug!("found a fill: {:?}", statistics);
        Ok(FillSuccess { statistics, assignment })
    } else {
        log::debug!("search exhausted: {:?}", statistics);
        Err(FillFailure::NoSolution)
    }
}

/// Search for a fill for the given grid: build node-consistent domains, make them arc-consistent,
/// and then run the backtracking search.
pub fn find_fill(
    graph: &ConstraintGraph,
    word_list: &WordList,
    config: &SolverConfig,
) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();

    let mut domains = graph.enforce_node_consistency(word_list);
    log::debug!("{} candidates across {} slots", domains.total_candidates(), domains.slot_count());
    if let Some(slot_id) = domains.first_empty_slot() {
        log::debug!("no words of length {} for slot {}", graph.length(slot_id), slot_id);
        return Err(FillFailure::EmptyDomain { slot_id });
    }

    if config.initial_arc_consistency {
        if let Err(ArcConsistencyFailure { slot_id }) =
            enforce_arc_consistency(graph, word_list, &mut domains, None)
        {
            log::debug!("initial arc consistency emptied slot {}", slot_id);
            return Err(FillFailure::EmptyDomain { slot_id });
        }
    }

    let mut result = solve(graph, word_list, &mut domains, config)?;
    result.statistics.duration = start.elapsed();

    Ok(result)
}
