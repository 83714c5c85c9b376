//! AC-3 over the crossings of a `ConstraintGraph`. A grid is arc-consistent when, for every
//! crossing, each candidate for one slot has at least one candidate in the crossing slot that
//! puts the same letter in the shared cell.
//!
//! We keep revising arcs until no more eliminations are possible, or until some slot runs out of
//! candidates, in which case there is no fill reachable from the current domains.

use std::collections::{HashSet, VecDeque};

use crate::domains::Domains;
use crate::grid_config::ConstraintGraph;
use crate::word_list::WordList;
use crate::{SlotId, WordId};

/// A directed constraint: make `slot_id` consistent with `other_slot_id`. Only meaningful for
/// pairs of slots that cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arc {
    pub slot_id: SlotId,
    pub other_slot_id: SlotId,
}

/// Data structure used in `enforce_arc_consistency` to track which arcs we still need to revise.
/// An arc that's already waiting isn't queued a second time.
#[derive(Debug)]
struct ConsistencyQueue {
    queue: VecDeque<Arc>,
    queued: HashSet<Arc>,
}

impl ConsistencyQueue {
    fn with_initial_queue<Items>(items: Items) -> ConsistencyQueue
    where
        Items: IntoIterator<Item = Arc>,
    {
        let mut queue = ConsistencyQueue { queue: VecDeque::new(), queued: HashSet::new() };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

/// Results from a call to `enforce_arc_consistency`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcConsistencySuccess {
    /// How many arcs were revised.
    pub revisions: usize,

    /// How many candidates were removed across all slots.
    pub eliminations: usize,
}

/// The slot whose domain was wiped out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub slot_id: SlotId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Make `arc.slot_id` consistent with `arc.other_slot_id` by removing every candidate that has no
/// letter-compatible candidate in the other slot. Returns the number of candidates removed; an
/// arc between slots that don't cross removes nothing.
pub fn revise(graph: &ConstraintGraph, word_list: &WordList, domains: &mut Domains, arc: Arc) -> usize {
    let Some((cell, other_cell)) = graph.overlaps(arc.slot_id, arc.other_slot_id) else {
        return 0;
    };

    // Which letters can the other slot still put in the shared cell?
    let supported_glyphs: HashSet<char> = domains
        .get(arc.other_slot_id)
        .iter()
        .filter_map(|word_id| word_list.glyph(word_id, other_cell))
        .collect();

    let unsupported: Vec<WordId> = domains
        .get(arc.slot_id)
        .iter()
        .filter(|&word_id| {
            word_list
                .glyph(word_id, cell)
                .map_or(true, |glyph| !supported_glyphs.contains(&glyph))
        })
        .collect();

    for &word_id in &unsupported {
        domains.remove(arc.slot_id, word_id);
    }

    unsupported.len()
}

/// Prune `domains` until every arc is consistent. With `initial_arcs` of `None` every arc in the
/// graph is checked; otherwise only the given arcs start out in the queue, which is enough when
/// the domains were arc-consistent before those slots changed.
///
/// On failure the domains are left partially pruned; callers that need to undo the pass should
/// take a snapshot first.
pub fn enforce_arc_consistency(
    graph: &ConstraintGraph,
    word_list: &WordList,
    domains: &mut Domains,
    initial_arcs: Option<&[Arc]>,
) -> ArcConsistencyResult {
    let mut queue = match initial_arcs {
        Some(arcs) => ConsistencyQueue::with_initial_queue(arcs.iter().copied()),
        None => ConsistencyQueue::with_initial_queue(graph.arcs()),
    };
    let mut result = ArcConsistencySuccess::default();

    while let Some(arc) = queue.pop_front() {
        result.revisions += 1;
        let eliminated = revise(graph, word_list, domains, arc);
        if eliminated == 0 {
            continue;
        }
        result.eliminations += eliminated;

        if domains.is_empty(arc.slot_id) {
            log::trace!("arc consistency wiped out slot {}", arc.slot_id);
            return Err(ArcConsistencyFailure { slot_id: arc.slot_id });
        }

        // This slot's domain shrank, so anything crossing it (other than the slot we just checked
        // against) may have lost its support.
        for neighbor in graph.neighbors(arc.slot_id) {
            if neighbor != arc.other_slot_id {
                queue.enqueue(Arc { slot_id: neighbor, other_slot_id: arc.slot_id });
            }
        }
    }

    log::trace!(
        "arc consistency reached after {} revisions ({} eliminations)",
        result.revisions,
        result.eliminations
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::arc_consistency::{enforce_arc_consistency, revise, Arc, ArcConsistencyFailure};
    use crate::grid_config::Direction::{Across, Down};
    use crate::grid_config::{ConstraintGraph, Slot};
    use crate::word_list::WordList;

    /// abc
    /// b..
    /// c..
    fn corner_graph() -> ConstraintGraph {
        ConstraintGraph::new(3, 3, vec![Slot::new(0, 0, Across, 3), Slot::new(0, 0, Down, 3)])
            .expect("valid geometry")
    }

    fn words(word_list: &WordList, domain: &bit_set::BitSet) -> Vec<String> {
        domain.iter().map(|id| word_list.word(id).string.clone()).collect()
    }

    #[test]
    fn test_revise_removes_unsupported_candidates() {
        let graph = corner_graph();
        let word_list = WordList::new(["cat", "cot", "dog", "emu"]);
        let mut domains = graph.enforce_node_consistency(&word_list);
        domains.restrict(1, [word_list.id_of("dog").unwrap()].into_iter().collect());

        let eliminated = revise(&graph, &word_list, &mut domains, Arc { slot_id: 0, other_slot_id: 1 });

        assert_eq!(eliminated, 3);
        assert_eq!(words(&word_list, domains.get(0)), vec!["dog"]);
        // Revising one direction leaves the other slot alone.
        assert_eq!(words(&word_list, domains.get(1)), vec!["dog"]);
    }

    #[test]
    fn test_revise_ignores_slots_that_dont_cross() {
        let graph = ConstraintGraph::new(3, 3, vec![Slot::new(0, 0, Across, 3), Slot::new(2, 0, Across, 3)])
            .expect("valid geometry");
        let word_list = WordList::new(["cat", "dog"]);
        let mut domains = graph.enforce_node_consistency(&word_list);

        assert_eq!(revise(&graph, &word_list, &mut domains, Arc { slot_id: 0, other_slot_id: 1 }), 0);
        assert_eq!(domains.len(0), 2);
    }

    #[test]
    fn test_enforce_prunes_both_directions() {
        // The across word has to end with the letter the down word starts with.
        //
        // arc
        // ..o
        // ..w
        let graph = ConstraintGraph::new(3, 3, vec![Slot::new(0, 0, Across, 3), Slot::new(0, 2, Down, 3)])
            .expect("valid geometry");
        let word_list = WordList::new(["ant", "arc", "bee", "cow"]);
        let mut domains = graph.enforce_node_consistency(&word_list);

        let result = enforce_arc_consistency(&graph, &word_list, &mut domains, None)
            .expect("grid is satisfiable");

        assert_eq!(words(&word_list, domains.get(0)), vec!["arc"]);
        assert_eq!(words(&word_list, domains.get(1)), vec!["cow"]);
        assert_eq!(result.eliminations, 6);
    }

    #[test]
    fn test_enforce_fails_when_a_domain_empties() {
        let graph = corner_graph();
        let word_list = WordList::new(["cat", "dog"]);
        let mut domains = graph.enforce_node_consistency(&word_list);
        domains.restrict(0, [word_list.id_of("cat").unwrap()].into_iter().collect());
        domains.restrict(1, [word_list.id_of("dog").unwrap()].into_iter().collect());

        let result = enforce_arc_consistency(&graph, &word_list, &mut domains, None);

        assert_eq!(result, Err(ArcConsistencyFailure { slot_id: 0 }));
    }

    #[test]
    fn test_initial_arcs_limit_the_starting_queue() {
        let graph = corner_graph();
        let word_list = WordList::new(["ant", "bee", "cow"]);
        let mut domains = graph.enforce_node_consistency(&word_list);
        domains.restrict(0, [word_list.id_of("bee").unwrap()].into_iter().collect());

        // An empty seed does nothing, even though the grid isn't consistent yet.
        let noop = enforce_arc_consistency(&graph, &word_list, &mut domains, Some(&[]))
            .expect("nothing to revise");
        assert_eq!(noop.revisions, 0);
        assert_eq!(domains.len(1), 3);

        enforce_arc_consistency(
            &graph,
            &word_list,
            &mut domains,
            Some(&[Arc { slot_id: 1, other_slot_id: 0 }]),
        ).expect("grid is satisfiable");
        assert_eq!(words(&word_list, domains.get(1)), vec!["bee"]);
    }

    #[test]
    fn test_shrinking_a_domain_requeues_its_other_neighbors() {
        // Three slots in a chain: 0 crosses 1, 1 crosses 2. Fixing slot 0 should ripple through
        // slot 1 into slot 2 even though only the arc into slot 0 is seeded.
        //
        // ab.
        // .c.
        // .de
        let graph = ConstraintGraph::new(3, 3, vec![
            Slot::new(0, 0, Across, 2),
            Slot::new(0, 1, Down, 3),
            Slot::new(2, 1, Across, 2),
        ]).expect("valid geometry");
        let word_list = WordList::new(["ab", "xy", "bcd", "yzw", "de", "wq"]);
        let mut domains = graph.enforce_node_consistency(&word_list);
        domains.restrict(0, [word_list.id_of("ab").unwrap()].into_iter().collect());

        enforce_arc_consistency(
            &graph,
            &word_list,
            &mut domains,
            Some(&[Arc { slot_id: 1, other_slot_id: 0 }]),
        ).expect("grid is satisfiable");

        assert_eq!(words(&word_list, domains.get(1)), vec!["bcd"]);
        assert_eq!(words(&word_list, domains.get(2)), vec!["de"]);
    }
}
