#![allow(dead_code)]

use fillgrid::{Assignment, ConstraintGraph, WordList};

pub fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Check that `assignment` is a complete fill: every word has its slot's length, and every pair of
/// crossing slots agrees on the shared letter.
pub fn assert_valid_fill(graph: &ConstraintGraph, word_list: &WordList, assignment: &Assignment) {
    assert!(assignment.is_complete(), "assignment is missing slots");

    for slot_id in 0..graph.slot_count() {
        let word = &word_list.word(assignment.get(slot_id).unwrap()).glyphs;
        assert_eq!(word.len(), graph.length(slot_id), "wrong length in slot {slot_id}");

        for other_slot_id in graph.neighbors(slot_id) {
            let (p, q) = graph.overlaps(slot_id, other_slot_id).unwrap();
            let other_word = &word_list.word(assignment.get(other_slot_id).unwrap()).glyphs;
            assert_eq!(
                word[p], other_word[q],
                "slots {slot_id} and {other_slot_id} disagree on their shared letter"
            );
        }
    }
}

/// Exhaustively look for a fill, without any of the solver's pruning or ordering.
pub fn brute_force_fill_exists(graph: &ConstraintGraph, word_list: &WordList) -> bool {
    fn extend(
        graph: &ConstraintGraph,
        word_list: &WordList,
        chosen: &mut Vec<usize>,
    ) -> bool {
        let slot_id = chosen.len();
        if slot_id == graph.slot_count() {
            return true;
        }

        for (word_id, word) in word_list.iter() {
            if word.len() != graph.length(slot_id) {
                continue;
            }
            let fits = (0..slot_id).all(|earlier| match graph.overlaps(slot_id, earlier) {
                Some((p, q)) => word.glyphs[p] == word_list.word(chosen[earlier]).glyphs[q],
                None => true,
            });
            if fits {
                chosen.push(word_id);
                if extend(graph, word_list, chosen) {
                    return true;
                }
                chosen.pop();
            }
        }

        false
    }

    extend(graph, word_list, &mut vec![])
}
