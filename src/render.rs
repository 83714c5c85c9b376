use crate::backtracking_search::Assignment;
use crate::grid_config::ConstraintGraph;
use crate::template::GridTemplate;
use crate::word_list::WordList;

/// The letter in each cell, indexed by row and then column. Blocks and unfilled cells are `None`.
pub fn letter_grid(
    template: &GridTemplate,
    graph: &ConstraintGraph,
    word_list: &WordList,
    assignment: &Assignment,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; template.width()]; template.height()];

    for choice in assignment.iter() {
        let slot = graph.slot(choice.slot_id);
        let word = word_list.word(choice.word_id);

        for (cell_idx, &glyph) in word.glyphs.iter().enumerate() {
            let (row, col) = slot.cell(cell_idx);
            if let Some(cell) = letters.get_mut(row).and_then(|line| line.get_mut(col)) {
                *cell = Some(glyph);
            }
        }
    }

    letters
}

/// Turn the given template and assignment into a rendered string, one line per row. Blocks are
/// drawn as `█` and open cells without a letter as a space.
pub fn render_grid(
    template: &GridTemplate,
    graph: &ConstraintGraph,
    word_list: &WordList,
    assignment: &Assignment,
) -> String {
    let letters = letter_grid(template, graph, word_list, assignment);

    letters
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(|(col, letter)| {
                    if !template.is_open((row, col)) {
                        '█'
                    } else {
                        letter.unwrap_or(' ')
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
