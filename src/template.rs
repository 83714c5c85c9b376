//! Reading puzzles from text: a grid template where `_` or `.` marks an open cell and `#` marks a
//! block, and a word list with one word per line.

use std::fs;
use std::path::Path;

use crate::errors::GridError;
use crate::grid_config::{ConstraintGraph, Direction, Slot};
use crate::word_list::WordList;
use crate::GridCoord;

/// The shape of a grid: which cells are open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplate {
    height: usize,
    width: usize,
    open: Vec<Vec<bool>>,
}

impl GridTemplate {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells outside the grid count as blocks.
    pub fn is_open(&self, (row, col): GridCoord) -> bool {
        self.open.get(row).and_then(|line| line.get(col)).copied().unwrap_or(false)
    }

    /// Every maximal run of two or more open cells, across slots first (row by row) and then down
    /// slots (column by column).
    pub fn slots(&self) -> Vec<Slot> {
        fn build_runs(
            lines: impl Iterator<Item = Vec<bool>>,
            direction: Direction,
        ) -> Vec<Slot> {
            let mut result: Vec<Slot> = vec![];

            for (line_idx, line) in lines.enumerate() {
                let mut run_start: Option<usize> = None;

                for (idx, is_open) in line.iter().copied().chain([false]).enumerate() {
                    match (is_open, run_start) {
                        (true, None) => run_start = Some(idx),
                        (false, Some(start)) => {
                            if idx - start > 1 {
                                result.push(match direction {
                                    Direction::Across => Slot::new(line_idx, start, direction, idx - start),
                                    Direction::Down => Slot::new(start, line_idx, direction, idx - start),
                                });
                            }
                            run_start = None;
                        }
                        _ => {}
                    }
                }
            }

            result
        }

        let rows = self.open.iter().cloned();
        let columns = (0..self.width)
            .map(|col| self.open.iter().map(|row| row[col]).collect::<Vec<bool>>());

        let mut slots = build_runs(rows, Direction::Across);
        slots.extend(build_runs(columns, Direction::Down));
        slots
    }

    pub fn constraint_graph(&self) -> Result<ConstraintGraph, GridError> {
        ConstraintGraph::new(self.height, self.width, self.slots())
    }
}

/// Parse a grid template. Blank lines and surrounding whitespace are ignored, and every row has to
/// be the same width.
pub fn parse_template(template: &str) -> Result<GridTemplate, GridError> {
    let lines: Vec<&str> = template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let width = lines.first().ok_or(GridError::EmptyTemplate)?.chars().count();

    let mut open: Vec<Vec<bool>> = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let cells = line
            .chars()
            .enumerate()
            .map(|(col, cell)| match cell {
                '_' | '.' => Ok(true),
                '#' => Ok(false),
                found => Err(GridError::InvalidTemplateChar { found, row, col }),
            })
            .collect::<Result<Vec<bool>, GridError>>()?;

        if cells.len() != width {
            return Err(GridError::RaggedTemplate { row, expected: width, found: cells.len() });
        }
        open.push(cells);
    }

    Ok(GridTemplate { height: open.len(), width, open })
}

/// Parse a word list with one word per line. Words are upper-cased so that a template's letters
/// match regardless of how the list was written.
pub fn parse_word_list(contents: &str) -> WordList {
    WordList::new(contents.lines().map(str::to_uppercase))
}

pub fn load_template<P: AsRef<Path>>(path: P) -> Result<GridTemplate, GridError> {
    parse_template(&read_file(path.as_ref())?)
}

pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<WordList, GridError> {
    Ok(parse_word_list(&read_file(path.as_ref())?))
}

fn read_file(path: &Path) -> Result<String, GridError> {
    fs::read_to_string(path).map_err(|source| GridError::Io {
        path: path.display().to_string(),
        source,
    })
}
