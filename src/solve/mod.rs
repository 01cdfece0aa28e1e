//! Backtracking Calcudoku solver
//!
//! Each step picks the empty cell with the fewest candidate values
//! (row/column pruning intersected with cage analysis), tries each
//! candidate in ascending order and recurses. The search stops once two
//! solutions are found, which is enough to classify the puzzle.

mod candidates;

use crate::grid::{positions, Grid, Pos, GRID_CELLS, MAX_SIZE};
use crate::puzzle::Puzzle;
use crate::ValueSet;

use self::candidates::cage_candidates;

pub enum SolveResult {
    /// No assignment satisfies the clues
    Unsolvable,
    /// Exactly one solution exists, as it should
    Unique(SolvedData),
    /// At least two solutions exist; the data comes from the first one
    /// found and its difficulty is not meaningful
    Multiple(SolvedData),
}

impl SolveResult {
    pub fn is_unique(&self) -> bool {
        matches!(self, SolveResult::Unique(_))
    }

    pub fn solved(&self) -> Option<&SolvedData> {
        match self {
            SolveResult::Unique(data) | SolveResult::Multiple(data) => Some(data),
            SolveResult::Unsolvable => None,
        }
    }
}

pub struct SolvedData {
    pub solution: Grid,
    pub difficulty: u32,
}

/// Solve a puzzle, classifying it as unsolvable, unique or not unique
pub fn solve(puzzle: &Puzzle) -> SolveResult {
    let mut ctx = SearchContext {
        puzzle,
        values: puzzle.givens,
        solution: Grid::new(),
        count: 0,
        branch_diff: 0,
    };
    ctx.search(0);

    if ctx.count == 0 {
        return SolveResult::Unsolvable;
    }
    debug_assert!(puzzle.is_solution(&ctx.solution));
    let data = SolvedData {
        solution: ctx.solution,
        difficulty: difficulty(puzzle, ctx.branch_diff),
    };
    debug!(
        "{} solution(s), difficulty {}",
        ctx.count, data.difficulty
    );
    if ctx.count == 1 {
        SolveResult::Unique(data)
    } else {
        SolveResult::Multiple(data)
    }
}

/// The reported difficulty `B*M + E`: branch difficulty of the first
/// solution, scaled past `M` (the smallest power of 10 covering the cell
/// count), plus the number of empty cells in the input. Branching
/// dominates; emptiness breaks ties.
fn difficulty(puzzle: &Puzzle, branch_diff: u32) -> u32 {
    let cells = (puzzle.size() * puzzle.size()) as u32;
    let mut magnitude = 1;
    while magnitude < cells {
        magnitude *= 10;
    }
    let empty = positions(puzzle.size())
        .filter(|&pos| puzzle.givens()[pos] == 0)
        .count() as u32;
    branch_diff * magnitude + empty
}

struct SearchContext<'a> {
    puzzle: &'a Puzzle,
    values: Grid,
    solution: Grid,
    count: u32,
    /// branch difficulty recorded with the first solution
    branch_diff: u32,
}

impl SearchContext<'_> {
    fn search(&mut self, branch_diff: u32) {
        let (cell, candidates) = match self.find_candidates() {
            Some(found) => found,
            None => {
                // no empty cell left: a complete solution
                if self.count == 0 {
                    self.solution = self.values;
                    self.branch_diff = branch_diff;
                }
                self.count += 1;
                return;
            }
        };

        if candidates.is_empty() {
            return;
        }

        // a forced cell costs nothing; wider branches cost (B-1)^2
        let width = candidates.len() as u32 - 1;
        let branch_diff = branch_diff + width * width;

        for value in candidates.iter() {
            self.values[cell] = value as u8;
            self.search(branch_diff);
            self.values[cell] = 0;
            if self.count >= 2 {
                return;
            }
        }
    }

    /// Find the empty cell with the fewest candidate values, ties broken
    /// by row-major scan order, along with its candidate set. `None` if
    /// the grid is full.
    fn find_candidates(&self) -> Option<(Pos, ValueSet)> {
        let size = self.puzzle.size();

        let mut rows = [ValueSet::empty(); MAX_SIZE];
        let mut cols = [ValueSet::empty(); MAX_SIZE];
        for pos in positions(size) {
            let v = self.values[pos];
            if v != 0 {
                let set = ValueSet::singleton(i32::from(v));
                rows[pos.y()] |= set;
                cols[pos.x()] |= set;
            }
        }

        let mut candidates = [ValueSet::empty(); GRID_CELLS];
        for pos in positions(size) {
            candidates[pos.index()] = (rows[pos.y()] | cols[pos.x()]).complement(size);
        }

        for (_, cage) in self.puzzle.cages() {
            let set = cage_candidates(cage, &self.values, size as i32);
            for &pos in cage.cells() {
                candidates[pos.index()] &= set;
            }
        }

        let mut best: Option<(Pos, ValueSet)> = None;
        for pos in positions(size) {
            if self.values[pos] != 0 {
                continue;
            }
            let set = candidates[pos.index()];
            if best.map_or(true, |(_, b)| set.len() < b.len()) {
                best = Some((pos, set));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, SolveResult};
    use crate::grid::Pos;
    use crate::puzzle::{Cage, CageType, Puzzle};

    #[test]
    fn trivial_1x1() {
        let puzzle = Puzzle::new(1);
        match solve(&puzzle) {
            SolveResult::Unique(data) => {
                assert_eq!(data.solution[Pos::new(0, 0)], 1);
                // B = 0, M = 1, E = 1
                assert_eq!(data.difficulty, 1);
            }
            _ => panic!("1x1 must have a unique solution"),
        }
    }

    #[test]
    fn fully_given_puzzle_has_difficulty_zero() {
        let mut puzzle = Puzzle::new(1);
        puzzle.givens[Pos::new(0, 0)] = 1;
        let result = solve(&puzzle);
        assert_eq!(result.solved().unwrap().difficulty, 0);
    }

    #[test]
    fn zero_difference_pair_is_unsolvable() {
        // a difference-0 cage admits only equal pairs, which the
        // row/column pruning always rejects
        let mut puzzle = Puzzle::new(2);
        puzzle.cages[0] = Cage::new(
            CageType::Difference,
            0,
            vec![Pos::new(0, 0), Pos::new(1, 0)],
        );
        puzzle.rebuild_cage_map();
        assert!(matches!(solve(&puzzle), SolveResult::Unsolvable));
    }

    #[test]
    fn open_grid_has_multiple_solutions() {
        let puzzle = Puzzle::new(2);
        assert!(matches!(solve(&puzzle), SolveResult::Multiple(_)));
    }
}
