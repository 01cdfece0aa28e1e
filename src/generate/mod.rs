//! Puzzle generation
//!
//! A puzzle starts as a fully-given copy of a random solution grid and is
//! "hardened" by repeatedly joining random neighbouring cells into cages.
//! Every mutation that keeps the puzzle uniquely solvable and raises its
//! difficulty (within the configured cap) is kept; everything else is
//! left on the working copy and may still pay off a few mutations later.

mod mutate;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Pos, MAX_SIZE};
use crate::puzzle::Puzzle;
use crate::solve::{solve, SolveResult};
use crate::ValueSet;

use self::mutate::join_cells;

/// Controls for [`generate`] and [`harden_pass`]
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// restrict Difference and Ratio cages to exactly two cells
    pub two_cell: bool,
    /// upper limit on hardening iterations
    pub iterations: u32,
    /// reject mutations that push the difficulty above this
    pub max_difficulty: Option<u32>,
    /// stop hardening once the difficulty reaches this
    pub target_difficulty: Option<u32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            two_cell: false,
            iterations: 40,
            max_difficulty: None,
            target_difficulty: None,
        }
    }
}

/// Generate a random valid solution grid of the given size
pub fn generate_grid(size: usize, rng: &mut impl Rng) -> Grid {
    assert!(size >= 1 && size <= MAX_SIZE, "invalid puzzle size");
    let mut ctx = FillContext {
        size,
        grid: Grid::new(),
        rows_used: [ValueSet::empty(); MAX_SIZE],
        cols_used: [ValueSet::empty(); MAX_SIZE],
    };

    let mut top_row: Vec<u8> = (1..=size as u8).collect();
    top_row.shuffle(rng);
    for (x, &v) in top_row.iter().enumerate() {
        ctx.grid[Pos::new(x, 0)] = v;
        ctx.cols_used[x] = ValueSet::singleton(i32::from(v));
    }

    if !ctx.fill(0, 1, rng) {
        // every valid first row extends to a full Latin square
        unreachable!("Latin square fill failed");
    }
    debug!("solution grid:\n{}", ctx.grid.display(size));
    ctx.grid
}

struct FillContext {
    size: usize,
    grid: Grid,
    rows_used: [ValueSet; MAX_SIZE],
    cols_used: [ValueSet; MAX_SIZE],
}

impl FillContext {
    /// Fill cells in row-major order from `(x, y)`, trying values in
    /// random order and backtracking on dead ends
    fn fill(&mut self, mut x: usize, mut y: usize, rng: &mut impl Rng) -> bool {
        if x >= self.size {
            x = 0;
            y += 1;
        }
        if y >= self.size {
            return true;
        }

        let mut choices: Vec<u8> = (1..=self.size as u8).collect();
        choices.shuffle(rng);

        let used = self.rows_used[y] | self.cols_used[x];
        let pos = Pos::new(x, y);
        for &v in &choices {
            let value = i32::from(v);
            if used.contains(value) {
                continue;
            }
            self.rows_used[y].insert(value);
            self.cols_used[x].insert(value);
            self.grid[pos] = v;
            if self.fill(x + 1, y, rng) {
                return true;
            }
            self.rows_used[y].remove(value);
            self.cols_used[x].remove(value);
        }
        false
    }
}

/// Build a puzzle over the given solution grid and harden it until the
/// iteration limit or the difficulty target is reached. Returns the
/// puzzle (labels normalized) and its final difficulty.
///
/// A 1×1 puzzle cannot be hardened and comes back with difficulty 0.
pub fn generate(
    solution: &Grid,
    size: usize,
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> (Puzzle, u32) {
    let mut puzzle = Puzzle::new(size);
    puzzle.givens = *solution;

    let best_score = harden_until(&mut puzzle, solution, 0, options, rng);

    puzzle.normalize_labels();
    (puzzle, best_score)
}

/// Run hardening passes until the iteration limit is spent or the
/// difficulty target is reached. Returns the best score.
pub fn harden_until(
    puzzle: &mut Puzzle,
    solution: &Grid,
    start_score: u32,
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> u32 {
    let mut best_score = start_score;
    for _ in 0..options.iterations {
        if options.target_difficulty.map_or(false, |t| best_score >= t) {
            break;
        }
        best_score = harden_pass(puzzle, solution, best_score, options, rng);
    }
    best_score
}

/// One hardening pass: apply ten random join mutations to a working copy
/// of the puzzle, committing the copy back after each mutation that keeps
/// it uniquely solvable and raises the difficulty within the cap.
/// Returns the best score reached.
pub fn harden_pass(
    puzzle: &mut Puzzle,
    solution: &Grid,
    best_score: u32,
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> u32 {
    if puzzle.size() < 2 {
        return best_score;
    }

    let mut best = best_score;
    let mut work = puzzle.clone();
    for _ in 0..10 {
        let cell = choose_cell(puzzle.size(), rng);
        let neighbour = choose_neighbour(puzzle.size(), cell, rng);
        join_cells(&mut work, cell, neighbour, solution, options.two_cell, rng);

        if let SolveResult::Unique(data) = solve(&work) {
            let within_cap = options.max_difficulty.map_or(true, |cap| data.difficulty <= cap);
            if data.difficulty > best && within_cap {
                *puzzle = work.clone();
                best = data.difficulty;
                debug!("hardened to difficulty {}", best);
            }
        }
    }
    best
}

fn choose_cell(size: usize, rng: &mut impl Rng) -> Pos {
    Pos::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// Pick one of the cell's orthogonal neighbours, never leaving the grid
fn choose_neighbour(size: usize, pos: Pos, rng: &mut impl Rng) -> Pos {
    let (x, y) = (pos.x(), pos.y());
    let xn = if x + 1 >= size || (x > 0 && rng.gen::<bool>()) {
        x - 1
    } else {
        x + 1
    };
    let yn = if y + 1 >= size || (y > 0 && rng.gen::<bool>()) {
        y - 1
    } else {
        y + 1
    };
    if rng.gen::<bool>() {
        Pos::new(xn, y)
    } else {
        Pos::new(x, yn)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{choose_cell, choose_neighbour, generate, generate_grid, GenerateOptions};
    use crate::grid::Pos;
    use crate::ValueSet;

    #[test]
    fn grid_rows_and_columns_are_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        for &size in &[1, 2, 5, 9, 16] {
            let grid = generate_grid(size, &mut rng);
            for i in 0..size {
                let mut row = ValueSet::empty();
                let mut col = ValueSet::empty();
                for j in 0..size {
                    row.insert(i32::from(grid[Pos::new(j, i)]));
                    col.insert(i32::from(grid[Pos::new(i, j)]));
                }
                assert_eq!(row, ValueSet::full(size));
                assert_eq!(col, ValueSet::full(size));
            }
        }
    }

    #[test]
    fn neighbours_are_adjacent_and_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let cell = choose_cell(4, &mut rng);
            let neighbour = choose_neighbour(4, cell, &mut rng);
            assert!(neighbour.x() < 4 && neighbour.y() < 4);
            let dx = (cell.x() as i32 - neighbour.x() as i32).abs();
            let dy = (cell.y() as i32 - neighbour.y() as i32).abs();
            assert_eq!(dx + dy, 1);
        }
    }

    #[test]
    fn one_by_one_refuses_to_harden() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_grid(1, &mut rng);
        let (puzzle, score) = generate(&grid, 1, &GenerateOptions::default(), &mut rng);
        assert_eq!(score, 0);
        assert_eq!(puzzle.cages().count(), 0);
        assert_eq!(puzzle.givens()[Pos::new(0, 0)], 1);
    }
}
