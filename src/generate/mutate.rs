//! Cage mutations used while hardening a puzzle
//!
//! The primitives at the top keep the cell→cage map consistent but may
//! break cage geometry; the mutators at the bottom restore every
//! invariant (contiguity, minimum size, a representable target) before
//! returning. The solution grid is the invariant reference: any cell
//! leaving a cage gets its solution value back as a given.

use std::convert::TryFrom;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Pos};
use crate::puzzle::{flood_fill, CageId, CageType, Puzzle, MAX_CAGE_SIZE};

/// Index of the first unused cage slot
fn alloc_cage(puzzle: &Puzzle) -> Option<CageId> {
    puzzle.cages.iter().position(|cage| cage.is_unused())
}

/// Turn all of a cage's members back into given cells
fn destroy_cage(puzzle: &mut Puzzle, id: CageId, solution: &Grid) {
    let cells = std::mem::take(&mut puzzle.cages[id].cells);
    for &pos in &cells {
        puzzle.givens[pos] = solution[pos];
        puzzle.cage_map[pos.index()] = None;
    }
}

/// Remove one cell from a cage, restoring its given value. No-op if the
/// cell is not actually a member.
fn remove_from_cage(puzzle: &mut Puzzle, id: CageId, victim: Pos, solution: &Grid) {
    let cage = &mut puzzle.cages[id];
    if let Some(i) = cage.cells.iter().position(|&pos| pos == victim) {
        cage.cells.swap_remove(i);
        puzzle.givens[victim] = solution[victim];
        puzzle.cage_map[victim.index()] = None;
    }
}

/// Add a cell to a cage and blank its given. No-op if the cell already
/// belongs to a cage or the cage is full. No geometry checks.
fn add_to_cage(puzzle: &mut Puzzle, id: CageId, pos: Pos) {
    if puzzle.cage_map[pos.index()].is_some() {
        return;
    }
    if puzzle.cages[id].cells.len() >= MAX_CAGE_SIZE {
        return;
    }
    puzzle.cages[id].cells.push(pos);
    puzzle.givens[pos] = 0;
    puzzle.cage_map[pos.index()] = Some(id);
}

/// Recompute a cage's target from the solution values of its members.
/// Returns false if no valid target exists for the cage's current type:
/// a Difference/Ratio cage larger than two cells under the two-cell rule,
/// a Ratio whose squared maximum is not divisible by the product, or a
/// target that
/// does not fit the clue range.
fn update_target(puzzle: &mut Puzzle, id: CageId, solution: &Grid, two_cell: bool) -> bool {
    let cage = &puzzle.cages[id];
    if cage.is_unused() {
        return true;
    }

    let cage_type = cage.cage_type;
    if two_cell
        && matches!(cage_type, CageType::Difference | CageType::Ratio)
        && cage.cells.len() > 2
    {
        return false;
    }

    let mut sum = 0;
    let mut product: i64 = 1;
    let mut max = 0;
    for &pos in &cage.cells {
        let v = i32::from(solution[pos]);
        sum += v;
        product *= i64::from(v);
        max = max.max(v);
    }

    let target = match cage_type {
        CageType::Sum => sum,
        CageType::Difference => {
            if max * 2 < sum {
                return false;
            }
            max * 2 - sum
        }
        CageType::Product => match i32::try_from(product) {
            Ok(product) => product,
            Err(_) => return false,
        },
        CageType::Ratio => {
            let square = i64::from(max) * i64::from(max);
            if square % product != 0 {
                return false;
            }
            (square / product) as i32
        }
    };
    puzzle.cages[id].target = target;
    true
}

/// Give the cage a random type that is valid for its values. Sum is
/// always valid, so this terminates.
fn alter_type(
    puzzle: &mut Puzzle,
    id: CageId,
    solution: &Grid,
    two_cell: bool,
    rng: &mut impl Rng,
) {
    let mut types = CageType::ALL;
    types.shuffle(rng);
    for &cage_type in &types {
        puzzle.cages[id].cage_type = cage_type;
        if update_target(puzzle, id, solution, two_cell) {
            break;
        }
    }
}

/// Cut off any members of the cage not connected to its first member,
/// restoring their givens. Destroys the cage if fewer than two cells
/// remain.
fn cut_islands(puzzle: &mut Puzzle, id: CageId, solution: &Grid) {
    if puzzle.cages[id].is_unused() {
        return;
    }

    let mut map = puzzle.cage_map;
    let start = puzzle.cages[id].cells[0];
    flood_fill(&mut map, id, start.x(), start.y());

    let mut cells = std::mem::take(&mut puzzle.cages[id].cells);
    cells.retain(|&pos| {
        if map[pos.index()].is_some() {
            // not reached from the anchor
            puzzle.givens[pos] = solution[pos];
            puzzle.cage_map[pos.index()] = None;
            false
        } else {
            true
        }
    });
    puzzle.cages[id].cells = cells;

    if puzzle.cages[id].cells.len() < 2 {
        destroy_cage(puzzle, id, solution);
    }
}

/// Remove a cell from its cage, pruning or destroying the cage as needed
/// to keep the invariants, and re-deriving its clue.
pub(crate) fn remove_cell(
    puzzle: &mut Puzzle,
    pos: Pos,
    solution: &Grid,
    two_cell: bool,
    rng: &mut impl Rng,
) {
    let id = match puzzle.cage_map[pos.index()] {
        Some(id) => id,
        None => return,
    };

    if puzzle.cages[id].cells.len() <= 2 {
        destroy_cage(puzzle, id, solution);
        return;
    }

    remove_from_cage(puzzle, id, pos, solution);
    cut_islands(puzzle, id, solution);

    if !update_target(puzzle, id, solution, two_cell) {
        alter_type(puzzle, id, solution, two_cell, rng);
    }
}

/// Make `pos` share a cage with its neighbour `neighbour`, creating a
/// cage if the neighbour has none and leaving `pos`'s old cage (if any)
/// in a valid state. A full cage table makes this a no-op.
pub(crate) fn join_cells(
    puzzle: &mut Puzzle,
    pos: Pos,
    neighbour: Pos,
    solution: &Grid,
    two_cell: bool,
    rng: &mut impl Rng,
) {
    let neighbour_cage = puzzle.cage_map[neighbour.index()];
    let own_cage = puzzle.cage_map[pos.index()];

    if own_cage.is_some() {
        if neighbour_cage == own_cage {
            return;
        }
        remove_cell(puzzle, pos, solution, two_cell, rng);
    }

    match neighbour_cage {
        Some(id) => {
            add_to_cage(puzzle, id, pos);
            if !update_target(puzzle, id, solution, two_cell) {
                alter_type(puzzle, id, solution, two_cell, rng);
            }
        }
        None => {
            let id = match alloc_cage(puzzle) {
                Some(id) => id,
                None => return,
            };
            add_to_cage(puzzle, id, pos);
            add_to_cage(puzzle, id, neighbour);
            alter_type(puzzle, id, solution, two_cell, rng);
        }
    }
}
