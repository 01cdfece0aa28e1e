//! Parse puzzles from text
//!
//! The format is a whitespace-separated grid, one row per line. Each cell
//! is either a decimal given value (`0` for a blank) or a cage label
//! letter, optionally carrying the cage's operator symbol and target.
//! A blank line terminates the grid.

use crate::grid::{positions, Grid, Pos, MAX_SIZE};
use crate::puzzle::error::ParsePuzzleError;
use crate::puzzle::{cage_label, label_to_id, Cage, CageType, Puzzle, MAX_CAGES, MAX_CAGE_SIZE};

#[derive(Default)]
struct CageBuilder {
    cage_type: Option<CageType>,
    target: Option<i64>,
    cells: Vec<Pos>,
}

pub(crate) fn parse_puzzle(s: &str) -> Result<Puzzle, ParsePuzzleError> {
    let mut givens = Grid::new();
    let mut builders: Vec<CageBuilder> = (0..MAX_CAGES).map(|_| CageBuilder::default()).collect();

    let mut width = 0;
    let mut height = 0;
    for line in s.lines() {
        let mut x = 0;
        for token in line.split_whitespace() {
            parse_cell(token, x, height, &mut givens, &mut builders)?;
            x += 1;
        }
        if x == 0 {
            // a blank line ends the grid
            break;
        }
        if height == 0 {
            width = x;
        } else if x != width {
            return Err(format!("jagged row {} (expected {} cells)", height, width).into());
        }
        height += 1;
    }

    if width == 0 {
        return Err("no cells".into());
    }
    if height != width {
        return Err(format!("grid is not square (width {}, height {})", width, height).into());
    }

    for pos in positions(width) {
        if usize::from(givens[pos]) > width {
            return Err(format!(
                "cell value {} out of range at ({}, {})",
                givens[pos],
                pos.x(),
                pos.y()
            )
            .into());
        }
    }

    let mut puzzle = Puzzle::new(width);
    puzzle.givens = givens;
    for (id, builder) in builders.into_iter().enumerate() {
        if builder.cells.is_empty() {
            continue;
        }
        puzzle.cages[id] = build_cage(id, builder)?;
    }
    puzzle.rebuild_cage_map();

    if let Err((id, pos)) = puzzle.check_contiguous() {
        return Err(format!(
            "cage {} is not contiguous at ({}, {})",
            cage_label(id),
            pos.x(),
            pos.y()
        )
        .into());
    }

    Ok(puzzle)
}

fn parse_cell(
    token: &str,
    x: usize,
    y: usize,
    givens: &mut Grid,
    builders: &mut [CageBuilder],
) -> Result<(), ParsePuzzleError> {
    if x >= MAX_SIZE || y >= MAX_SIZE {
        return Err(format!("maximum cell coordinates exceeded: ({}, {})", x, y).into());
    }

    let mut value: Option<i64> = None;
    let mut label = None;
    let mut cage_type = None;
    for ch in token.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let next = value.unwrap_or(0) * 10 + i64::from(digit);
            if next > i64::from(i32::max_value()) {
                return Err(format!("number too large at ({}, {})", x, y).into());
            }
            value = Some(next);
        } else if let Some(t) = CageType::from_symbol(ch) {
            cage_type = Some(t);
        } else if label_to_id(ch).is_some() {
            label = Some(ch);
        } else {
            return Err(format!("unexpected character '{}' at ({}, {})", ch, x, y).into());
        }
    }

    let pos = Pos::new(x, y);
    match label {
        Some(ch) => {
            let builder = &mut builders[label_to_id(ch).unwrap()];
            if builder.cells.len() >= MAX_CAGE_SIZE {
                return Err(format!(
                    "maximum cage size exceeded at ({}, {}) (cage {})",
                    x, y, ch
                )
                .into());
            }
            builder.cells.push(pos);
            if let Some(v) = value {
                if builder.target.map_or(false, |t| t != v) {
                    return Err(format!(
                        "cage {} has two conflicting targets: {} vs {}",
                        ch,
                        v,
                        builder.target.unwrap()
                    )
                    .into());
                }
                builder.target = Some(v);
            }
            if let Some(t) = cage_type {
                if builder.cage_type.map_or(false, |old| old != t) {
                    return Err(format!(
                        "cage {} has two conflicting types: {} vs {}",
                        ch,
                        t.symbol(),
                        builder.cage_type.unwrap().symbol()
                    )
                    .into());
                }
                builder.cage_type = Some(t);
            }
        }
        None => {
            if cage_type.is_some() {
                return Err(format!("operator without a cage at ({}, {})", x, y).into());
            }
            let v = value.unwrap_or(0);
            if v > MAX_SIZE as i64 {
                return Err(format!("cell value {} out of range at ({}, {})", v, x, y).into());
            }
            givens[pos] = v as u8;
        }
    }
    Ok(())
}

fn build_cage(id: usize, builder: CageBuilder) -> Result<Cage, ParsePuzzleError> {
    let ch = cage_label(id);
    let cage_type = builder
        .cage_type
        .ok_or_else(|| ParsePuzzleError::from(format!("cage {} has no type", ch)))?;
    let target = builder
        .target
        .ok_or_else(|| ParsePuzzleError::from(format!("cage {} has no target", ch)))?;
    if builder.cells.len() < 2 {
        return Err(format!("cage {} has only a single member", ch).into());
    }
    if matches!(cage_type, CageType::Product | CageType::Ratio) && target == 0 {
        return Err(format!(
            "cage {} is of type {} but its target is 0",
            ch,
            cage_type.symbol()
        )
        .into());
    }
    Ok(Cage::new(cage_type, target as i32, builder.cells))
}

#[cfg(test)]
mod tests {
    use crate::grid::Pos;
    use crate::puzzle::{Cage, CageType, Puzzle};

    #[test]
    fn empty() {
        assert!(Puzzle::parse("").is_err());
        assert!(Puzzle::parse("\n\n").is_err());
    }

    #[test]
    fn parses_cages_and_givens() {
        let s = "\
            A+7\tA\tB-1\n\
            A\t2\tB\n\
            C*6\tC\tC\n";
        let puzzle = Puzzle::parse(s).unwrap();

        let mut expected = Puzzle::new(3);
        expected.givens[Pos::new(1, 1)] = 2;
        expected.cages[0] = Cage::new(
            CageType::Sum,
            7,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1)],
        );
        expected.cages[1] = Cage::new(CageType::Difference, 1, vec![Pos::new(2, 0), Pos::new(2, 1)]);
        expected.cages[2] = Cage::new(
            CageType::Product,
            6,
            vec![Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2)],
        );
        expected.rebuild_cage_map();
        assert_eq!(puzzle, expected);
    }

    #[test]
    fn clue_may_sit_on_any_single_member() {
        let with_extras = "\
            A\tA+3\n\
            1\t2\n\
            \n\
            ignored trailing text\n";
        let puzzle = Puzzle::parse(with_extras).unwrap();
        assert_eq!(puzzle.size(), 2);
        assert_eq!(puzzle.cage(0).target(), 3);
        assert_eq!(puzzle.givens()[Pos::new(0, 1)], 1);
    }

    #[test]
    fn rejects_conflicting_clues() {
        assert!(Puzzle::parse("A+3\tA+4\n0\t0\n").is_err());
        assert!(Puzzle::parse("A+3\tA*3\n0\t0\n").is_err());
    }

    #[test]
    fn rejects_bad_shapes() {
        // jagged
        assert!(Puzzle::parse("A+3\tA\n0\n").is_err());
        // not square
        assert!(Puzzle::parse("A+3\tA\n").is_err());
        // single-member cage
        assert!(Puzzle::parse("A+3\t0\n0\t0\n").is_err());
        // value out of range
        assert!(Puzzle::parse("5\t0\n0\t0\n").is_err());
    }

    #[test]
    fn rejects_non_contiguous_cage() {
        let s = "\
            A+5\t0\tA\n\
            0\t0\t0\n\
            0\t0\t0\n";
        assert!(Puzzle::parse(s).is_err());
    }

    #[test]
    fn rejects_zero_target_product() {
        assert!(Puzzle::parse("A*0\tA\n0\t0\n").is_err());
        assert!(Puzzle::parse("A+0\tA\n0\t0\n").is_ok());
    }
}
