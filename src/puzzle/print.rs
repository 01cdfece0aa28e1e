//! Render puzzles as text
//!
//! Two renderers: [`write_puzzle`] emits the machine-readable format that
//! [`Puzzle::parse`](crate::Puzzle::parse) understands, and
//! [`format_puzzle`] draws the grid with a box-drawing [`Template`].

use std::io::{self, Write};

use crate::grid::{Grid, Pos};
use crate::puzzle::{cage_label, Puzzle};

/// Write the puzzle in its parseable text format.
///
/// Filled cells print their value, caged cells their label letter; the
/// cage's first member also carries the operator and target.
pub fn write_puzzle(puzzle: &Puzzle, values: &Grid, w: &mut impl Write) -> io::Result<()> {
    for y in 0..puzzle.size() {
        for x in 0..puzzle.size() {
            let pos = Pos::new(x, y);
            if x > 0 {
                write!(w, "\t")?;
            }
            if values[pos] != 0 {
                write!(w, "{}", values[pos])?;
            } else if let Some(id) = puzzle.cage_at(pos) {
                write!(w, "{}", cage_label(id))?;
                let cage = puzzle.cage(id);
                if cage.cells()[0] == pos {
                    write!(w, "{}{}", cage.cage_type().symbol(), cage.target())?;
                }
            } else {
                write!(w, "0")?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Characters for the top or bottom border of a rendered grid
pub struct HBorder {
    start: char,
    end: char,
    tee_major: char,
    tee_minor: char,
}

/// A box-drawing character set for rendering a puzzle grid.
///
/// Major lines separate cages; minor lines run between cells of the same
/// cage. The `inners` table is indexed by a 4-bit pattern of the gridlines
/// meeting at a junction (bits: left, right, top, bottom; set = major).
pub struct Template {
    top: HBorder,
    bottom: HBorder,
    hline_major: char,
    hline_minor: char,
    vline_major: char,
    vline_minor: char,
    tee_left_major: char,
    tee_left_minor: char,
    tee_right_major: char,
    tee_right_minor: char,
    inners: [char; 16],
}

const INNER_LEFT: usize = 1;
const INNER_RIGHT: usize = 2;
const INNER_TOP: usize = 4;
const INNER_BOTTOM: usize = 8;
const INNER_ALL: usize = 15;

pub const TEMPLATE_ASCII: Template = Template {
    top: HBorder {
        start: '+',
        end: '+',
        tee_major: '=',
        tee_minor: '=',
    },
    bottom: HBorder {
        start: '+',
        end: '+',
        tee_major: '=',
        tee_minor: '=',
    },
    hline_major: '=',
    hline_minor: '.',
    vline_major: '|',
    vline_minor: ':',
    tee_left_major: '+',
    tee_left_minor: '|',
    tee_right_major: '+',
    tee_right_minor: '|',
    inners: [
        ' ', ' ', ' ', '=', ' ', '+', '+', '+', ' ', '+', '+', '+', '|', '+', '+', '+',
    ],
};

pub const TEMPLATE_UNICODE: Template = Template {
    top: HBorder {
        start: '╔',
        end: '╗',
        tee_major: '╦',
        tee_minor: '═',
    },
    bottom: HBorder {
        start: '╚',
        end: '╝',
        tee_major: '╩',
        tee_minor: '═',
    },
    hline_major: '═',
    hline_minor: '┈',
    vline_major: '║',
    vline_minor: '┊',
    tee_left_major: '╠',
    tee_left_minor: '║',
    tee_right_major: '╣',
    tee_right_minor: '║',
    inners: [
        ' ', ' ', ' ', '═', ' ', '╝', '╚', '╩', ' ', '╗', '╔', '╦', '║', '╣', '╠', '╬',
    ],
};

/// Render the puzzle grid with the given template
pub fn format_puzzle(
    template: &Template,
    puzzle: &Puzzle,
    values: &Grid,
    w: &mut impl Write,
) -> io::Result<()> {
    let size = puzzle.size();
    let mut cell_width = 5;
    for y in 0..size {
        for x in 0..size {
            let pos = Pos::new(x, y);
            if let Some(clue) = clue_text(puzzle, pos) {
                cell_width = cell_width.max(clue.chars().count());
            }
            if values[pos] != 0 {
                cell_width = cell_width.max(values[pos].to_string().len());
            }
        }
    }

    write_border(template, &template.top, size, cell_width, hjoins(puzzle, 0), w)?;
    for y in 0..size {
        let h = hjoins(puzzle, y);
        write_row(template, puzzle, cell_width, y, h, RowKind::Clues, w)?;
        write_row(template, puzzle, cell_width, y, h, RowKind::Values(values), w)?;
        write_row(template, puzzle, cell_width, y, h, RowKind::Blank, w)?;
        if y + 1 < size {
            write_hline(
                template,
                size,
                cell_width,
                h,
                vjoins(puzzle, y),
                hjoins(puzzle, y + 1),
                w,
            )?;
        }
    }
    write_border(
        template,
        &template.bottom,
        size,
        cell_width,
        hjoins(puzzle, size - 1),
        w,
    )
}

/// The clue shown on a cage's first member, `"{target}{symbol}"`
fn clue_text(puzzle: &Puzzle, pos: Pos) -> Option<String> {
    let cage = puzzle.cage(puzzle.cage_at(pos)?);
    if cage.cells()[0] == pos {
        Some(format!("{}{}", cage.target(), cage.cage_type().symbol()))
    } else {
        None
    }
}

/// Bitmask of cells in row `y` caged together with their right neighbour
fn hjoins(puzzle: &Puzzle, y: usize) -> u16 {
    let mut out = 0;
    for x in 0..puzzle.size().saturating_sub(1) {
        let cage = puzzle.cage_at(Pos::new(x, y));
        if cage.is_some() && cage == puzzle.cage_at(Pos::new(x + 1, y)) {
            out |= 1 << x;
        }
    }
    out
}

/// Bitmask of cells in row `y` caged together with the cell below
fn vjoins(puzzle: &Puzzle, y: usize) -> u16 {
    let mut out = 0;
    for x in 0..puzzle.size() {
        let cage = puzzle.cage_at(Pos::new(x, y));
        if cage.is_some() && cage == puzzle.cage_at(Pos::new(x, y + 1)) {
            out |= 1 << x;
        }
    }
    out
}

fn write_repeated(w: &mut impl Write, ch: char, count: usize) -> io::Result<()> {
    for _ in 0..count {
        write!(w, "{}", ch)?;
    }
    Ok(())
}

fn write_border(
    template: &Template,
    border: &HBorder,
    size: usize,
    cell_width: usize,
    joins: u16,
    w: &mut impl Write,
) -> io::Result<()> {
    write!(w, "{}", border.start)?;
    for x in 0..size {
        write_repeated(w, template.hline_major, cell_width)?;
        if x + 1 < size {
            let tee = if joins & (1 << x) != 0 {
                border.tee_minor
            } else {
                border.tee_major
            };
            write!(w, "{}", tee)?;
        }
    }
    writeln!(w, "{}", border.end)
}

/// Write a gridline row between two cell rows. The three masks say which
/// vertical lines above, horizontal lines here, and vertical lines below
/// are minor (cage-interior) lines.
fn write_hline(
    template: &Template,
    size: usize,
    cell_width: usize,
    joins_above: u16,
    joins: u16,
    joins_below: u16,
    w: &mut impl Write,
) -> io::Result<()> {
    let left = if joins & 1 != 0 {
        template.tee_left_minor
    } else {
        template.tee_left_major
    };
    write!(w, "{}", left)?;

    for x in 0..size {
        let hline = if joins & (1 << x) != 0 {
            template.hline_minor
        } else {
            template.hline_major
        };
        write_repeated(w, hline, cell_width)?;

        if x + 1 < size {
            let mut inner = INNER_ALL;
            if joins & (1 << x) != 0 {
                inner &= !INNER_LEFT;
            }
            if joins & (1 << (x + 1)) != 0 {
                inner &= !INNER_RIGHT;
            }
            if joins_above & (1 << x) != 0 {
                inner &= !INNER_TOP;
            }
            if joins_below & (1 << x) != 0 {
                inner &= !INNER_BOTTOM;
            }
            write!(w, "{}", template.inners[inner])?;
        }
    }

    let right = if joins & (1 << (size - 1)) != 0 {
        template.tee_right_minor
    } else {
        template.tee_right_major
    };
    writeln!(w, "{}", right)
}

#[derive(Clone, Copy)]
enum RowKind<'a> {
    Clues,
    Values(&'a Grid),
    Blank,
}

/// Write one text row of a cell row: clues, values, or blank padding.
/// `joins` marks the vertical gridlines that are cage-interior lines.
fn write_row(
    template: &Template,
    puzzle: &Puzzle,
    cell_width: usize,
    y: usize,
    joins: u16,
    kind: RowKind<'_>,
    w: &mut impl Write,
) -> io::Result<()> {
    write!(w, "{}", template.vline_major)?;
    for x in 0..puzzle.size() {
        let pos = Pos::new(x, y);
        match kind {
            RowKind::Values(values) => {
                let text = match values[pos] {
                    0 => String::new(),
                    v => v.to_string(),
                };
                let len = text.len();
                write_repeated(w, ' ', (cell_width - len) / 2)?;
                write!(w, "{}", text)?;
                write_repeated(w, ' ', (cell_width - len + 1) / 2)?;
            }
            RowKind::Clues => {
                let text = clue_text(puzzle, pos).unwrap_or_default();
                write!(w, "{}", text)?;
                write_repeated(w, ' ', cell_width - text.chars().count())?;
            }
            RowKind::Blank => {
                write_repeated(w, ' ', cell_width)?;
            }
        }
        if x + 1 < puzzle.size() {
            let vline = if joins & (1 << x) != 0 {
                template.vline_minor
            } else {
                template.vline_major
            };
            write!(w, "{}", vline)?;
        }
    }
    writeln!(w, "{}", template.vline_major)
}

#[cfg(test)]
mod tests {
    use super::{format_puzzle, hjoins, vjoins, write_puzzle, TEMPLATE_ASCII, TEMPLATE_UNICODE};
    use crate::puzzle::Puzzle;

    const PUZZLE: &str = "\
        A+7\tA\tB-1\n\
        A\t2\tB\n\
        C*6\tC\tC\n";

    #[test]
    fn print_parse_round_trip() {
        let puzzle = Puzzle::parse(PUZZLE).unwrap();
        let mut out = Vec::new();
        write_puzzle(&puzzle, puzzle.givens(), &mut out).unwrap();
        let reparsed = Puzzle::parse(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(puzzle, reparsed);
    }

    #[test]
    fn join_masks() {
        let puzzle = Puzzle::parse(PUZZLE).unwrap();
        // row 0 is A A B, so only the A|A border is interior
        assert_eq!(hjoins(&puzzle, 0), 0b001);
        // row 2: C C C
        assert_eq!(hjoins(&puzzle, 2), 0b011);
        // A continues down in column 0, B in column 2
        assert_eq!(vjoins(&puzzle, 0), 0b101);
        assert_eq!(vjoins(&puzzle, 1), 0b000);
    }

    #[test]
    fn formatted_grid_shape() {
        let puzzle = Puzzle::parse(PUZZLE).unwrap();
        for template in &[TEMPLATE_ASCII, TEMPLATE_UNICODE] {
            let mut out = Vec::new();
            format_puzzle(template, &puzzle, puzzle.givens(), &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            let lines: Vec<_> = text.lines().collect();
            // border + 3 text rows per cell row + gridline between rows
            assert_eq!(lines.len(), 2 + 3 * 3 + 2);
            let width = lines[0].chars().count();
            assert!(lines.iter().all(|l| l.chars().count() == width));
        }
    }
}
