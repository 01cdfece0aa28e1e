use crate::grid::Pos;

/// The arithmetic rule attached to a cage.
///
/// Difference and Ratio single out the largest member: the clue is
/// `2*max - sum` and `max*max / product` respectively, which reduces to
/// the usual two-cell `b - a` and `b / a` clues.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CageType {
    Sum,
    Difference,
    Product,
    Ratio,
}

impl CageType {
    pub(crate) const ALL: [CageType; 4] = [
        CageType::Sum,
        CageType::Difference,
        CageType::Product,
        CageType::Ratio,
    ];

    /// The character representation of the rule
    pub fn symbol(self) -> char {
        match self {
            CageType::Sum => '+',
            CageType::Difference => '-',
            CageType::Product => '*',
            CageType::Ratio => '/',
        }
    }

    /// Retrieve a `CageType` from its corresponding symbol
    pub fn from_symbol(c: char) -> Option<CageType> {
        let cage_type = match c {
            '+' => CageType::Sum,
            '-' => CageType::Difference,
            '*' => CageType::Product,
            '/' => CageType::Ratio,
            _ => return None,
        };
        Some(cage_type)
    }
}

/// A cage in a Calcudoku puzzle: a contiguous run of cells sharing one
/// arithmetic clue.
///
/// A cage with no member cells marks an unused slot in the puzzle's
/// cage table.
#[derive(Clone, Debug, PartialEq)]
pub struct Cage {
    pub(crate) cage_type: CageType,
    pub(crate) target: i32,
    pub(crate) cells: Vec<Pos>,
}

impl Cage {
    pub fn new(cage_type: CageType, target: i32, cells: Vec<Pos>) -> Self {
        Self {
            cage_type,
            target,
            cells,
        }
    }

    pub(crate) fn unused() -> Self {
        Self {
            cage_type: CageType::Sum,
            target: -1,
            cells: Vec::new(),
        }
    }

    pub fn is_unused(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cage_type(&self) -> CageType {
        self.cage_type
    }

    /// The number on the cage
    pub fn target(&self) -> i32 {
        self.target
    }

    /// The positions of the cells in the cage
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }
}
