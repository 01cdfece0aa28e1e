//! Generate and solve Calcudoku puzzles

#![warn(rust_2018_idioms)]
#![warn(trivial_numeric_casts)]

#[macro_use]
extern crate log;

pub mod generate;
pub mod grid;
pub mod puzzle;
pub mod solve;

mod value_set;

pub use self::grid::{Grid, Pos};
pub use self::puzzle::Puzzle;

pub(crate) use self::value_set::ValueSet;
