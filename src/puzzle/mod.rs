//! The puzzle state model: bottles, boards, moves, the input boundary and
//! the puzzle generator.

pub mod board;
pub mod bottle;
pub mod color;
pub mod generate;
pub mod moves;
pub mod spec;
