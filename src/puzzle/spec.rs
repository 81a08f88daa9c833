use serde::{Deserialize, Serialize};

use crate::{
    error::{PuzzleError, Result},
    puzzle::{
        board::Board,
        bottle::Bottle,
        color::{ColorId, Palette},
    },
};

/// One bottle as it arrives on the boundary: a capacity and the color
/// labels bottom to top. Field types and the list shape are enforced by
/// serde; range checks happen in [`build_board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottleSpec {
    pub capacity: usize,
    pub waters: Vec<String>,
}

/// The request envelope the surrounding service exchanges:
/// `{"bottles":[{"capacity":4,"waters":["Red","Blue"]}, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRequest {
    pub bottles: Vec<BottleSpec>,
}

/// Validates bottle specs and builds the initial board, interning color
/// labels into the returned palette. All validation happens here, before
/// any search starts; a failed spec never causes a partial search attempt.
pub fn build_board(specs: &[BottleSpec]) -> Result<(Board, Palette)> {
    let mut palette = Palette::new();
    let mut bottles = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        if spec.capacity == 0 {
            return Err(PuzzleError::ZeroCapacity { index }.into());
        }
        if spec.waters.len() > spec.capacity {
            return Err(PuzzleError::Overfilled {
                index,
                layers: spec.waters.len(),
                capacity: spec.capacity,
            }
            .into());
        }
        let mut layers: Vec<ColorId> = Vec::with_capacity(spec.waters.len());
        for water in &spec.waters {
            layers.push(palette.intern(water)?);
        }
        bottles.push(Bottle::new(spec.capacity, layers));
    }
    Ok((Board::from_bottles(bottles), palette))
}

/// Renders a board back into boundary specs using the palette it was built
/// with. Used to emit generated puzzles in the request shape.
pub fn to_specs(board: &Board, palette: &Palette) -> Vec<BottleSpec> {
    board
        .bottles()
        .iter()
        .map(|bottle| BottleSpec {
            capacity: bottle.capacity(),
            waters: bottle
                .layers()
                .iter()
                .map(|id| palette.label(*id).to_string())
                .collect(),
        })
        .collect()
}
