use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PuzzleError, Result},
    puzzle::{
        board::{Board, BoardKey},
        moves::Move,
    },
};

/// A back-pointer from a visited state to the state and move that produced
/// it. The initial board links to itself, which is the sentinel that
/// terminates reconstruction.
#[derive(Debug, Clone)]
pub struct BackLink {
    pub parent: BoardKey,
    pub mv: Move,
}

/// An ordered move sequence that drives the initial board to a goal state.
/// Serializes as the bare move list: `[[0,1],[2,3]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    moves: Vec<Move>,
}

impl Plan {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replays the plan against `initial`, checking every move for legality
    /// at the point it applies and that the final board is solved. Returns
    /// the final board.
    pub fn validate(&self, initial: &Board) -> Result<Board> {
        let mut board = initial.clone();
        for mv in &self.moves {
            board.try_apply_move(*mv)?;
        }
        if !board.is_goal_state() {
            return Err(
                PuzzleError::Custom("plan replay did not reach a goal state".to_string()).into(),
            );
        }
        Ok(board)
    }
}

/// Walks back-links from the goal key to the initial-state sentinel and
/// returns the moves in forward application order.
///
/// Every key on the chain was inserted by the search before being pushed,
/// so a missing link means the visited map was corrupted — a bug, not a
/// recoverable condition.
pub(crate) fn reconstruct(visited: &HashMap<BoardKey, BackLink>, goal: &BoardKey) -> Plan {
    let mut moves = Vec::new();
    let mut current = goal;
    loop {
        let link = visited
            .get(current)
            .expect("back-link chain broken: key missing from visited map");
        if link.parent == *current {
            break;
        }
        moves.push(link.mv);
        current = &link.parent;
    }
    moves.reverse();
    Plan::new(moves)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::{reconstruct, BackLink, Plan};
    use crate::puzzle::{board::Board, bottle::Bottle, color::ColorId, moves::Move};

    const R: ColorId = ColorId(0);
    const B: ColorId = ColorId(1);

    fn board(bottles: &[(usize, &[ColorId])]) -> Board {
        Board::from_bottles(
            bottles
                .iter()
                .map(|(cap, layers)| Bottle::new(*cap, layers.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn reconstruction_stops_at_the_sentinel() {
        // Three-state chain: root -> mid -> goal.
        let root = board(&[(2, &[R, B]), (2, &[B, R]), (2, &[])]);
        let mut mid = root.clone();
        mid.apply_move(Move::new(0, 2));
        let mut goal = mid.clone();
        goal.apply_move(Move::new(1, 0));

        let mut visited = HashMap::new();
        visited.insert(
            root.canonical_key(),
            BackLink {
                parent: root.canonical_key(),
                mv: Move::new(0, 0),
            },
        );
        visited.insert(
            mid.canonical_key(),
            BackLink {
                parent: root.canonical_key(),
                mv: Move::new(0, 2),
            },
        );
        visited.insert(
            goal.canonical_key(),
            BackLink {
                parent: mid.canonical_key(),
                mv: Move::new(1, 0),
            },
        );

        let plan = reconstruct(&visited, &goal.canonical_key());
        assert_eq!(plan.moves(), &[Move::new(0, 2), Move::new(1, 0)]);

        // The root reconstructs to the empty plan.
        assert!(reconstruct(&visited, &root.canonical_key()).is_empty());
    }

    #[test]
    fn validate_rejects_plans_that_fall_short() {
        let initial = board(&[(2, &[R, B]), (2, &[B, R]), (2, &[])]);
        let partial = Plan::new(vec![Move::new(0, 2)]);
        assert!(partial.validate(&initial).is_err());

        let illegal = Plan::new(vec![Move::new(0, 1)]);
        assert!(illegal.validate(&initial).is_err());
    }

    #[test]
    fn plan_serializes_as_nested_pairs() {
        let plan = Plan::new(vec![Move::new(0, 2), Move::new(1, 0)]);
        assert_eq!(serde_json::to_string(&plan).unwrap(), "[[0,2],[1,0]]");
    }
}
