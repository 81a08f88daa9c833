use std::collections::HashSet;

use crate::{
    error::{PuzzleError, Result},
    puzzle::{bottle::Bottle, moves::Move},
};

/// A board's content-based identity, used for state deduplication during
/// search.
///
/// The encoding is a lossless byte string: for each bottle in order, its
/// capacity, then its layer count, then the layer ids bottom to top. The
/// length prefixes keep the encoding unambiguous, so two keys are equal
/// exactly when the boards have the same bottle contents in the same order.
/// Equality is always by content, never by object identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey(Box<[u8]>);

/// The full ordered collection of bottles at one point in time; one node of
/// the search space. Bottle order is significant: it defines the indices
/// that moves refer to and is part of the board's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bottles: Vec<Bottle>,
}

impl Board {
    /// Wraps pre-validated bottles. The public construction path with
    /// validation is [`build_board`](crate::puzzle::spec::build_board).
    pub(crate) fn from_bottles(bottles: Vec<Bottle>) -> Self {
        Self { bottles }
    }

    pub fn bottles(&self) -> &[Bottle] {
        &self.bottles
    }

    pub fn len(&self) -> usize {
        self.bottles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bottles.is_empty()
    }

    /// Encodes the board into its canonical dedup key.
    pub fn canonical_key(&self) -> BoardKey {
        // Capacity never changes after construction, but it participates in
        // move legality, so it is encoded rather than assumed.
        let mut bytes = Vec::with_capacity(self.bottles.len() * 24);
        for bottle in &self.bottles {
            // u64 holds any usize, so the length fields never truncate.
            bytes.extend_from_slice(&(bottle.capacity() as u64).to_le_bytes());
            bytes.extend_from_slice(&(bottle.layers().len() as u64).to_le_bytes());
            for layer in bottle.layers() {
                bytes.extend_from_slice(&layer.to_bytes());
            }
        }
        BoardKey(bytes.into_boxed_slice())
    }

    /// The solved-board test.
    ///
    /// Every bottle must be uniform, and among bottles that are neither
    /// empty nor full no two may share a top color. Two partially-filled
    /// uniform bottles of the same color could still be merged, and such a
    /// board is deliberately not a goal: the search must keep merging until
    /// bottles are either empty or full.
    pub fn is_goal_state(&self) -> bool {
        if !self.bottles.iter().all(Bottle::is_uniform) {
            return false;
        }
        let mut partial_colors = HashSet::new();
        for bottle in &self.bottles {
            if bottle.is_empty() || bottle.is_full() {
                continue;
            }
            let Some(top) = bottle.top_color() else {
                continue;
            };
            if !partial_colors.insert(top) {
                return false;
            }
        }
        true
    }

    /// Whether pouring `from` into `to` is legal on this board.
    pub fn can_pour(&self, from: usize, to: usize) -> bool {
        from != to && self.bottles[from].can_pour_into(&self.bottles[to])
    }

    /// Applies one pour in place and reports whether the configuration
    /// changed — always true when the precondition held, since a
    /// zero-layer transfer is fatal inside `pour_into`. Precondition:
    /// `self.can_pour(mv.from, mv.to)` — the engine always checks legality
    /// on the parent before cloning and applying.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let (src, dst) = self.bottle_pair_mut(mv.from, mv.to);
        src.pour_into(dst) > 0
    }

    /// Checked variant of [`apply_move`](Board::apply_move) for replaying
    /// externally supplied plans: rejects out-of-range indices, self-pours
    /// and illegal pours instead of panicking.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<()> {
        let bottles = self.bottles.len();
        if mv.from >= bottles || mv.to >= bottles {
            return Err(PuzzleError::MoveOutOfRange {
                from: mv.from,
                to: mv.to,
                bottles,
            }
            .into());
        }
        if mv.from == mv.to {
            return Err(PuzzleError::SelfPour(mv.from).into());
        }
        if !self.can_pour(mv.from, mv.to) {
            return Err(PuzzleError::Custom(format!("illegal move {mv}")).into());
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Disjoint mutable borrows of two distinct bottles.
    fn bottle_pair_mut(&mut self, from: usize, to: usize) -> (&mut Bottle, &mut Bottle) {
        assert_ne!(from, to, "a bottle cannot pour into itself");
        if from < to {
            let (head, tail) = self.bottles.split_at_mut(to);
            (&mut head[from], &mut tail[0])
        } else {
            let (head, tail) = self.bottles.split_at_mut(from);
            (&mut tail[0], &mut head[to])
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Board;
    use crate::puzzle::{bottle::Bottle, color::ColorId, moves::Move};

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
    fn canonical_keys_track_content_not_identity() {
        let a = board(&[(4, &[R, B]), (4, &[])]);
        let b = board(&[(4, &[R, B]), (4, &[])]);
        assert_eq!(a.canonical_key(), b.canonical_key());

        // Bottle order is part of the identity.
        let swapped = board(&[(4, &[]), (4, &[R, B])]);
        assert_ne!(a.canonical_key(), swapped.canonical_key());
    }

    #[test]
    fn canonical_keys_distinguish_layer_boundaries() {
        // Same flattened layer sequence, different split across bottles.
        let a = board(&[(4, &[R, R]), (4, &[R])]);
        let b = board(&[(4, &[R]), (4, &[R, R])]);
        assert_ne!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_capacities_keep_distinct_keys() {
        // Capacities that agree modulo 2^32 must not collide in the key.
        let a = board(&[((1usize << 32) + 1, &[])]);
        let b = board(&[(1, &[])]);
        assert_ne!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn goal_requires_uniformity() {
        assert!(board(&[(4, &[R, R, R, R]), (4, &[])]).is_goal_state());
        assert!(!board(&[(4, &[R, B]), (4, &[])]).is_goal_state());
    }

    #[test]
    fn mergeable_partials_are_not_a_goal() {
        // Both bottles uniform in R, both partial: still mergeable, so
        // deliberately not solved.
        assert!(!board(&[(4, &[R, R]), (4, &[R])]).is_goal_state());
        // Distinct colors among partials is fine.
        assert!(board(&[(4, &[R, R]), (4, &[B])]).is_goal_state());
        // A full bottle and a partial of the same color is fine too.
        assert!(board(&[(2, &[R, R]), (4, &[R])]).is_goal_state());
    }

    #[test]
    fn apply_move_transfers_and_changes_key() {
        let mut cur = board(&[(4, &[R, B, B]), (4, &[B])]);
        let before = cur.canonical_key();
        assert!(cur.apply_move(Move::new(0, 1)));
        assert_ne!(cur.canonical_key(), before);
        assert_eq!(cur.bottles()[0].layers(), &[R]);
        assert_eq!(cur.bottles()[1].layers(), &[B, B, B]);
    }

    #[test]
    fn try_apply_move_rejects_bad_indices() {
        let mut cur = board(&[(4, &[R, B]), (4, &[])]);
        assert!(cur.try_apply_move(Move::new(0, 5)).is_err());
        assert!(cur.try_apply_move(Move::new(1, 1)).is_err());
        assert!(cur.try_apply_move(Move::new(1, 0)).is_err());
        assert!(cur.try_apply_move(Move::new(0, 1)).is_ok());
    }
}
