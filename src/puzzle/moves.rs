use serde::{Deserialize, Serialize};

/// One pour: the whole contiguous top run of `from` into `to`.
///
/// Indices are 0-based positions in the board's bottle order. On the wire a
/// move is the two-element array `[from, to]`, so a plan serializes as
/// `[[0,1],[2,3]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl From<(usize, usize)> for Move {
    fn from((from, to): (usize, usize)) -> Self {
        Self { from, to }
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.from, mv.to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::Move;

    #[test]
    fn serializes_as_index_pair() {
        let mv = Move::new(3, 0);
        assert_eq!(serde_json::to_string(&mv).unwrap(), "[3,0]");

        let back: Move = serde_json::from_str("[3,0]").unwrap();
        assert_eq!(back, mv);
    }
}
