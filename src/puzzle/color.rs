use std::collections::HashMap;

use crate::error::{PuzzleError, Result};

/// A dense id for one liquid color, interned at board construction.
///
/// Layers carry ids rather than the incoming string labels so that layer
/// comparison is a single integer compare and the board's canonical key is a
/// compact byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(pub u16);

impl ColorId {
    pub fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// The label ↔ id mapping built while reading a puzzle. Ids are assigned in
/// order of first appearance, which keeps interning deterministic for a given
/// input. Fixed once the board is built.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    labels: Vec<String>,
    by_label: HashMap<String, ColorId>,
}

impl Palette {
    /// Distinct colors one palette can hold: the `ColorId` id space.
    pub const MAX_COLORS: usize = u16::MAX as usize + 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, interning it if unseen. A label that
    /// would overflow the id space is rejected rather than wrapped — a
    /// wrapped id would alias a different color and corrupt board identity.
    pub fn intern(&mut self, label: &str) -> Result<ColorId> {
        if let Some(id) = self.by_label.get(label) {
            return Ok(*id);
        }
        let raw = match u16::try_from(self.labels.len()) {
            Ok(raw) => raw,
            Err(_) => {
                return Err(PuzzleError::TooManyColors {
                    limit: Self::MAX_COLORS,
                }
                .into())
            }
        };
        let id = ColorId(raw);
        self.labels.push(label.to_string());
        self.by_label.insert(label.to_string(), id);
        Ok(id)
    }

    pub fn lookup(&self, label: &str) -> Option<ColorId> {
        self.by_label.get(label).copied()
    }

    /// The original label for `id`, for diagnostics and round-tripping
    /// puzzles back out as JSON.
    pub fn label(&self, id: ColorId) -> &str {
        &self.labels[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
