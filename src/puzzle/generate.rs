use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    error::Result,
    puzzle::{
        board::Board,
        bottle::Bottle,
        color::Palette,
    },
};

/// Shape of a generated puzzle.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Number of distinct colors; one full bottle per color in the solved
    /// position.
    pub colors: usize,
    /// Capacity shared by every bottle.
    pub capacity: usize,
    /// Extra empty bottles appended after the color bottles.
    pub empty_bottles: usize,
    /// Scramble steps to attempt. Generation may stop early if no legal
    /// scramble step remains.
    pub scramble_steps: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            colors: 4,
            capacity: 4,
            empty_bottles: 2,
            scramble_steps: 64,
        }
    }
}

/// Generates a solvable puzzle by scrambling a solved board.
///
/// Starts from one full uniform bottle per color plus the empty bottles,
/// then repeatedly applies a random *reverse* transfer chosen so that the
/// forward pour undoing it is legal. Every step is therefore invertible and
/// the inverse sequence is a valid plan, so the generated board is always
/// solvable. Generation is deterministic per seed.
///
/// Fails only on an invalid shape, e.g. more colors than the palette's id
/// space holds.
pub fn generate(config: &GeneratorConfig, seed: u64) -> Result<(Board, Palette)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut palette = Palette::new();

    let mut bottles: Vec<Bottle> = Vec::with_capacity(config.colors + config.empty_bottles);
    for i in 0..config.colors {
        let id = palette.intern(&color_label(i))?;
        bottles.push(Bottle::new(config.capacity, vec![id; config.capacity]));
    }
    bottles.extend((0..config.empty_bottles).map(|_| Bottle::new(config.capacity, Vec::new())));

    for step in 0..config.scramble_steps {
        let candidates = reverse_candidates(&bottles);
        if candidates.is_empty() {
            debug!(step, "no reverse transfer left, stopping scramble early");
            break;
        }
        let (src, dst, amount) = candidates[rng.gen_range(0..candidates.len())];
        for _ in 0..amount {
            let color = bottles[src]
                .pop_layer()
                .unwrap_or_else(|| unreachable!("candidate transfer from an empty bottle"));
            bottles[dst].push_layer_unchecked(color);
        }
    }

    Ok((Board::from_bottles(bottles), palette))
}

/// All `(src, dst, amount)` transfers whose forward pour `dst -> src` would
/// be legal and restore the current state.
///
/// The constraints mirror pour legality run backwards: the moved layers
/// must come off `src`'s top run, either leaving the run's color on top of
/// `src` (so the pour-back can land on it) or emptying `src` entirely;
/// `dst`'s top must not already match (the pour-back must move exactly
/// `amount` layers); and `dst` must not end up as a full uniform bottle or
/// as the uniform source of a pour into an empty bottle, both of which the
/// forward rules forbid.
fn reverse_candidates(bottles: &[Bottle]) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::new();
    for (src, source) in bottles.iter().enumerate() {
        let Some(color) = source.top_color() else {
            continue;
        };
        let run = source.top_run_len();
        for (dst, dest) in bottles.iter().enumerate() {
            if dst == src || dest.top_color() == Some(color) {
                continue;
            }
            let max_amount = run.min(dest.space());
            for amount in 1..=max_amount {
                let empties_source = amount == source.layers().len();
                if amount == run && !empties_source {
                    // Would strand the run's color below a foreign top;
                    // the pour-back could never land.
                    continue;
                }
                if dest.is_empty() {
                    // The pour-back sources from a now-uniform bottle, which
                    // may neither be full nor pour into an emptied bottle.
                    if amount == dest.capacity() || empties_source {
                        continue;
                    }
                }
                out.push((src, dst, amount));
            }
        }
    }
    out
}

/// Spreadsheet-style label for color `i`: A, B, .., Z, AA, AB, ..
fn color_label(i: usize) -> String {
    let mut chars = Vec::new();
    let mut n = i + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        chars.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    chars.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::{color_label, generate, GeneratorConfig};
    use crate::puzzle::color::ColorId;

    #[test]
    fn labels_extend_past_the_alphabet() {
        assert_eq!(color_label(0), "A");
        assert_eq!(color_label(25), "Z");
        assert_eq!(color_label(26), "AA");
        assert_eq!(color_label(27), "AB");
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let config = GeneratorConfig::default();
        let (a, _) = generate(&config, 7).unwrap();
        let (b, _) = generate(&config, 7).unwrap();
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn color_count_past_the_palette_is_rejected() {
        let config = GeneratorConfig {
            colors: crate::puzzle::color::Palette::MAX_COLORS + 1,
            capacity: 1,
            empty_bottles: 0,
            scramble_steps: 0,
        };
        assert!(generate(&config, 0).is_err());
    }

    #[test]
    fn layer_counts_are_conserved() {
        let config = GeneratorConfig {
            colors: 3,
            capacity: 4,
            empty_bottles: 2,
            scramble_steps: 100,
        };
        let (board, palette) = generate(&config, 42).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(board.len(), 5);
        for color in 0..3 {
            let count: usize = board
                .bottles()
                .iter()
                .map(|b| {
                    b.layers()
                        .iter()
                        .filter(|c| **c == ColorId(color))
                        .count()
                })
                .sum();
            assert_eq!(count, 4);
        }
    }

    #[test]
    fn zero_steps_yields_the_solved_board() {
        let config = GeneratorConfig {
            scramble_steps: 0,
            ..GeneratorConfig::default()
        };
        let (board, _) = generate(&config, 0).unwrap();
        assert!(board.is_goal_state());
    }
}
