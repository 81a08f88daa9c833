//! The exhaustive search over board states and everything around it:
//! cancellation, plan reconstruction and per-solve statistics.

pub mod cancel;
pub mod engine;
pub mod plan;
pub mod stats;
