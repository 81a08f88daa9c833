//! Decant is an exhaustive-search solver and generator for water sort
//! puzzles.
//!
//! A puzzle is a row of bottles, each an ordered stack of colored layers
//! with a fixed capacity. One move pours the entire contiguous top-color
//! run of one bottle into another, which is only legal when the colors
//! match (or the destination is empty) and the whole run fits. The puzzle
//! is solved when every bottle holds a single color and no two partially
//! filled bottles could still be merged.
//!
//! # Core Concepts
//!
//! - **[`Bottle`]**: one capacity-bounded stack of layers, owning the pour
//!   legality rules.
//! - **[`Board`]**: the ordered bottle collection; one search-state node,
//!   identified by its content-based canonical key.
//! - **[`SearchEngine`]**: a depth-first traversal over boards with
//!   content-keyed deduplication. Returns *a* plan, not necessarily the
//!   shortest one, or proves that none exists.
//! - **[`Plan`]**: the ordered move list a solve produces, replayable with
//!   [`Plan::validate`].
//!
//! # Example: solving a three-bottle puzzle
//!
//! ```
//! use decant::puzzle::spec::{build_board, BottleSpec};
//! use decant::solver::engine::{Outcome, SearchEngine};
//!
//! let specs = vec![
//!     BottleSpec { capacity: 2, waters: vec!["Red".into(), "Blue".into()] },
//!     BottleSpec { capacity: 2, waters: vec!["Blue".into(), "Red".into()] },
//!     BottleSpec { capacity: 2, waters: vec![] },
//! ];
//!
//! let (board, _palette) = build_board(&specs).unwrap();
//! let (outcome, stats) = SearchEngine::new().solve(&board);
//!
//! let Outcome::Solved(plan) = outcome else { panic!("this puzzle solves") };
//! assert!(!plan.is_empty());
//! assert!(plan.validate(&board).unwrap().is_goal_state());
//! assert!(stats.nodes_expanded > 0);
//! ```
//!
//! [`Bottle`]: puzzle::bottle::Bottle
//! [`Board`]: puzzle::board::Board
//! [`SearchEngine`]: solver::engine::SearchEngine
//! [`Plan`]: solver::plan::Plan
//! [`Plan::validate`]: solver::plan::Plan::validate
pub mod error;
pub mod puzzle;
pub mod solver;
