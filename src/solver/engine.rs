use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::{
    puzzle::{board::Board, moves::Move},
    solver::{
        cancel::CancelToken,
        plan::{reconstruct, BackLink, Plan},
    },
};

/// How a solve ended. Exhausting the space and being cancelled are distinct
/// outcomes: a caller that hit its deadline may retry with more time, while
/// a proven no-solution is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Plan),
    NoSolution,
    Cancelled,
}

/// Counters accumulated over one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped off the stack and examined.
    pub nodes_expanded: u64,
    /// Legal moves found while expanding nodes.
    pub moves_generated: u64,
    /// Child states skipped because their key was already visited.
    pub duplicates_skipped: u64,
    /// Dead ends: expanded states from which no child was pushed.
    pub dead_states: u64,
    /// High-water mark of the pending stack.
    pub peak_stack_depth: u64,
    pub elapsed_micros: u64,
}

/// The exhaustive depth-first search over board states.
///
/// The traversal runs over an explicit last-in-first-out stack of pending
/// boards rather than call recursion, so deep search paths cannot overflow
/// the call stack. Every explored move clones the parent board and applies
/// the move to the clone; parents are never mutated, so there is no undo
/// logic to get wrong. States are deduplicated by the board's canonical
/// key — many move orderings converge on the same bottle arrangement, and
/// each arrangement is expanded at most once. Back-links stay in the
/// visited map for the lifetime of the solve (plan reconstruction needs
/// them), so the visited check alone also covers dead ends; a separate
/// dead-state set could never reject anything the visited map has not
/// already rejected. Dead ends are therefore only counted, not stored.
///
/// The engine returns the first goal found in depth-first order, which is
/// not necessarily the shortest plan. A breadth-first queue in place of the
/// stack would trade that for shortest plans.
///
/// All search state lives inside the `solve` call, so one engine value (or
/// several) can serve concurrent solves from separate threads without
/// interference.
pub struct SearchEngine {
    cancel: CancelToken,
}

impl SearchEngine {
    /// An engine with no cancellation; the search runs to completion.
    pub fn new() -> Self {
        Self {
            cancel: CancelToken::new(),
        }
    }

    /// An engine that polls `cancel` at every node, for callers enforcing a
    /// deadline (see [`CancelToken::with_deadline`]).
    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    /// Searches from `initial` until a goal is found, the space is
    /// exhausted, or the cancel token fires.
    pub fn solve(&self, initial: &Board) -> (Outcome, SearchStats) {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        let mut visited: HashMap<_, BackLink> = HashMap::new();
        let mut stack = Vec::new();

        // The initial board links to itself: the reconstruction sentinel.
        let root_key = initial.canonical_key();
        visited.insert(
            root_key.clone(),
            BackLink {
                parent: root_key,
                mv: Move::new(0, 0),
            },
        );
        stack.push(initial.clone());
        stats.peak_stack_depth = 1;

        debug!(bottles = initial.len(), "starting search");

        while let Some(cur) = stack.pop() {
            if self.cancel.is_cancelled() {
                debug!(nodes = stats.nodes_expanded, "search cancelled");
                stats.elapsed_micros = start.elapsed().as_micros() as u64;
                return (Outcome::Cancelled, stats);
            }
            stats.nodes_expanded += 1;

            let cur_key = cur.canonical_key();
            if cur.is_goal_state() {
                let plan = reconstruct(&visited, &cur_key);
                debug!(
                    steps = plan.len(),
                    nodes = stats.nodes_expanded,
                    "goal reached"
                );
                stats.elapsed_micros = start.elapsed().as_micros() as u64;
                return (Outcome::Solved(plan), stats);
            }

            let mut generated = false;
            for from in 0..cur.len() {
                for to in 0..cur.len() {
                    if from == to || !cur.can_pour(from, to) {
                        continue;
                    }
                    stats.moves_generated += 1;
                    let mv = Move::new(from, to);
                    let mut child = cur.clone();
                    child.apply_move(mv);
                    let child_key = child.canonical_key();
                    if visited.contains_key(&child_key) {
                        stats.duplicates_skipped += 1;
                        continue;
                    }
                    visited.insert(
                        child_key,
                        BackLink {
                            parent: cur_key.clone(),
                            mv,
                        },
                    );
                    stack.push(child);
                    stats.peak_stack_depth = stats.peak_stack_depth.max(stack.len() as u64);
                    generated = true;
                }
            }

            // Nothing new reachable from here. The state stays in the
            // visited map, which is what keeps other paths from
            // re-expanding it.
            if !generated {
                stats.dead_states += 1;
            }
        }

        debug!(nodes = stats.nodes_expanded, "search space exhausted");
        stats.elapsed_micros = start.elapsed().as_micros() as u64;
        (Outcome::NoSolution, stats)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
