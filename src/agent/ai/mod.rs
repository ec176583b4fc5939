// AI Agent - Negamax with Alpha-Beta Pruning
//
// This module implements the Abalone search agent: a depth-limited Negamax
// search with alpha-beta pruning over states produced by an external engine.
//
// Key features:
// - Deterministic (same state and table always give the same action)
// - Alpha-beta pruning, switchable for plain negamax
// - Transposition table shared across the decisions of a match
// - Quiescence extension after pushes to avoid horizon effects
// - Optional heuristic move ordering
// - Low-time fallback to a shallow search

pub mod geometry;
pub mod evaluation;
pub mod terminal;
pub mod transposition_table;
pub mod quiescence;
pub mod move_ordering;
pub mod negamax;
pub mod search;
mod negamax_player;

#[cfg(test)]
mod tests;

pub use negamax_player::{Difficulty, NegamaxPlayer};

// Re-export useful types
pub use evaluation::{Heuristic, PositionalHeuristic, Score, Weights};
pub use search::{search_best_action, SearchConfig, SearchResult, SearchStats};
pub use transposition_table::TranspositionTable;
