// Negamax Search with Alpha-Beta Pruning
//
// Negamax is a variant of the minimax algorithm that uses the zero-sum
// property of the game: max(a, b) = -min(-a, -b). Every node returns its
// value from the point of view of its own player to move, and a parent
// negates what its children return.
//
// Each node goes through the following checks, in this order:
// 1. transposition table hit: return the cached score, nothing else to do
// 2. finished game: exact terminal score, stored with TERMINAL_DEPTH
// 3. depth exhausted: quiescence extension if a push just happened,
//    otherwise the leaf heuristic
// 4. interior node: expand children with the negated window, keep the
//    maximum, stop once alpha >= beta
// The finalized score is stored in the table before returning.

use crate::game::GameState;
use super::evaluation::{Heuristic, Score};
use super::move_ordering::{generate_children, order_by_heuristic};
use super::quiescence::push_happened;
use super::search::{SearchConfig, SearchStats};
use super::terminal::terminal_score;
use super::transposition_table::{
    TableKey, TranspositionEntry, TranspositionTable, TERMINAL_DEPTH,
};

/// Recursive tree walker for one decision.
///
/// Owns the statistics of the search; borrows the configuration, the
/// match-long transposition table and the leaf heuristic.
pub struct Searcher<'a, S: GameState, H> {
    pub(super) config: &'a SearchConfig,
    pub(super) table: &'a mut TranspositionTable<S::Key>,
    pub(super) heuristic: &'a H,
    pub(super) stats: SearchStats,
}

impl<'a, S, H> Searcher<'a, S, H>
where
    S: GameState,
    H: Heuristic<S>,
{
    pub fn new(
        config: &'a SearchConfig,
        table: &'a mut TranspositionTable<S::Key>,
        heuristic: &'a H,
    ) -> Self {
        Self {
            config,
            table,
            heuristic,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_stats(self) -> SearchStats {
        self.stats
    }

    /// Negamax value of `state` for its player to move.
    ///
    /// `previous` is the state `state` was reached from; it is only used to
    /// detect pushes at the horizon. Pass `state` itself at the root.
    ///
    /// # Panics
    ///
    /// Panics when a state that is not finished has no legal action.
    pub fn search(
        &mut self,
        state: &S,
        depth: u32,
        alpha: Score,
        beta: Score,
        previous: &S,
    ) -> Score {
        let quiescence = self.config.use_quiescence;
        self.search_node(state, depth, alpha, beta, previous, quiescence)
    }

    pub(super) fn search_node(
        &mut self,
        state: &S,
        depth: u32,
        alpha: Score,
        beta: Score,
        previous: &S,
        quiescence: bool,
    ) -> Score {
        self.stats.nodes += 1;

        let key = TableKey::new(state, depth);
        let player = state.next_player();

        if self.config.use_transposition_table {
            if let Some(score) = self.table.lookup_key(&key, depth, player) {
                self.stats.table_hits += 1;
                return score;
            }
        }

        let (score, stored_depth) = if state.is_done() {
            self.stats.terminal_nodes += 1;
            (terminal_score(state), TERMINAL_DEPTH)
        } else if depth == 0 {
            if quiescence && push_happened(state, previous) {
                (self.quiescence_search(state, alpha, beta, previous), 0)
            } else {
                self.stats.heuristic_evaluations += 1;
                (self.heuristic.evaluate(state), 0)
            }
        } else {
            (self.expand(state, depth, alpha, beta, quiescence), depth)
        };

        if self.config.use_transposition_table {
            self.table.store_key(
                key,
                TranspositionEntry {
                    score,
                    depth: stored_depth,
                    player,
                },
            );
        }

        score
    }

    /// Interior node: fold the negated child values into a running maximum.
    fn expand(
        &mut self,
        state: &S,
        depth: u32,
        mut alpha: Score,
        beta: Score,
        quiescence: bool,
    ) -> Score {
        let mut children = generate_children(state);
        assert!(
            !children.is_empty(),
            "state at step {} is not finished but has no legal action",
            state.step()
        );
        if self.config.order_moves {
            order_by_heuristic(&mut children, self.heuristic);
        }

        let total = children.len();
        let mut best_score = Score::NEG_INFINITY;

        for (i, child) in children.iter().enumerate() {
            let score = -self.search_node(child, depth - 1, -beta, -alpha, state, quiescence);

            if score > best_score {
                best_score = score;
            }
            if best_score > alpha {
                alpha = best_score;
            }

            // Remaining siblings cannot change the parent's decision.
            if self.config.use_alpha_beta && alpha >= beta {
                if i + 1 < total {
                    self.stats.cutoffs += 1;
                }
                break;
            }
        }

        best_score
    }
}
