// Root search driver
//
// One decision runs one bounded negamax search from the current state. With
// the transposition table enabled the search fills the table for every
// root child as a side effect, and the best action is read back from it
// instead of being searched again. Without a table the root children are
// scored directly in a root loop.

use std::ops::AddAssign;
use std::time::{Duration, Instant};

use crate::game::{Action, GameState};
use super::evaluation::{Heuristic, Score};
use super::move_ordering::order_by_key;
use super::negamax::Searcher;
use super::quiescence::DEFAULT_QUIESCENCE_DEPTH;
use super::transposition_table::TranspositionTable;

/// Remaining time under which the agent switches to fast play.
pub const LOW_TIME_THRESHOLD: Duration = Duration::from_secs(60);

/// Search depth used once the remaining time is below [`LOW_TIME_THRESHOLD`].
pub const LOW_TIME_DEPTH: u32 = 2;

/// Plies searched from the root unless configured otherwise.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Which search features are enabled, and how deep to go.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies searched from the root (at least 1 is used)
    pub search_depth: u32,
    /// Stop expanding siblings once `alpha >= beta`
    pub use_alpha_beta: bool,
    /// Cache node scores across the whole match
    pub use_transposition_table: bool,
    /// Extend the search at the horizon right after a push
    pub use_quiescence: bool,
    /// Extra plies searched by a quiescence extension
    pub quiescence_depth: u32,
    /// Sort children by the leaf heuristic before expanding them
    pub order_moves: bool,
    pub low_time_threshold: Duration,
    pub low_time_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            use_alpha_beta: true,
            use_transposition_table: true,
            use_quiescence: true,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            order_moves: false,
            low_time_threshold: LOW_TIME_THRESHOLD,
            low_time_depth: LOW_TIME_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(search_depth: u32) -> Self {
        Self {
            search_depth,
            ..Self::default()
        }
    }

    /// Plain negamax: no pruning, no table, no extension.
    pub fn plain_negamax(search_depth: u32) -> Self {
        Self {
            search_depth,
            use_alpha_beta: false,
            use_transposition_table: false,
            use_quiescence: false,
            ..Self::default()
        }
    }

    /// Configuration to use with `remaining` time on the clock.
    ///
    /// Below the low-water mark the depth is capped and quiescence turned off
    /// so the answer comes back quickly. This is checked once per decision;
    /// a running search is never interrupted.
    pub fn adapted_to(&self, remaining: Duration) -> Self {
        if remaining >= self.low_time_threshold {
            return self.clone();
        }
        Self {
            search_depth: self.search_depth.min(self.low_time_depth),
            use_quiescence: false,
            ..self.clone()
        }
    }

    /// Depth actually searched from the root.
    pub fn root_depth(&self) -> u32 {
        self.search_depth.max(1)
    }
}

/// Diagnostic counters of one search. No correctness contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, table hits included
    pub nodes: u64,
    pub table_hits: u64,
    /// Expansions stopped with siblings left unexplored
    pub cutoffs: u64,
    pub quiescence_extensions: u64,
    pub terminal_nodes: u64,
    pub heuristic_evaluations: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.table_hits += other.table_hits;
        self.cutoffs += other.cutoffs;
        self.quiescence_extensions += other.quiescence_extensions;
        self.terminal_nodes += other.terminal_nodes;
        self.heuristic_evaluations += other.heuristic_evaluations;
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// `None` only when the root game is already over
    pub best_action: Option<A>,
    /// Negamax value of the root for the player to move
    pub score: Score,
    /// Value of the chosen child, in the root's frame
    pub action_score: Score,
    pub depth: u32,
    pub stats: SearchStats,
    pub time_ms: u64,
}

/// Search `state` and pick the action for the player to move.
///
/// # Panics
///
/// Panics if `state` is not finished but has no legal action.
pub fn search_best_action<S, H>(
    state: &S,
    config: &SearchConfig,
    table: &mut TranspositionTable<S::Key>,
    heuristic: &H,
) -> SearchResult<S::Action>
where
    S: GameState,
    H: Heuristic<S>,
{
    let start_time = Instant::now();
    let depth = config.root_depth();

    let mut searcher = Searcher::new(config, table, heuristic);

    let (score, best) = if state.is_done() || config.use_transposition_table {
        let score = searcher.search(state, depth, Score::NEG_INFINITY, Score::INFINITY, state);
        (score, None)
    } else {
        root_loop(&mut searcher, state, depth)
    };
    let stats = searcher.into_stats();

    let best = match best {
        Some(best) => Some(best),
        None if state.is_done() => None,
        None => read_back(state, depth, table, config.order_moves.then_some(heuristic)),
    };

    let (best_action, action_score) = match best {
        Some((action, value)) => (Some(action), value),
        None => (None, score),
    };

    let result = SearchResult {
        best_action,
        score,
        action_score,
        depth,
        stats,
        time_ms: start_time.elapsed().as_millis() as u64,
    };
    log_search_info(&result, table.len());
    result
}

/// Pick the root child with the best cached score.
///
/// Children are looked up at `depth - 1`, the depth they were searched to, so
/// the horizon flag of the key matches the one used when they were stored.
/// They are visited in the order the search expanded them: the first child
/// reaching the best value holds an exact score, later ones may only hold a
/// bound equal to it. A missing child counts as a win for the opponent and
/// is only chosen when nothing better exists.
fn read_back<S, H>(
    state: &S,
    depth: u32,
    table: &TranspositionTable<S::Key>,
    ordering: Option<&H>,
) -> Option<(S::Action, Score)>
where
    S: GameState,
    H: Heuristic<S>,
{
    let mut moves: Vec<(S::Action, S)> = state
        .possible_actions()
        .into_iter()
        .map(|action| {
            let child = action.next_state();
            (action, child)
        })
        .collect();
    if let Some(heuristic) = ordering {
        order_by_key(&mut moves, heuristic, |(_, child)| child);
    }

    let mut best: Option<(S::Action, Score)> = None;
    for (action, child) in moves {
        let value = -table.lookup(&child, depth - 1).unwrap_or(Score::INFINITY);
        log::debug!("root child {:?}: {}", child.key(), value);
        match &best {
            Some((_, best_value)) if value <= *best_value => {}
            _ => best = Some((action, value)),
        }
    }
    best
}

/// Score each root child directly (used when the table is disabled).
fn root_loop<S, H>(
    searcher: &mut Searcher<'_, S, H>,
    state: &S,
    depth: u32,
) -> (Score, Option<(S::Action, Score)>)
where
    S: GameState,
    H: Heuristic<S>,
{
    let actions = state.possible_actions();
    assert!(
        !actions.is_empty(),
        "state at step {} is not finished but has no legal action",
        state.step()
    );
    searcher.stats.nodes += 1;

    let mut alpha = Score::NEG_INFINITY;
    let beta = Score::INFINITY;
    let mut best: Option<(S::Action, Score)> = None;
    let total = actions.len();

    for (i, action) in actions.into_iter().enumerate() {
        let child = action.next_state();
        let value = -searcher.search(&child, depth - 1, -beta, -alpha, state);
        log::debug!("root child {:?}: {}", child.key(), value);

        match &best {
            Some((_, best_value)) if value <= *best_value => {}
            _ => best = Some((action, value)),
        }
        if value > alpha {
            alpha = value;
        }
        if searcher.config.use_alpha_beta && alpha >= beta {
            if i + 1 < total {
                searcher.stats.cutoffs += 1;
            }
            break;
        }
    }

    (alpha, best)
}

/// Log search information for a completed decision
fn log_search_info<A>(result: &SearchResult<A>, table_size: usize) {
    log::info!(
        "depth {} score {} nodes {} hits {} cutoffs {} qext {} time {}ms table {}",
        result.depth,
        result.score,
        result.stats.nodes,
        result.stats.table_hits,
        result.stats.cutoffs,
        result.stats.quiescence_extensions,
        result.time_ms,
        table_size
    );
}
