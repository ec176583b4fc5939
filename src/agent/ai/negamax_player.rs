//! NegamaxPlayer - Abalone AI using Negamax with Alpha-Beta pruning
//!
//! This module implements the player side of the search: it owns the
//! transposition table for the whole match, turns a [`Difficulty`] or a
//! [`SearchConfig`] into one bounded search per decision, and adapts to the
//! clock.
//!
//! # Time Management
//!
//! There is no iterative deepening and no mid-search cancellation. The
//! remaining time is read once before searching: under the low-water mark
//! (60 seconds by default) the depth is capped at 2 and quiescence is turned
//! off for that decision only.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 1, greedy one-ply choice
//! - **Medium**: Depth 2
//! - **Hard**: Depth 3 (the default configuration)
//! - **Expert**: Depth 4 with heuristic move ordering
//!
//! # Examples
//!
//! ```ignore
//! use abalone_agent::agent::ai::{Difficulty, NegamaxPlayer};
//! use abalone_agent::agent::Player;
//!
//! // `state` comes from the game engine
//! let mut ai = NegamaxPlayer::with_difficulty(Difficulty::Hard);
//! let action = ai.compute_action(&state, remaining);
//! ```

use std::time::Duration;

use crate::agent::player::{GameResult, Player};
use crate::game::GameState;
use super::evaluation::{Heuristic, PositionalHeuristic};
use super::search::{search_best_action, SearchConfig, SearchResult, SearchStats};
use super::transposition_table::TranspositionTable;

/// AI difficulty levels that map to search configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Depth 1: picks the child with the best static value
    Easy,
    /// Depth 2: sees the opponent's reply
    Medium,
    /// Depth 3 with quiescence, the default setup
    Hard,
    /// Depth 4 with move ordering
    ///
    /// Noticeably slower on the full board; meant for generous clocks.
    Expert,
}

impl Difficulty {
    /// Number of plies searched from the root
    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Get a display name for this difficulty level
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn config(&self) -> SearchConfig {
        SearchConfig::for_difficulty(*self)
    }
}

impl SearchConfig {
    /// Preset configuration of a difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            order_moves: difficulty == Difficulty::Expert,
            ..Self::with_depth(difficulty.max_depth())
        }
    }
}

/// AI Player that uses Negamax algorithm with alpha-beta pruning
///
/// The transposition table is kept across decisions of the same match and
/// cleared when the match ends. A player is not meant to be shared between
/// concurrent matches.
pub struct NegamaxPlayer<S: GameState, H = PositionalHeuristic> {
    config: SearchConfig,
    heuristic: H,
    table: TranspositionTable<S::Key>,
    /// Display name, used in logs
    name: String,
    last_result: Option<SearchResult<S::Action>>,
    total_stats: SearchStats,
}

impl<S: GameState> NegamaxPlayer<S> {
    /// Player with the given difficulty, named "AI (<difficulty>)".
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let name = format!("AI ({})", difficulty.name());
        Self::new(difficulty.config(), PositionalHeuristic::default(), name)
    }

    /// Default search configuration with the positional heuristic.
    pub fn new_default() -> Self {
        Self::new(
            SearchConfig::default(),
            PositionalHeuristic::default(),
            "AI (Negamax)".to_string(),
        )
    }
}

impl<S, H> NegamaxPlayer<S, H>
where
    S: GameState,
    H: Heuristic<S>,
{
    pub fn new(config: SearchConfig, heuristic: H, name: String) -> Self {
        Self {
            config,
            heuristic,
            table: TranspositionTable::new(),
            name,
            last_result: None,
            total_stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration for future decisions.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Switch to a difficulty preset.
    ///
    /// The name is updated too if it was generated from a difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = difficulty.config();
        if self.name.starts_with("AI (") {
            self.name = format!("AI ({})", difficulty.name());
        }
    }

    pub fn table(&self) -> &TranspositionTable<S::Key> {
        &self.table
    }

    /// Result of the most recent decision.
    pub fn last_result(&self) -> Option<&SearchResult<S::Action>> {
        self.last_result.as_ref()
    }

    /// Statistics summed over every decision since the last reset.
    pub fn total_stats(&self) -> SearchStats {
        self.total_stats
    }

    /// Forget everything learned in the current match.
    pub fn reset(&mut self) {
        self.table.clear();
        self.last_result = None;
        self.total_stats = SearchStats::default();
    }

    /// Run one search for `state` with `remaining` time on the clock.
    pub fn decide(&mut self, state: &S, remaining: Duration) -> &SearchResult<S::Action> {
        let config = self.config.adapted_to(remaining);
        if config != self.config {
            log::warn!(
                "[{}] {:.1}s left, searching depth {} without quiescence",
                self.name,
                remaining.as_secs_f64(),
                config.root_depth()
            );
        }

        let entries_before = self.table.len();
        let result = search_best_action(state, &config, &mut self.table, &self.heuristic);
        log::debug!(
            "[{}] table grew by {} entries to {}",
            self.name,
            self.table.len() - entries_before,
            self.table.len()
        );

        self.total_stats += result.stats;
        self.last_result.insert(result)
    }
}

impl<S, H> Player<S> for NegamaxPlayer<S, H>
where
    S: GameState,
    S::Action: Clone,
    H: Heuristic<S>,
{
    fn compute_action(&mut self, state: &S, remaining: Duration) -> Option<S::Action> {
        self.decide(state, remaining).best_action.clone()
    }

    /// The table only describes the finished match; drop it.
    fn game_ended(&mut self, result: GameResult) {
        log::info!(
            "[{}] game ended ({:?}), {} nodes searched in total",
            self.name,
            result,
            self.total_stats.nodes
        );
        self.table.clear();
    }

    fn name(&self) -> &str {
        &self.name
    }
}
