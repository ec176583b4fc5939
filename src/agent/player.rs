//! Player trait and associated types for game agents.
//!
//! A player is anything a match runner can ask for an action: the search
//! agent in [`crate::agent::ai`], a scripted opponent in tests, or a remote
//! client. The trait does not define a constructor; each implementation
//! takes whatever it needs.
//!
//! # Synchronous Design
//!
//! `compute_action()` blocks until an action is chosen. The runner passes the
//! time the player has left on its clock; what a player does with it is its
//! own business (the search agent only reads it once, before searching).

use std::time::Duration;

use crate::agent::ai::terminal::winner;
use crate::game::{GameState, PlayerId};

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

impl GameResult {
    /// Result of a finished state, with the usual score and center tie-break.
    pub fn from_final_state<S: GameState>(state: &S) -> Self {
        match winner(state) {
            Some(player) => GameResult::Winner(player),
            None => GameResult::Draw,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(player) => Some(*player),
            GameResult::Draw => None,
        }
    }
}

/// Trait for entities that can choose actions in a match.
///
/// Only `compute_action()` must be implemented.
pub trait Player<S: GameState> {
    /// Choose the action to play in `state`.
    ///
    /// `remaining` is the time left on this player's clock.
    ///
    /// Returns `None` when the player cannot provide an action, which for a
    /// well-behaved player only happens when `state` is already finished.
    fn compute_action(&mut self, state: &S, remaining: Duration) -> Option<S::Action>;

    /// Notify this player that the match is over.
    fn game_ended(&mut self, _result: GameResult) {}

    /// Display name of this player, used in logs.
    fn name(&self) -> &str {
        "Player"
    }
}
