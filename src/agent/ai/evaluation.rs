// Position evaluation
//
// Scores a non-terminal state from the point of view of the player to move.
// Three signals are computed for each side:
// - score: marbles ejected so far, as reported by the engine
// - center distance: mean distance of a side's marbles to the board center,
//   divided by 5 so it stays below 1
// - adjacency: mean fraction of the 6 neighbours holding a friendly marble
//
// Each side's signals are combined with `Weights` and the opponent's total is
// subtracted from the mover's, which makes the result antisymmetric: negating
// a child's value converts it into the parent's frame.

use crate::game::{opponent_of, Board, GameState, Neighbour, PlayerId};
use super::geometry::{board_center, hex_distance, CENTER_DISTANCE_NORMALIZER};

/// Search value. `+inf`/`-inf` encode decided games.
pub type Score = f64;

/// Anything that can score a leaf state for the player to move.
pub trait Heuristic<S> {
    fn evaluate(&self, state: &S) -> Score;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> Score,
{
    fn evaluate(&self, state: &S) -> Score {
        self(state)
    }
}

/// Linear weights of the three positional signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub score: f64,
    pub center_distance: f64,
    pub adjacency: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            score: 10.0,
            center_distance: -10.0,
            adjacency: 1.0,
        }
    }
}

impl Weights {
    /// Score and center distance only, no cohesion term.
    pub fn score_and_distance() -> Self {
        Self {
            adjacency: 0.0,
            ..Self::default()
        }
    }

    /// Raw score difference.
    pub fn score_only() -> Self {
        Self {
            score: 1.0,
            center_distance: 0.0,
            adjacency: 0.0,
        }
    }

    /// Weighted sum of one side's signals.
    pub fn combine(&self, features: PlayerFeatures) -> f64 {
        self.score * features.score
            + self.center_distance * features.center_distance
            + self.adjacency * features.adjacency
    }
}

/// Normalized signals for one player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerFeatures {
    pub score: f64,
    /// Mean normalized center distance, in `[0, 1)`
    pub center_distance: f64,
    /// Mean friendly-neighbour fraction, in `[0, 1]`
    pub adjacency: f64,
}

/// Mean per-marble center distance divided by [`CENTER_DISTANCE_NORMALIZER`].
///
/// A player without marbles gets 0.
pub fn normalized_center_distance<B: Board>(board: &B, player: PlayerId) -> f64 {
    let pieces = board.pieces(player);
    if pieces.is_empty() {
        return 0.0;
    }
    let center = board_center(board);
    let total: f64 = pieces
        .iter()
        .map(|&cell| hex_distance(center, cell) / CENTER_DISTANCE_NORMALIZER)
        .sum();
    total / pieces.len() as f64
}

/// Mean fraction of friendly neighbours over the marbles of `player`.
///
/// A player without marbles gets 0.
pub fn adjacency<B: Board>(board: &B, player: PlayerId) -> f64 {
    let pieces = board.pieces(player);
    if pieces.is_empty() {
        return 0.0;
    }
    let friendly: usize = pieces
        .iter()
        .map(|&cell| {
            board
                .neighbours(cell)
                .iter()
                .filter(|&&n| n == Neighbour::Piece(player))
                .count()
        })
        .sum();
    friendly as f64 / pieces.len() as f64 / 6.0
}

pub fn player_features<S: GameState>(state: &S, player: PlayerId) -> PlayerFeatures {
    let board = state.board();
    PlayerFeatures {
        score: state.score(player),
        center_distance: normalized_center_distance(board, player),
        adjacency: adjacency(board, player),
    }
}

/// Evaluate `state` for the player to move: `combine(mover) - combine(opponent)`.
pub fn evaluate<S: GameState>(state: &S, weights: &Weights) -> Score {
    let player = state.next_player();
    let opponent = opponent_of(state, player);
    let own = weights.combine(player_features(state, player));
    own - weights.combine(player_features(state, opponent))
}

/// The default leaf heuristic: score, center distance and adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionalHeuristic {
    pub weights: Weights,
}

impl PositionalHeuristic {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }
}

impl<S: GameState> Heuristic<S> for PositionalHeuristic {
    fn evaluate(&self, state: &S) -> Score {
        evaluate(state, &self.weights)
    }
}
