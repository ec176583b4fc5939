// Terminal scoring
//
// A finished game is won by the player with the highest score. Equal scores
// are broken by the smallest summed (unnormalized) distance of a player's
// marbles to the center. If that is still tied the game is a draw.
//
// Terminal values are exact: +inf for a win of the player to move, -inf for
// a loss, 0 for a draw.

use smallvec::SmallVec;

use crate::game::{GameState, PlayerId};
use super::evaluation::Score;
use super::geometry::total_center_distance;

/// Value of a won game for the winner.
pub const WIN_SCORE: Score = Score::INFINITY;

/// Value of a lost game for the loser.
pub const LOSS_SCORE: Score = Score::NEG_INFINITY;

pub const DRAW_SCORE: Score = 0.0;

/// Winner of a finished game, or `None` for a draw.
pub fn winner<S: GameState>(state: &S) -> Option<PlayerId> {
    let players = state.players();
    let best = players
        .iter()
        .map(|&p| state.score(p))
        .fold(f64::NEG_INFINITY, f64::max);

    let leaders: SmallVec<[PlayerId; 2]> = players
        .iter()
        .copied()
        .filter(|&p| state.score(p) == best)
        .collect();
    if leaders.len() == 1 {
        return Some(leaders[0]);
    }

    // Only players tied on score compete in the tie-break.
    let board = state.board();
    let distances: SmallVec<[(PlayerId, f64); 2]> = leaders
        .iter()
        .map(|&p| (p, total_center_distance(board, p)))
        .collect();
    let closest = distances
        .iter()
        .map(|&(_, d)| d)
        .fold(f64::INFINITY, f64::min);

    let mut closest_players = distances.iter().filter(|&&(_, d)| d == closest);
    match (closest_players.next(), closest_players.next()) {
        (Some(&(player, _)), None) => Some(player),
        _ => None,
    }
}

/// Exact value of a finished game for the player to move.
pub fn terminal_score<S: GameState>(state: &S) -> Score {
    match winner(state) {
        Some(player) if player == state.next_player() => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => DRAW_SCORE,
    }
}
