//! Game-side abstractions consumed by the agent.
//!
//! The search never looks inside a concrete Abalone engine. It only needs a
//! state graph it can walk (`GameState` / `Action`) and a read-only view of
//! the marbles on the board (`Board`). Any engine that implements these
//! traits can be plugged into [`crate::agent::ai::NegamaxPlayer`].
//!
//! Two implementations ship with the crate:
//! - [`Layout`], a plain occupancy map on the hexagonal offset grid
//! - [`GameTree`] / [`TreeState`], explicit synthetic game trees used by the
//!   tests, the driver binary and the benchmarks

use std::fmt::Debug;
use std::hash::Hash;

mod layout;
mod tree;

pub use layout::*;
pub use tree::*;

/// Identity of a player in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

/// Grid coordinates `(row, col)` on the offset grid.
///
/// Rows are doubled: vertical neighbours are two rows apart, diagonal
/// neighbours one row and one column apart.
pub type Cell = (i32, i32);

/// The six hexagonal directions on the row-doubled grid.
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(-2, 0), (-1, 1), (1, 1), (2, 0), (1, -1), (-1, -1)];

/// Content of a neighbouring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbour {
    /// The cell is off the playable board
    Outside,
    /// Playable cell without a marble
    Empty,
    /// Playable cell holding a marble of this player
    Piece(PlayerId),
}

/// Read-only view of the marbles on a board.
pub trait Board {
    /// `(rows, cols)` of the offset grid.
    fn dimensions(&self) -> (i32, i32);

    /// Every occupied cell with its owner.
    fn occupied(&self) -> Vec<(Cell, PlayerId)>;

    /// Cells holding a marble of `player`.
    fn pieces(&self, player: PlayerId) -> Vec<Cell>;

    /// Content of the six neighbours of `cell`, in [`HEX_DIRECTIONS`] order.
    fn neighbours(&self, cell: Cell) -> [Neighbour; 6];
}

/// A legal move from a given state.
pub trait Action {
    type State;

    /// The state reached by playing this action.
    fn next_state(&self) -> Self::State;
}

/// Immutable snapshot of a match, produced by the external game engine.
///
/// States are never mutated after creation; applying an [`Action`] yields a
/// fresh state.
pub trait GameState: Sized {
    type Action: Action<State = Self>;
    /// Canonical identity of the board configuration (used as cache key).
    type Key: Eq + Hash + Clone + Debug;
    type Board: Board;

    fn key(&self) -> Self::Key;

    /// Legal actions from this state. Empty only when the game is over.
    fn possible_actions(&self) -> Vec<Self::Action>;

    fn is_done(&self) -> bool;

    /// Number of plies played so far.
    fn step(&self) -> u32;

    /// Declared maximum game length in plies.
    fn max_step(&self) -> u32;

    fn players(&self) -> &[PlayerId];

    /// The player to move.
    fn next_player(&self) -> PlayerId;

    /// Current score of `player` (marbles pushed off, as counted by the engine).
    fn score(&self, player: PlayerId) -> f64;

    fn board(&self) -> &Self::Board;
}

/// The other player of a two-player match.
///
/// Falls back to `player` itself when the state lists a single player.
pub fn opponent_of<S: GameState>(state: &S, player: PlayerId) -> PlayerId {
    state
        .players()
        .iter()
        .copied()
        .find(|&p| p != player)
        .unwrap_or(player)
}
