// Quiescence Extension - Tactical Stability at the Horizon
//
// Stopping the search right after a push misjudges the position: the pushed
// side may be about to push back, or a marble may be one step from the edge.
// When the depth budget runs out on a node whose player to move just had
// marbles displaced, the node is searched a little further instead of being
// scored statically. The extension itself never extends again.

use crate::game::{Board, GameState};
use super::evaluation::{Heuristic, Score};
use super::negamax::Searcher;

/// Extra plies searched by a quiescence extension.
pub const DEFAULT_QUIESCENCE_DEPTH: u32 = 1;

/// Whether the marbles of the player to move in `state` moved since
/// `previous`, i.e. the last move pushed or ejected some of them.
pub fn push_happened<S: GameState>(state: &S, previous: &S) -> bool {
    let player = state.next_player();
    let mut before = previous.board().pieces(player);
    let mut after = state.board().pieces(player);
    before.sort_unstable();
    after.sort_unstable();
    before != after
}

impl<S, H> Searcher<'_, S, H>
where
    S: GameState,
    H: Heuristic<S>,
{
    /// Re-search a noisy horizon node `quiescence_depth` plies deeper, with
    /// the same window and the extension disabled.
    pub(super) fn quiescence_search(
        &mut self,
        state: &S,
        alpha: Score,
        beta: Score,
        previous: &S,
    ) -> Score {
        self.stats.quiescence_extensions += 1;
        let depth = self.config.quiescence_depth;
        self.search_node(state, depth, alpha, beta, previous, false)
    }
}
