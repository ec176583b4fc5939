// Move ordering
//
// Alpha-beta prunes more when strong moves come first. Children are ranked
// by the leaf heuristic evaluated in the child's own frame: the lower the
// child's value, the better the move for the parent. The sort is stable, so
// equal values keep the generator's order.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::game::{Action, GameState};
use super::evaluation::{Heuristic, Score};

/// Apply every legal action of `state`, in generator order.
pub fn generate_children<S: GameState>(state: &S) -> Vec<S> {
    state
        .possible_actions()
        .iter()
        .map(Action::next_state)
        .collect()
}

/// Sort `children` best-for-the-parent first.
pub fn order_by_heuristic<S, H: Heuristic<S>>(children: &mut Vec<S>, heuristic: &H) {
    order_by_key(children, heuristic, |child| child);
}

/// Sort `items` best-for-the-parent first, ranking each by the state
/// `state_of` extracts from it. Same order as [`order_by_heuristic`].
pub fn order_by_key<T, S, H, F>(items: &mut Vec<T>, heuristic: &H, state_of: F)
where
    H: Heuristic<S>,
    F: Fn(&T) -> &S,
{
    let mut scored: SmallVec<[(Score, T); 32]> = items
        .drain(..)
        .map(|item| (heuristic.evaluate(state_of(&item)), item))
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    items.extend(scored.into_iter().map(|(_, item)| item));
}
