use std::collections::HashMap;
use std::hash::Hash;

use crate::game::{GameState, PlayerId};
use super::evaluation::Score;

/// Stored depth of exactly resolved (finished) positions.
///
/// Larger than any requested depth, so such entries are always usable.
pub const TERMINAL_DEPTH: u32 = u32::MAX;

/// Key of a transposition table entry.
///
/// The same board can have different values depending on how close the match
/// is to its move limit: near the end the limit cuts the game short. The key
/// therefore pairs the board identity with a flag telling whether the search
/// horizon reaches past `max_step`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey<K> {
    pub identity: K,
    pub near_end: bool,
}

impl<K> TableKey<K> {
    /// Key for searching `state` to `depth` plies.
    pub fn new<S: GameState<Key = K>>(state: &S, depth: u32) -> Self {
        Self {
            identity: state.key(),
            near_end: state.step().saturating_add(depth) > state.max_step(),
        }
    }
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranspositionEntry {
    /// Score from the point of view of `player`
    pub score: Score,
    /// Depth the score was searched to ([`TERMINAL_DEPTH`] for finished games)
    pub depth: u32,
    /// Player to move when the score was computed
    pub player: PlayerId,
}

impl TranspositionEntry {
    /// The stored score seen from `player`'s side.
    pub fn score_for(&self, player: PlayerId) -> Score {
        if self.player == player {
            self.score
        } else {
            -self.score
        }
    }
}

/// Cache of finalized node scores.
///
/// Entries are overwritten whenever a node is scored again (last write wins).
/// There is no eviction: the table grows for the lifetime of a match and is
/// cleared between matches.
#[derive(Debug, Clone)]
pub struct TranspositionTable<K> {
    table: HashMap<TableKey<K>, TranspositionEntry>,
}

impl<K: Eq + Hash> TranspositionTable<K> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashMap::with_capacity(capacity),
        }
    }

    /// Score of `state` if it was searched at least `depth` plies deep.
    ///
    /// The score is returned from the point of view of the player to move in
    /// `state`.
    pub fn lookup<S: GameState<Key = K>>(&self, state: &S, depth: u32) -> Option<Score> {
        self.lookup_key(&TableKey::new(state, depth), depth, state.next_player())
    }

    /// Same as [`lookup`](Self::lookup) with a precomputed key.
    pub fn lookup_key(&self, key: &TableKey<K>, depth: u32, player: PlayerId) -> Option<Score> {
        self.table
            .get(key)
            .filter(|entry| entry.depth >= depth)
            .map(|entry| entry.score_for(player))
    }

    /// Record `score`, seen from the player to move in `state`, for a search
    /// of `depth` plies.
    pub fn store<S: GameState<Key = K>>(&mut self, state: &S, depth: u32, score: Score) {
        let entry = TranspositionEntry {
            score,
            depth,
            player: state.next_player(),
        };
        self.store_key(TableKey::new(state, depth), entry);
    }

    pub fn store_key(&mut self, key: TableKey<K>, entry: TranspositionEntry) {
        self.table.insert(key, entry);
    }

    /// Raw entry for `key`, regardless of depth.
    pub fn entry(&self, key: &TableKey<K>) -> Option<&TranspositionEntry> {
        self.table.get(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<K: Eq + Hash> Default for TranspositionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
