// Hexagonal distances on the row-doubled offset grid.
//
// On this grid vertical neighbours are two rows apart, so the naive
// (|dr| + |dc|) / 2 underestimates some horizontal paths. The corrections
// below cover every offset that occurs on the 61-cell board.

use crate::game::{Board, Cell, PlayerId};

/// Normalizer for per-piece center distances. The farthest playable cell is
/// 4 steps from the center, so normalized distances stay below 1.
pub const CENTER_DISTANCE_NORMALIZER: f64 = 5.0;

/// Offsets whose naive distance is one step short.
const ONE_STEP_SHORT: [(i32, i32); 3] = [(0, 2), (1, 3), (2, 4)];

/// Offset whose naive distance is two steps short.
const TWO_STEPS_SHORT: (i32, i32) = (0, 4);

/// Number of moves between two cells.
pub fn hex_distance(a: Cell, b: Cell) -> f64 {
    let delta = ((b.0 - a.0).abs(), (b.1 - a.1).abs());
    let mut distance = (delta.0 + delta.1) as f64 / 2.0;
    if ONE_STEP_SHORT.contains(&delta) {
        distance += 1.0;
    }
    if delta == TWO_STEPS_SHORT {
        distance += 2.0;
    }
    distance
}

/// The center cell of a board: `(rows / 2, cols / 2)`.
pub fn board_center<B: Board>(board: &B) -> Cell {
    let (rows, cols) = board.dimensions();
    (rows / 2, cols / 2)
}

/// Unnormalized sum of center distances over every marble of `player`.
pub fn total_center_distance<B: Board>(board: &B, player: PlayerId) -> f64 {
    let center = board_center(board);
    board
        .pieces(player)
        .into_iter()
        .map(|cell| hex_distance(center, cell))
        .sum()
}
