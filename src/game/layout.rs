use std::collections::{BTreeMap, BTreeSet};

use super::{Board, Cell, Neighbour, PlayerId, HEX_DIRECTIONS};

/// Radius of the standard Abalone hexagon (5 cells per side).
pub const STANDARD_RADIUS: i32 = 4;

/// Marble occupancy on the row-doubled hexagonal grid.
///
/// `Layout` only stores which playable cell holds which marble. It knows
/// nothing about move legality; engines build one per state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    rows: i32,
    cols: i32,
    playable: BTreeSet<Cell>,
    marbles: BTreeMap<Cell, PlayerId>,
}

impl Layout {
    /// A rectangular grid where every cell is playable.
    pub fn rectangle(rows: i32, cols: i32) -> Self {
        let playable = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();
        Self {
            rows,
            cols,
            playable,
            marbles: BTreeMap::new(),
        }
    }

    /// A hexagonal board with `radius` rings around the center cell.
    ///
    /// The grid is `(4 * radius + 1) x (2 * radius + 1)` and the center sits at
    /// `(2 * radius, radius)`.
    pub fn hexagon(radius: i32) -> Self {
        let rows = 4 * radius + 1;
        let cols = 2 * radius + 1;
        let center = (2 * radius, radius);

        let mut playable = BTreeSet::new();
        for row in 0..rows {
            for col in 0..cols {
                let dr = (row - center.0).abs();
                let dc = (col - center.1).abs();
                if (dr + dc) % 2 == 0 && dc.max((dr + dc) / 2) <= radius {
                    playable.insert((row, col));
                }
            }
        }

        Self {
            rows,
            cols,
            playable,
            marbles: BTreeMap::new(),
        }
    }

    /// The 61-cell Abalone board, empty.
    pub fn standard() -> Self {
        Self::hexagon(STANDARD_RADIUS)
    }

    /// Builder-style placement of several marbles.
    pub fn with_pieces(mut self, player: PlayerId, cells: &[Cell]) -> Self {
        for &cell in cells {
            self.place(cell, player);
        }
        self
    }

    /// Put a marble on `cell`, replacing whatever was there.
    ///
    /// Off-board cells are ignored: a marble pushed off the board is gone.
    pub fn place(&mut self, cell: Cell, player: PlayerId) {
        if self.is_playable(cell) {
            self.marbles.insert(cell, player);
        }
    }

    pub fn remove(&mut self, cell: Cell) -> Option<PlayerId> {
        self.marbles.remove(&cell)
    }

    /// Move the marble on `from` to `to`. Returns false when `from` is empty.
    pub fn shift(&mut self, from: Cell, to: Cell) -> bool {
        match self.marbles.remove(&from) {
            Some(owner) => {
                self.place(to, owner);
                true
            }
            None => false,
        }
    }

    pub fn owner(&self, cell: Cell) -> Option<PlayerId> {
        self.marbles.get(&cell).copied()
    }

    pub fn is_playable(&self, cell: Cell) -> bool {
        self.playable.contains(&cell)
    }

    pub fn playable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.playable.iter().copied()
    }

    pub fn marble_count(&self) -> usize {
        self.marbles.len()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board for Layout {
    fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    fn occupied(&self) -> Vec<(Cell, PlayerId)> {
        self.marbles.iter().map(|(&cell, &owner)| (cell, owner)).collect()
    }

    fn pieces(&self, player: PlayerId) -> Vec<Cell> {
        self.marbles
            .iter()
            .filter(|(_, &owner)| owner == player)
            .map(|(&cell, _)| cell)
            .collect()
    }

    fn neighbours(&self, cell: Cell) -> [Neighbour; 6] {
        HEX_DIRECTIONS.map(|(dr, dc)| {
            let next = (cell.0 + dr, cell.1 + dc);
            if !self.is_playable(next) {
                Neighbour::Outside
            } else {
                match self.owner(next) {
                    Some(owner) => Neighbour::Piece(owner),
                    None => Neighbour::Empty,
                }
            }
        })
    }
}
