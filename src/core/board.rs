//! Square grid of cells for one player.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::common::{Cell, Coord, GameError};

/// One player's side of the ocean.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a `size`×`size` board of empty cells.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GameError> {
        if self.in_bounds(x, y) {
            Ok(x * self.size + y)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// State of the cell at (`x`, `y`).
    pub fn cell_state(&self, x: usize, y: usize) -> Result<Cell, GameError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Whether a shot already landed at (`x`, `y`). Out-of-bounds cells count as unresolved.
    pub fn is_resolved(&self, x: usize, y: usize) -> bool {
        self.cell_state(x, y).map(Cell::is_resolved).unwrap_or(false)
    }

    /// Set the cell at (`x`, `y`). Resolved cells are never re-marked.
    pub fn mark(&mut self, x: usize, y: usize, state: Cell) -> Result<(), GameError> {
        let idx = self.index(x, y)?;
        if self.cells[idx].is_resolved() {
            return Err(GameError::AlreadyFired);
        }
        self.cells[idx] = state;
        Ok(())
    }

    /// Iterate coordinates not yet hit or missed, in row-major order.
    pub fn unresolved(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_resolved())
            .map(move |(i, _)| Coord::new(i / self.size, i % self.size))
    }

    /// Number of cells holding `state`.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Rows of cells. With `reveal_ships` false, unshot ship cells render as empty.
    pub fn render(&self, reveal_ships: bool) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|&cell| match cell {
                        Cell::Ship if !reveal_ships => Cell::Empty,
                        other => other,
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {} }}", self.size)?;
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
